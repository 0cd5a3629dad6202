//! Canonical status vocabulary for the survey

use serde::{Deserialize, Serialize};
use std::fmt;

/// A respondent's current situation.
///
/// The set is closed: every dataset maps its cohorts onto exactly these six
/// categories. Declaration order is the canonical order used for flow-graph
/// target nodes and edge emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Status {
    Working,
    Studying,
    Applying,
    #[serde(rename = "Stay-at-home")]
    StayAtHome,
    Other,
    Left,
}

impl Status {
    /// Number of canonical statuses
    pub const COUNT: usize = 6;

    /// All statuses in canonical order
    pub const ALL: [Status; Status::COUNT] = [
        Status::Working,
        Status::Studying,
        Status::Applying,
        Status::StayAtHome,
        Status::Other,
        Status::Left,
    ];

    /// The survey's display name for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Working => "Working",
            Status::Studying => "Studying",
            Status::Applying => "Applying",
            Status::StayAtHome => "Stay-at-home",
            Status::Other => "Other",
            Status::Left => "Left",
        }
    }

    /// Parse a display name back into a status
    pub fn parse(name: &str) -> Option<Status> {
        Status::ALL.iter().copied().find(|s| s.as_str() == name)
    }

    /// Index of this status in canonical order
    pub fn position(&self) -> usize {
        match self {
            Status::Working => 0,
            Status::Studying => 1,
            Status::Applying => 2,
            Status::StayAtHome => 3,
            Status::Other => 4,
            Status::Left => 5,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_positions() {
        for (i, status) in Status::ALL.iter().enumerate() {
            assert_eq!(status.position(), i);
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("Retired"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Status::StayAtHome).unwrap();
        assert_eq!(json, "\"Stay-at-home\"");

        let status: Status = serde_json::from_str("\"Working\"").unwrap();
        assert_eq!(status, Status::Working);
    }
}
