//! Category color tables
//!
//! Colors live in an explicit lookup table per category (status or cohort),
//! separate from the graph and emphasis logic. The table is validated for
//! completeness against the dataset at startup rather than falling back
//! silently at render time.

use crate::dataset::{ConfigResult, ConfigurationError, Dataset, Status};
use indexmap::IndexMap;

/// Fill for dimmed nodes
pub const DIMMED_NODE_COLOR: &str = "rgba(200, 200, 200, 0.7)";

/// Fill for dimmed links
pub const DIMMED_LINK_COLOR: &str = "rgba(200, 200, 200, 0.3)";

/// Link opacity with no selection active
pub const LINK_ALPHA: f64 = 0.6;

/// Link opacity for emphasized links
pub const EMPHASIS_LINK_ALPHA: f64 = 0.8;

/// Neutral fallback for categories without an assigned color
pub const NEUTRAL_COLOR: &str = "#808080";

/// A color-owning category: a canonical status or a named cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    Status(Status),
    Cohort(&'a str),
}

/// Bidirectional category-to-color table
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    statuses: IndexMap<Status, String>,
    cohorts: IndexMap<String, String>,
}

impl Palette {
    pub fn new(
        statuses: impl IntoIterator<Item = (Status, String)>,
        cohorts: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Palette {
            statuses: statuses.into_iter().collect(),
            cohorts: cohorts.into_iter().collect(),
        }
    }

    /// Hex color for a status, if assigned
    pub fn status_color(&self, status: Status) -> Option<&str> {
        self.statuses.get(&status).map(String::as_str)
    }

    /// Hex color for a cohort, if assigned
    pub fn cohort_color(&self, name: &str) -> Option<&str> {
        self.cohorts.get(name).map(String::as_str)
    }

    /// Hex color for any category
    pub fn color(&self, category: Category<'_>) -> Option<&str> {
        match category {
            Category::Status(status) => self.status_color(status),
            Category::Cohort(name) => self.cohort_color(name),
        }
    }

    /// Assign the neutral color to every dataset cohort the table misses.
    /// Lets a custom dataset run against the stock status palette.
    pub fn fill_missing_cohorts(&mut self, dataset: &Dataset) {
        for cohort in dataset.cohorts() {
            if !self.cohorts.contains_key(&cohort.name) {
                self.cohorts
                    .insert(cohort.name.clone(), NEUTRAL_COLOR.to_string());
            }
        }
    }

    /// Check that every canonical status and every dataset cohort has a color
    pub fn validate(&self, dataset: &Dataset) -> ConfigResult<()> {
        for status in Status::ALL {
            if !self.statuses.contains_key(&status) {
                return Err(ConfigurationError::MissingStatusColor(status));
            }
        }
        for cohort in dataset.cohorts() {
            if !self.cohorts.contains_key(&cohort.name) {
                return Err(ConfigurationError::MissingCohortColor(cohort.name.clone()));
            }
        }
        Ok(())
    }
}

/// Convert `#RRGGBB` to `rgba(r, g, b, alpha)`. Malformed hex falls back to
/// the neutral grey channel values.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let (r, g, b) = parse_hex(hex).unwrap_or((128, 128, 128));
    format!("rgba({r}, {g}, {b}, {alpha})")
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
