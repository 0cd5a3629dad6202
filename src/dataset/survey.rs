//! The embedded 2025 expat survey table
//!
//! Five cohorts from the Copenhagen Capacity Expat Survey 2025 (pages 35-36),
//! keyed by the stated reason for moving, each with a per-status percentage
//! breakdown. Cohort sizes were back-calculated from the published
//! percentages. Counts are always derived from this percentage table; no
//! hand-adjusted per-cell counts are honored.

use super::model::{CohortConfig, Dataset, DatasetConfig};
use super::status::Status;
use crate::palette::Palette;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Status stacking order used by the survey's comparison chart. Positive
/// outcomes first, negative last; differs from the canonical order on purpose.
pub const STACK_ORDER: [Status; Status::COUNT] = [
    Status::Working,
    Status::Studying,
    Status::Other,
    Status::StayAtHome,
    Status::Applying,
    Status::Left,
];

fn cohort(
    name: &str,
    short_label: &str,
    size: u32,
    percentages: [(Status, f64); Status::COUNT],
) -> CohortConfig {
    CohortConfig {
        name: name.to_string(),
        short_label: Some(short_label.to_string()),
        size,
        percentages: IndexMap::from(percentages),
    }
}

/// The survey table as an input-boundary configuration
pub fn survey_config() -> DatasetConfig {
    DatasetConfig {
        cohorts: vec![
            cohort(
                "For a specific job opportunity",
                "Job opportunity",
                475,
                [
                    (Status::Working, 85.0),
                    (Status::Applying, 5.0),
                    (Status::Studying, 2.0),
                    (Status::StayAtHome, 2.0),
                    (Status::Other, 3.0),
                    (Status::Left, 4.0),
                ],
            ),
            cohort(
                "To live with my partner who was living here",
                "Joined partner",
                518,
                [
                    (Status::Working, 59.0),
                    (Status::Applying, 20.0),
                    (Status::Studying, 5.0),
                    (Status::StayAtHome, 5.0),
                    (Status::Other, 6.0),
                    (Status::Left, 4.0),
                ],
            ),
            cohort(
                "To study/do research",
                "Study/research",
                281,
                [
                    (Status::Working, 55.0),
                    (Status::Applying, 13.0),
                    (Status::Studying, 18.0),
                    (Status::StayAtHome, 1.0),
                    (Status::Other, 3.0),
                    (Status::Left, 9.0),
                ],
            ),
            cohort(
                "To seek employment",
                "Sought job",
                216,
                [
                    (Status::Working, 53.0),
                    (Status::Applying, 23.0),
                    (Status::Studying, 10.0),
                    (Status::StayAtHome, 2.0),
                    (Status::Other, 3.0),
                    (Status::Left, 10.0),
                ],
            ),
            cohort(
                "My spouse/partner was offered a job",
                "Spouse job offer",
                367,
                [
                    (Status::Working, 48.0),
                    (Status::Applying, 22.0),
                    (Status::Studying, 4.0),
                    (Status::StayAtHome, 14.0),
                    (Status::Other, 6.0),
                    (Status::Left, 5.0),
                ],
            ),
        ],
    }
}

/// Color tables for the survey: one color per status, one per cohort. Two
/// cohorts intentionally reuse the color of the status they feed into most.
pub fn survey_palette() -> Palette {
    let statuses = [
        (Status::Working, "#2E8B57"),    // Sea Green
        (Status::Studying, "#4169E1"),   // Royal Blue
        (Status::Applying, "#FF8C00"),   // Dark Orange
        (Status::StayAtHome, "#9370DB"), // Medium Purple
        (Status::Other, "#708090"),      // Slate Gray
        (Status::Left, "#DC143C"),       // Crimson
    ];
    let cohorts = [
        ("For a specific job opportunity", "#2E8B57"),
        ("To live with my partner who was living here", "#BC8F8F"),
        ("To study/do research", "#4169E1"),
        ("To seek employment", "#FF8C00"),
        ("My spouse/partner was offered a job", "#8B4513"),
    ];
    Palette::new(
        statuses.map(|(s, c)| (s, c.to_string())),
        cohorts.map(|(n, c)| (n.to_string(), c.to_string())),
    )
}

/// Process-wide memoized survey dataset.
///
/// The cache is an optimization only: construction is pure, so rebuilding
/// from [`survey_config`] yields an identical value.
pub fn survey_dataset() -> &'static Dataset {
    static DATASET: OnceLock<Dataset> = OnceLock::new();
    DATASET.get_or_init(|| {
        Dataset::from_config(survey_config()).expect("embedded survey table is valid")
    })
}
