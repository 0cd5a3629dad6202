//! Immutable survey dataset: cohorts, status percentages, derived counts
//!
//! The dataset is constructed once from a `DatasetConfig`, validated eagerly,
//! and never mutated. Absolute counts are derived at construction time with a
//! fixed rounding rule so that identical input always yields identical output.

use super::status::Status;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Allowed drift of a cohort's percentage sum from 100. Source percentages are
/// independently rounded, so a point either way is expected.
pub const PERCENT_SUM_TOLERANCE: f64 = 1.0;

/// Errors for malformed or inconsistent input data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("dataset has no cohorts")]
    EmptyDataset,

    #[error("duplicate cohort '{0}'")]
    DuplicateCohort(String),

    #[error("cohort '{0}' has no status percentages")]
    NoPercentages(String),

    #[error("cohort '{0}' must have a positive size")]
    ZeroSize(String),

    #[error("cohort '{cohort}': {status} percentage {value} is outside [0, 100]")]
    PercentageOutOfRange {
        cohort: String,
        status: Status,
        value: f64,
    },

    #[error("palette has no color for status {0}")]
    MissingStatusColor(Status),

    #[error("palette has no color for cohort '{0}'")]
    MissingCohortColor(String),
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// A group of respondents sharing the same stated reason for migrating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Unique reason text, e.g. "To study/do research"
    pub name: String,

    /// Compact label for chart axes, e.g. "Study/research"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,

    /// Total people in the cohort
    pub size: u32,
}

impl Cohort {
    /// Display label: the short label when one exists, the full name otherwise
    pub fn label(&self) -> &str {
        self.short_label.as_deref().unwrap_or(&self.name)
    }
}

/// Input-boundary shape for one cohort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortConfig {
    pub name: String,
    #[serde(default)]
    pub short_label: Option<String>,
    pub size: u32,
    /// Status breakdown in percent. Statuses absent from the map count as 0.
    pub percentages: IndexMap<Status, f64>,
}

/// Static configuration enumerating every cohort of the survey
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub cohorts: Vec<CohortConfig>,
}

/// The validated, immutable survey dataset.
///
/// Percentages and derived counts are stored densely per cohort in canonical
/// status order, with a name index for cohort lookup. All downstream
/// components (aggregator, graph builder, highlight resolver) are pure
/// functions over this value.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    cohorts: Vec<Cohort>,
    index: HashMap<String, usize>,
    /// Per cohort, percentages in canonical status order
    percentages: Vec<[f64; Status::COUNT]>,
    /// Per cohort, derived absolute counts in canonical status order
    counts: Vec<[u32; Status::COUNT]>,
    /// Per status, count summed across cohorts
    status_totals: [u32; Status::COUNT],
}

impl Dataset {
    /// Validate `config` and derive absolute counts.
    ///
    /// Counts are `round(size * percentage / 100)` with ties rounded to even,
    /// fixed here and never recomputed. Per-cohort percentage sums more than
    /// [`PERCENT_SUM_TOLERANCE`] away from 100 are logged and left as-is; the
    /// rounding drift in the source tables must be tolerated, not corrected.
    pub fn from_config(config: DatasetConfig) -> ConfigResult<Self> {
        if config.cohorts.is_empty() {
            return Err(ConfigurationError::EmptyDataset);
        }

        let mut cohorts = Vec::with_capacity(config.cohorts.len());
        let mut index = HashMap::with_capacity(config.cohorts.len());
        let mut percentages = Vec::with_capacity(config.cohorts.len());
        let mut counts = Vec::with_capacity(config.cohorts.len());
        let mut status_totals = [0u32; Status::COUNT];

        for cohort in config.cohorts {
            if index.contains_key(&cohort.name) {
                return Err(ConfigurationError::DuplicateCohort(cohort.name));
            }
            if cohort.percentages.is_empty() {
                return Err(ConfigurationError::NoPercentages(cohort.name));
            }
            if cohort.size == 0 {
                return Err(ConfigurationError::ZeroSize(cohort.name));
            }

            let mut row_pct = [0.0f64; Status::COUNT];
            for (&status, &value) in &cohort.percentages {
                if !(0.0..=100.0).contains(&value) {
                    return Err(ConfigurationError::PercentageOutOfRange {
                        cohort: cohort.name.clone(),
                        status,
                        value,
                    });
                }
                row_pct[status.position()] = value;
            }

            let sum: f64 = row_pct.iter().sum();
            if (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
                warn!(
                    cohort = %cohort.name,
                    sum,
                    "cohort percentages drift more than {} point(s) from 100",
                    PERCENT_SUM_TOLERANCE
                );
            }

            let mut row_counts = [0u32; Status::COUNT];
            for (i, &pct) in row_pct.iter().enumerate() {
                let count = derive_count(cohort.size, pct);
                row_counts[i] = count;
                status_totals[i] += count;
            }

            index.insert(cohort.name.clone(), cohorts.len());
            cohorts.push(Cohort {
                name: cohort.name,
                short_label: cohort.short_label,
                size: cohort.size,
            });
            percentages.push(row_pct);
            counts.push(row_counts);
        }

        Ok(Dataset {
            cohorts,
            index,
            percentages,
            counts,
            status_totals,
        })
    }

    /// Cohorts in insertion order
    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    /// Number of cohorts
    pub fn cohort_count(&self) -> usize {
        self.cohorts.len()
    }

    /// Position of a cohort by name, if present
    pub fn cohort_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether a cohort with this name exists
    pub fn contains_cohort(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Stated percentage for (cohort, status).
    ///
    /// Panics if `cohort` is out of range, like slice indexing.
    pub fn percentage(&self, cohort: usize, status: Status) -> f64 {
        self.percentages[cohort][status.position()]
    }

    /// Derived absolute count for (cohort, status).
    ///
    /// Panics if `cohort` is out of range, like slice indexing.
    pub fn count(&self, cohort: usize, status: Status) -> u32 {
        self.counts[cohort][status.position()]
    }

    /// Count for a status summed across all cohorts
    pub fn status_total(&self, status: Status) -> u32 {
        self.status_totals[status.position()]
    }

    /// Sum of all cohort sizes
    pub fn total_people(&self) -> u32 {
        self.cohorts.iter().map(|c| c.size).sum()
    }
}

/// Absolute count for one (cohort, status) cell: round half to even.
///
/// Matches the derivation used when the survey tables were first published.
fn derive_count(size: u32, percentage: f64) -> u32 {
    (size as f64 * percentage / 100.0).round_ties_even() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cohort_config() -> DatasetConfig {
        DatasetConfig {
            cohorts: vec![
                CohortConfig {
                    name: "A".to_string(),
                    short_label: None,
                    size: 100,
                    percentages: IndexMap::from([
                        (Status::Working, 80.0),
                        (Status::Left, 20.0),
                    ]),
                },
                CohortConfig {
                    name: "B".to_string(),
                    short_label: None,
                    size: 50,
                    percentages: IndexMap::from([
                        (Status::Working, 40.0),
                        (Status::Applying, 60.0),
                    ]),
                },
            ],
        }
    }

    #[test]
    fn test_counts_derived_from_percentages() {
        let dataset = Dataset::from_config(two_cohort_config()).unwrap();

        assert_eq!(dataset.count(0, Status::Working), 80);
        assert_eq!(dataset.count(0, Status::Left), 20);
        assert_eq!(dataset.count(1, Status::Working), 20);
        assert_eq!(dataset.count(1, Status::Applying), 30);

        // Missing statuses count as zero
        assert_eq!(dataset.count(0, Status::Studying), 0);
        assert_eq!(dataset.percentage(0, Status::Studying), 0.0);
    }

    #[test]
    fn test_status_totals() {
        let dataset = Dataset::from_config(two_cohort_config()).unwrap();

        assert_eq!(dataset.status_total(Status::Working), 100);
        assert_eq!(dataset.status_total(Status::Applying), 30);
        assert_eq!(dataset.status_total(Status::Left), 20);
        assert_eq!(dataset.status_total(Status::Studying), 0);
        assert_eq!(dataset.total_people(), 150);
    }

    #[test]
    fn test_rounding_half_to_even() {
        // 9.5 and 10.5 both land on 10
        assert_eq!(derive_count(475, 2.0), 10);
        assert_eq!(derive_count(1050, 1.0), 10);
        assert_eq!(derive_count(475, 85.0), 404);
        assert_eq!(derive_count(281, 13.0), 37);
        assert_eq!(derive_count(100, 0.0), 0);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = Dataset::from_config(two_cohort_config()).unwrap();
        let b = Dataset::from_config(two_cohort_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cohort_lookup() {
        let dataset = Dataset::from_config(two_cohort_config()).unwrap();
        assert_eq!(dataset.cohort_index("A"), Some(0));
        assert_eq!(dataset.cohort_index("B"), Some(1));
        assert_eq!(dataset.cohort_index("C"), None);
        assert!(dataset.contains_cohort("A"));
        assert!(!dataset.contains_cohort("Working"));
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let err = Dataset::from_config(DatasetConfig::default()).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyDataset);
    }

    #[test]
    fn test_rejects_duplicate_cohort() {
        let mut config = two_cohort_config();
        let mut dup = config.cohorts[0].clone();
        dup.size = 10;
        config.cohorts.push(dup);

        let err = Dataset::from_config(config).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateCohort("A".to_string()));
    }

    #[test]
    fn test_rejects_cohort_without_percentages() {
        let mut config = two_cohort_config();
        config.cohorts[1].percentages.clear();

        let err = Dataset::from_config(config).unwrap_err();
        assert_eq!(err, ConfigurationError::NoPercentages("B".to_string()));
    }

    #[test]
    fn test_rejects_zero_size() {
        let mut config = two_cohort_config();
        config.cohorts[0].size = 0;

        let err = Dataset::from_config(config).unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroSize("A".to_string()));
    }

    #[test]
    fn test_rejects_out_of_range_percentage() {
        let mut config = two_cohort_config();
        config.cohorts[0]
            .percentages
            .insert(Status::Other, 101.0);

        match Dataset::from_config(config).unwrap_err() {
            ConfigurationError::PercentageOutOfRange {
                cohort,
                status,
                value,
            } => {
                assert_eq!(cohort, "A");
                assert_eq!(status, Status::Other);
                assert_eq!(value, 101.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = two_cohort_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DatasetConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            Dataset::from_config(config).unwrap(),
            Dataset::from_config(parsed).unwrap()
        );
    }
}
