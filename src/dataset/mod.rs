//! Survey dataset model
//!
//! - Canonical status vocabulary ([`Status`])
//! - Immutable validated dataset with derived absolute counts ([`Dataset`])
//! - The embedded 2025 survey table ([`survey`])

pub mod model;
pub mod status;
pub mod survey;

pub use model::{
    Cohort, CohortConfig, ConfigResult, ConfigurationError, Dataset, DatasetConfig,
    PERCENT_SUM_TOLERANCE,
};
pub use status::Status;
