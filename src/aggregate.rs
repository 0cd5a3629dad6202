//! Pivoting and totals for the ranked comparison view

use crate::dataset::{Dataset, Status};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which quantity to display: derived absolute counts or stated percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    #[default]
    Absolute,
    Percentage,
}

/// Options for [`pivot`]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotOptions {
    /// Statuses to include, in column order
    pub status_order: Vec<Status>,
    /// Column whose value ranks the rows
    pub sort_by: Status,
    pub mode: ValueMode,
    pub ascending: bool,
}

impl Default for PivotOptions {
    fn default() -> Self {
        PivotOptions {
            status_order: Status::ALL.to_vec(),
            sort_by: Status::Working,
            mode: ValueMode::Absolute,
            ascending: true,
        }
    }
}

/// One cohort row of the pivot table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    /// Cohort name (unique key)
    pub cohort: String,
    /// Display label for chart axes
    pub label: String,
    /// Values per status, in the requested column order
    pub values: IndexMap<Status, f64>,
}

/// Cohort-by-status matrix with per-status totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub rows: Vec<PivotRow>,
    /// Absolute count per status summed across cohorts, regardless of mode
    pub status_totals: IndexMap<Status, u32>,
}

/// Pivot the dataset into a cohort-by-status matrix, ranked by the `sort_by`
/// column.
///
/// The sort key is always the *percentage* value of the sort column, even in
/// absolute mode: percentages reflect the underlying rate and are comparable
/// across differently sized cohorts, absolute counts are not. Ties keep the
/// dataset's insertion order.
pub fn pivot(dataset: &Dataset, options: &PivotOptions) -> PivotTable {
    let mut keyed: Vec<(f64, PivotRow)> = dataset
        .cohorts()
        .iter()
        .enumerate()
        .map(|(i, cohort)| {
            let values = options
                .status_order
                .iter()
                .map(|&status| {
                    let value = match options.mode {
                        ValueMode::Absolute => dataset.count(i, status) as f64,
                        ValueMode::Percentage => dataset.percentage(i, status),
                    };
                    (status, value)
                })
                .collect();
            let key = dataset.percentage(i, options.sort_by);
            (
                key,
                PivotRow {
                    cohort: cohort.name.clone(),
                    label: cohort.label().to_string(),
                    values,
                },
            )
        })
        .collect();

    // Stable sort keeps insertion order for equal keys in either direction
    if options.ascending {
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    } else {
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    }

    let status_totals = options
        .status_order
        .iter()
        .map(|&status| (status, dataset.status_total(status)))
        .collect();

    PivotTable {
        rows: keyed.into_iter().map(|(_, row)| row).collect(),
        status_totals,
    }
}

/// Per-cohort outcome summary for the comparison view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortOutcome {
    pub cohort: String,
    pub label: String,
    pub size: u32,
    pub working: u32,
    /// Share of the cohort currently working, in percent to one decimal
    pub working_rate: f64,
}

/// Summarize each cohort's size against its working outcome, in insertion
/// order.
pub fn cohort_overview(dataset: &Dataset) -> Vec<CohortOutcome> {
    dataset
        .cohorts()
        .iter()
        .enumerate()
        .map(|(i, cohort)| {
            let working = dataset.count(i, Status::Working);
            let working_rate =
                (working as f64 / cohort.size as f64 * 1000.0).round() / 10.0;
            CohortOutcome {
                cohort: cohort.name.clone(),
                label: cohort.label().to_string(),
                size: cohort.size,
                working,
                working_rate,
            }
        })
        .collect()
}
