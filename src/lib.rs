//! Cohortflow
//!
//! A pure transformation engine over a fixed migration survey: people's stated
//! reason for migrating, mapped to their current status. The engine turns the
//! cohort/percentage table into the structures an interactive flow
//! visualization consumes, and owns the invariants that make those views
//! consistent.
//!
//! # Pipeline
//!
//! 1. [`dataset`] — the immutable validated table: cohort sizes, per-status
//!    percentages, and absolute counts derived once with a fixed rounding
//!    rule.
//! 2. [`aggregate`] — the cohort-by-status pivot with deterministic ranking
//!    and per-status totals.
//! 3. [`flow`] — the weighted bipartite reason-to-status graph, indexed the
//!    way bipartite flow renderers expect.
//! 4. [`highlight`] — the full/dimmed overlay computed from a single
//!    selection, never altering the weights.
//!
//! Everything downstream of the dataset is a pure function: identical inputs
//! give identical outputs, and concurrent callers need no coordination.
//! Rendering itself stays external; [`http`] serves the outputs as
//! renderer-agnostic JSON, with [`palette`] supplying the category colors.

pub mod aggregate;
pub mod dataset;
pub mod flow;
pub mod highlight;
pub mod http;
pub mod palette;

pub use aggregate::{
    cohort_overview, pivot, CohortOutcome, PivotOptions, PivotRow, PivotTable, ValueMode,
};
pub use dataset::{Cohort, CohortConfig, ConfigurationError, Dataset, DatasetConfig, Status};
pub use flow::{build_graph, FlowEdge, FlowGraph, SourceNode, TargetNode};
pub use highlight::{resolve, Emphasis, HighlightOverlay, Selection, UnknownSelectionError};
pub use palette::Palette;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate version, for callers that prefer a function
pub fn version() -> &'static str {
    VERSION
}
