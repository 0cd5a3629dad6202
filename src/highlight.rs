//! Selection-driven emphasis overlay
//!
//! Given a flow graph and a selection, computes a full/dimmed state for every
//! node and edge without touching the weights. The resolver is a pure
//! function; there is no internal state machine beyond the selection the
//! caller passes in.

use crate::dataset::{Dataset, Status};
use crate::flow::FlowGraph;
use serde::Serialize;
use thiserror::Error;

/// The selection names a cohort or status absent from the current dataset,
/// e.g. a stale UI selection held across a dataset swap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("selection '{0}' does not name a cohort or status in the current dataset")]
pub struct UnknownSelectionError(pub String);

/// The single focus driving the overlay: nothing, one cohort, or one status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Cohort(String),
    Status(Status),
}

impl Selection {
    /// Disambiguate the nullable selection string at the UI boundary.
    ///
    /// Cohort names are checked before canonical status names; anything else
    /// is rejected rather than matched approximately.
    pub fn from_label(
        label: Option<&str>,
        dataset: &Dataset,
    ) -> Result<Selection, UnknownSelectionError> {
        match label {
            None => Ok(Selection::None),
            Some(name) if dataset.contains_cohort(name) => {
                Ok(Selection::Cohort(name.to_string()))
            }
            Some(name) => Status::parse(name)
                .map(Selection::Status)
                .ok_or_else(|| UnknownSelectionError(name.to_string())),
        }
    }
}

/// Visual emphasis of one node or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Full,
    Dimmed,
}

impl Emphasis {
    pub fn is_full(self) -> bool {
        self == Emphasis::Full
    }
}

/// Emphasis for every node and edge, dense over the graph's indices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightOverlay {
    /// One entry per node index
    pub nodes: Vec<Emphasis>,
    /// One entry per edge, in edge order
    pub edges: Vec<Emphasis>,
}

/// Compute the overlay for a selection.
///
/// - No selection: everything is full.
/// - A cohort: its node, its edges, and every status those edges reach.
/// - A status: its node, the edges into it, and every cohort they come from.
///
/// Fails with [`UnknownSelectionError`] when the selected cohort or status is
/// not in the graph; callers validate membership up front or fall back to
/// [`Selection::None`] themselves.
pub fn resolve(
    graph: &FlowGraph,
    selection: &Selection,
) -> Result<HighlightOverlay, UnknownSelectionError> {
    match selection {
        Selection::None => Ok(HighlightOverlay {
            nodes: vec![Emphasis::Full; graph.node_count()],
            edges: vec![Emphasis::Full; graph.edges.len()],
        }),
        Selection::Cohort(name) => {
            let selected = graph
                .source_index(name)
                .ok_or_else(|| UnknownSelectionError(name.clone()))?;

            let mut nodes = vec![Emphasis::Dimmed; graph.node_count()];
            let mut edges = vec![Emphasis::Dimmed; graph.edges.len()];
            nodes[selected] = Emphasis::Full;
            for (i, edge) in graph.edges.iter().enumerate() {
                if edge.source == selected {
                    edges[i] = Emphasis::Full;
                    nodes[edge.target] = Emphasis::Full;
                }
            }
            Ok(HighlightOverlay { nodes, edges })
        }
        Selection::Status(status) => {
            let selected = graph
                .target_index(*status)
                .ok_or_else(|| UnknownSelectionError(status.to_string()))?;

            let mut nodes = vec![Emphasis::Dimmed; graph.node_count()];
            let mut edges = vec![Emphasis::Dimmed; graph.edges.len()];
            nodes[selected] = Emphasis::Full;
            for (i, edge) in graph.edges.iter().enumerate() {
                if edge.target == selected {
                    edges[i] = Emphasis::Full;
                    nodes[edge.source] = Emphasis::Full;
                }
            }
            Ok(HighlightOverlay { nodes, edges })
        }
    }
}
