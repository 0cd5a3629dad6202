//! Bipartite reason-to-status flow graph builder
//!
//! Projects the dataset into the dense, integer-indexed node/edge form that
//! bipartite flow renderers consume: source nodes occupy indices
//! `[0, cohorts)`, target nodes `[cohorts, cohorts + statuses)`, and edges
//! reference nodes by those indices.

use crate::aggregate::ValueMode;
use crate::dataset::{Dataset, Status};
use serde::Serialize;

/// Left-side node: one cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceNode {
    pub name: String,
    pub label: String,
    /// Total people in the cohort
    pub total: u32,
}

/// Right-side node: one canonical status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetNode {
    pub status: Status,
    /// Count for this status summed across all cohorts
    pub total: u32,
}

/// One weighted flow from a cohort to a status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    /// Index of the source node
    pub source: usize,
    /// Index of the target node (already offset past the sources)
    pub target: usize,
    /// Absolute count or percentage, per the build mode; never zero
    pub weight: f64,
}

/// The renderer-agnostic flow graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    pub sources: Vec<SourceNode>,
    pub targets: Vec<TargetNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Total number of nodes across both sides
    pub fn node_count(&self) -> usize {
        self.sources.len() + self.targets.len()
    }

    /// Index of the first target node
    pub fn target_offset(&self) -> usize {
        self.sources.len()
    }

    /// Whether a node index refers to a source node
    pub fn is_source(&self, node: usize) -> bool {
        node < self.sources.len()
    }

    /// Node index of a cohort by name, if present
    pub fn source_index(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|s| s.name == name)
    }

    /// Node index of a status, if present among the targets
    pub fn target_index(&self, status: Status) -> Option<usize> {
        self.targets
            .iter()
            .position(|t| t.status == status)
            .map(|p| p + self.target_offset())
    }

    /// Status of the target node at `node`, if it is a target index
    pub fn target_status(&self, node: usize) -> Option<Status> {
        node.checked_sub(self.target_offset())
            .and_then(|i| self.targets.get(i))
            .map(|t| t.status)
    }
}

/// Build the flow graph for a dataset.
///
/// Edges are emitted cohort by cohort in dataset insertion order, statuses in
/// canonical order within each cohort. Pairs whose weight is zero produce no
/// edge at all.
pub fn build_graph(dataset: &Dataset, mode: ValueMode) -> FlowGraph {
    let sources = dataset
        .cohorts()
        .iter()
        .map(|cohort| SourceNode {
            name: cohort.name.clone(),
            label: cohort.label().to_string(),
            total: cohort.size,
        })
        .collect();

    let targets: Vec<TargetNode> = Status::ALL
        .iter()
        .map(|&status| TargetNode {
            status,
            total: dataset.status_total(status),
        })
        .collect();

    let offset = dataset.cohort_count();
    let mut edges = Vec::new();
    for cohort in 0..dataset.cohort_count() {
        for (i, &status) in Status::ALL.iter().enumerate() {
            let weight = match mode {
                ValueMode::Absolute => dataset.count(cohort, status) as f64,
                ValueMode::Percentage => dataset.percentage(cohort, status),
            };
            if weight > 0.0 {
                edges.push(FlowEdge {
                    source: cohort,
                    target: offset + i,
                    weight,
                });
            }
        }
    }

    FlowGraph {
        sources,
        targets,
        edges,
    }
}
