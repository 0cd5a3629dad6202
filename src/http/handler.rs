//! HTTP handlers for the flow API
//!
//! The handlers join the pure core outputs (graph, overlay, pivot) with the
//! palette into the concrete JSON a flow renderer consumes. Errors from bad
//! query input come back as 400 with a JSON error body.

use super::server::AppState;
use crate::aggregate::{cohort_overview, pivot, PivotOptions, ValueMode};
use crate::dataset::{survey::STACK_ORDER, Status};
use crate::flow::build_graph;
use crate::highlight::{resolve, Emphasis, Selection};
use crate::palette::{
    hex_to_rgba, DIMMED_LINK_COLOR, DIMMED_NODE_COLOR, EMPHASIS_LINK_ALPHA, LINK_ALPHA,
    NEUTRAL_COLOR,
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Query parameters for `/api/graph`
#[derive(Deserialize)]
pub struct GraphParams {
    #[serde(default)]
    pub mode: ValueMode,
    /// Cohort or status name to emphasize; absent means no selection
    pub focus: Option<String>,
}

/// Query parameters for `/api/pivot`
#[derive(Deserialize)]
pub struct PivotParams {
    #[serde(default)]
    pub mode: ValueMode,
    pub sort_by: Option<Status>,
    pub ascending: Option<bool>,
}

fn bad_request(message: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Flow graph with emphasis and concrete colors
pub async fn graph_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GraphParams>,
) -> impl IntoResponse {
    let selection = match Selection::from_label(params.focus.as_deref(), &state.dataset) {
        Ok(selection) => selection,
        Err(e) => return bad_request(e.to_string()),
    };

    let graph = build_graph(&state.dataset, params.mode);
    let overlay = match resolve(&graph, &selection) {
        Ok(overlay) => overlay,
        Err(e) => return bad_request(e.to_string()),
    };
    debug!(edges = graph.edges.len(), focus = ?params.focus, "built flow graph");

    let focused = !matches!(selection, Selection::None);
    let link_alpha = if focused { EMPHASIS_LINK_ALPHA } else { LINK_ALPHA };

    let mut nodes = Vec::with_capacity(graph.node_count());
    for (i, source) in graph.sources.iter().enumerate() {
        let color = match overlay.nodes[i] {
            Emphasis::Full => state
                .palette
                .cohort_color(&source.name)
                .unwrap_or(NEUTRAL_COLOR)
                .to_string(),
            Emphasis::Dimmed => DIMMED_NODE_COLOR.to_string(),
        };
        nodes.push(json!({
            "index": i,
            "kind": "cohort",
            "name": source.name,
            "label": source.label,
            "total": source.total,
            "emphasis": overlay.nodes[i],
            "color": color,
        }));
    }
    for (t, target) in graph.targets.iter().enumerate() {
        let i = graph.target_offset() + t;
        let color = match overlay.nodes[i] {
            Emphasis::Full => state
                .palette
                .status_color(target.status)
                .unwrap_or(NEUTRAL_COLOR)
                .to_string(),
            Emphasis::Dimmed => DIMMED_NODE_COLOR.to_string(),
        };
        nodes.push(json!({
            "index": i,
            "kind": "status",
            "name": target.status,
            "label": target.status,
            "total": target.total,
            "emphasis": overlay.nodes[i],
            "color": color,
        }));
    }

    let links: Vec<_> = graph
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            // Links carry the color of the status they flow into
            let color = match overlay.edges[i] {
                Emphasis::Full => {
                    let status = graph
                        .target_status(edge.target)
                        .expect("edge targets are target nodes");
                    let hex = state
                        .palette
                        .status_color(status)
                        .unwrap_or(NEUTRAL_COLOR);
                    hex_to_rgba(hex, link_alpha)
                }
                Emphasis::Dimmed => DIMMED_LINK_COLOR.to_string(),
            };
            json!({
                "source": edge.source,
                "target": edge.target,
                "weight": edge.weight,
                "emphasis": overlay.edges[i],
                "color": color,
            })
        })
        .collect();

    Json(json!({
        "mode": params.mode,
        "focus": params.focus,
        "nodes": nodes,
        "links": links,
    }))
    .into_response()
}

/// Ranked cohort-by-status pivot table
pub async fn pivot_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PivotParams>,
) -> impl IntoResponse {
    let options = PivotOptions {
        status_order: STACK_ORDER.to_vec(),
        sort_by: params.sort_by.unwrap_or(Status::Working),
        mode: params.mode,
        ascending: params.ascending.unwrap_or(true),
    };
    Json(pivot(&state.dataset, &options))
}

/// Per-cohort outcome summary
pub async fn overview_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cohorts = cohort_overview(&state.dataset);
    let total_working: u32 = cohorts.iter().map(|c| c.working).sum();
    Json(json!({
        "cohorts": cohorts,
        "total_people": state.dataset.total_people(),
        "total_working": total_working,
    }))
}

/// Service health and dataset shape
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "dataset": {
            "cohorts": state.dataset.cohort_count(),
            "statuses": Status::COUNT,
            "people": state.dataset.total_people(),
        }
    }))
}
