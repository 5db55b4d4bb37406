use crate::layout::{LayoutOptions, LayoutStats, layout};
use crate::model::Graph;
use crate::sanitize::{SanitizeReport, sanitize};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    pub input_nodes: usize,
    pub input_edges: usize,
    pub dropped_edges: usize,
    pub dropped_nodes: usize,
    pub nodes: usize,
    pub edges: usize,
    pub layout: LayoutStats,
}

/// Sanitizes `graph` and lays it out, in that order.
pub fn process(graph: &mut Graph, opts: &LayoutOptions) -> ProcessReport {
    let input_nodes = graph.nodes.len();
    let input_edges = graph.edges.len();

    let SanitizeReport {
        dropped_edges,
        dropped_nodes,
    } = sanitize(graph);
    let stats = layout(graph, opts);

    ProcessReport {
        input_nodes,
        input_edges,
        dropped_edges,
        dropped_nodes,
        nodes: graph.nodes.len(),
        edges: graph.edges.len(),
        layout: stats,
    }
}
