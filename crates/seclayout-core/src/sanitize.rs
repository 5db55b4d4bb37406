//! Structural cleanup run before layout.
//!
//! Two passes, always in this order: drop edges naming unknown nodes, then drop nodes no
//! remaining edge touches. Nothing here fails; invalid records are discarded silently.

use crate::model::Graph;
use rustc_hash::FxHashSet as HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub dropped_edges: usize,
    pub dropped_nodes: usize,
}

/// Keeps only edges whose endpoints are both present in `graph.nodes`.
///
/// Returns the number of edges removed.
pub fn validate_graph(graph: &mut Graph) -> usize {
    let before = graph.edges.len();
    let Graph { nodes, edges } = graph;
    let valid: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    edges.retain(|e| valid.contains(e.from.as_str()) && valid.contains(e.to.as_str()));
    before - edges.len()
}

/// Keeps only nodes that are an endpoint of at least one edge.
///
/// Returns the number of nodes removed.
pub fn remove_isolated_nodes(graph: &mut Graph) -> usize {
    let before = graph.nodes.len();
    let Graph { nodes, edges } = graph;
    let mut connected: HashSet<&str> = HashSet::default();
    for e in edges.iter() {
        connected.insert(e.from.as_str());
        connected.insert(e.to.as_str());
    }
    nodes.retain(|n| connected.contains(n.id.as_str()));
    before - nodes.len()
}

pub fn sanitize(graph: &mut Graph) -> SanitizeReport {
    let dropped_edges = validate_graph(graph);
    let dropped_nodes = remove_isolated_nodes(graph);
    tracing::debug!(
        dropped_edges,
        dropped_nodes,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "sanitized graph"
    );
    SanitizeReport {
        dropped_edges,
        dropped_nodes,
    }
}
