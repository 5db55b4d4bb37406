use super::{graph, pos};
use crate::*;

#[test]
fn process_reports_every_stage() {
    let mut g = graph(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "X"), ("C", "C")],
    );
    let report = process(&mut g, &LayoutOptions::default());

    assert_eq!(report.input_nodes, 4);
    assert_eq!(report.input_edges, 3);
    assert_eq!(report.dropped_edges, 1);
    assert_eq!(report.dropped_nodes, 1);
    assert_eq!(report.nodes, 3);
    assert_eq!(report.edges, 2);
    // C only points at itself, so A is the sole source and C is unreached.
    assert_eq!(report.layout.roots, vec!["A".to_string()]);
    assert_eq!(report.layout.unreached, 1);

    assert_eq!(pos(&g, "A"), (0, 500, 50));
    assert_eq!(pos(&g, "B"), (1, 500, 150));
    // Denominator = 3 nodes - 2 reached + 1.
    assert_eq!(pos(&g, "C"), (2, 500, 250));
}

#[test]
fn process_on_fully_dangling_graph_yields_empty_result() {
    let mut g = graph(&["A", "B"], &[("A", "X")]);
    let report = process(&mut g, &LayoutOptions::default());
    assert_eq!(report.nodes, 0);
    assert_eq!(report.edges, 0);
    assert_eq!(report.layout, LayoutStats::default());
}

#[test]
fn process_never_lays_out_isolated_nodes() {
    let mut g = graph(&["A", "B", "C"], &[("A", "B")]);
    let report = process(&mut g, &LayoutOptions::default());
    assert_eq!(report.layout.reached, 2);
    assert_eq!(report.layout.unreached, 0);
    assert!(g.node("C").is_none());
}
