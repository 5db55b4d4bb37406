use crate::*;
use serde_json::json;

#[test]
fn decodes_full_payload() {
    let text = r#"{
        "nodes": [
            { "id": "a", "label": "Gateway", "desc": "edge proxy", "security": 3 },
            { "id": "b", "label": "DB", "security": 5, "x": 10, "y": 20 }
        ],
        "edges": [ { "from": "a", "to": "b" } ]
    }"#;
    let g = decode::from_str(text).unwrap();
    assert_eq!(g.nodes.len(), 2);
    assert_eq!(g.nodes[0].label, "Gateway");
    assert_eq!(g.nodes[0].desc, "edge proxy");
    assert_eq!(g.nodes[0].security, 3);
    assert_eq!((g.nodes[1].x, g.nodes[1].y), (10, 20));
    assert_eq!(g.nodes[1].desc, "");
    assert_eq!(g.edges, vec![Edge::new("a", "b")]);
}

#[test]
fn missing_edges_decode_as_empty() {
    let g = decode::from_slice(br#"{ "nodes": [ { "id": "solo" } ] }"#).unwrap();
    assert_eq!(g.nodes.len(), 1);
    assert!(g.edges.is_empty());
}

#[test]
fn rejects_malformed_json() {
    let err = decode::from_str("{ \"nodes\": [").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().starts_with("failed to parse JSON: "));
}

#[test]
fn rejects_empty_node_list() {
    let err = decode::from_str(r#"{ "nodes": [], "edges": [] }"#).unwrap_err();
    assert!(matches!(err, Error::NoNodes));
    assert_eq!(err.to_string(), "graph data is incomplete: no nodes found");

    let err = decode::from_str("{}").unwrap_err();
    assert!(matches!(err, Error::NoNodes));
}

#[test]
fn rejects_duplicate_node_ids() {
    let text = r#"{ "nodes": [ { "id": "a" }, { "id": "b" }, { "id": "a" } ], "edges": [] }"#;
    let err = decode::from_str(text).unwrap_err();
    assert!(matches!(err, Error::DuplicateNodeId { ref id } if id == "a"));
    assert_eq!(err.to_string(), "duplicate node id: a");
}

#[test]
fn from_reader_reads_everything() {
    let bytes: &[u8] = br#"{ "nodes": [ { "id": "a" }, { "id": "b" } ], "edges": [ { "from": "a", "to": "b" } ] }"#;
    let g = decode::from_reader(bytes).unwrap();
    assert_eq!(g.nodes.len(), 2);
    assert_eq!(g.edges.len(), 1);
}

#[test]
fn zero_level_is_omitted_on_output() {
    let mut g = Graph::new(
        vec![Node::new("a").with_security(2), Node::new("b")],
        vec![Edge::new("a", "b")],
    );
    layout(&mut g, &LayoutOptions::default());
    let value = serde_json::to_value(&g).unwrap();
    assert_eq!(
        value,
        json!({
            "nodes": [
                { "id": "a", "label": "a", "x": 500, "y": 50, "desc": "", "security": 2 },
                { "id": "b", "label": "b", "x": 500, "y": 150, "desc": "", "security": 0, "level": 1 }
            ],
            "edges": [ { "from": "a", "to": "b" } ]
        })
    );
}

#[test]
fn edge_missing_an_endpoint_decodes_and_is_dropped_by_sanitize() {
    let text = r#"{
        "nodes": [ { "id": "a" }, { "id": "b" } ],
        "edges": [ { "from": "a", "to": "b" }, { "from": "a" }, { "to": "b" } ]
    }"#;
    let mut g = decode::from_str(text).unwrap();
    assert_eq!(g.edges.len(), 3);
    assert_eq!(g.edges[1], Edge::new("a", ""));
    assert_eq!(g.edges[2], Edge::new("", "b"));

    let report = sanitize(&mut g);
    assert_eq!(report.dropped_edges, 2);
    assert_eq!(report.dropped_nodes, 0);
    assert_eq!(g.edges, vec![Edge::new("a", "b")]);

    layout(&mut g, &LayoutOptions::default());
    assert_eq!(g.node("b").map(|n| (n.level, n.x, n.y)), Some((1, 500, 150)));
}
