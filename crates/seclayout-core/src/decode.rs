//! Payload decoding.
//!
//! Decoding is the only fallible step of the pipeline: malformed JSON, an empty node list and
//! repeated node identifiers are all rejected here so the sanitizer and layout never see them.

use crate::error::{Error, Result};
use crate::model::Graph;
use std::io::Read;

pub fn from_slice(bytes: &[u8]) -> Result<Graph> {
    let graph: Graph = serde_json::from_slice(bytes)?;
    check(graph)
}

pub fn from_str(text: &str) -> Result<Graph> {
    let graph: Graph = serde_json::from_str(text)?;
    check(graph)
}

pub fn from_reader<R: Read>(mut reader: R) -> Result<Graph> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_slice(&buf)
}

fn check(graph: Graph) -> Result<Graph> {
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "parsed graph payload"
    );
    if graph.nodes.is_empty() {
        return Err(Error::NoNodes);
    }
    graph.check_unique_ids()?;
    Ok(graph)
}
