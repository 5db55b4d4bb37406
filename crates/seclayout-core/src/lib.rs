#![forbid(unsafe_code)]

//! Graph sanitizer + deterministic layered layout (headless).
//!
//! The pipeline is fixed: decode a payload into a [`Graph`], drop dangling edges and isolated
//! nodes, then assign every surviving node a `(level, x, y)` triple via multi-source BFS from the
//! graph's roots. Nothing is retained between calls.

pub mod decode;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod sanitize;

pub use error::{Error, Result};
pub use layout::{LayoutOptions, LayoutStats, layout};
pub use model::{Edge, Graph, Node};
pub use pipeline::{ProcessReport, process};
pub use sanitize::{SanitizeReport, remove_isolated_nodes, sanitize, validate_graph};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
