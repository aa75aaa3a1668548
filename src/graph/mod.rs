//! ACL graph construction
//!
//! Runs the synchronous pipeline that turns ACL entries into an annotated graph:
//!
//! ```text
//! entries → filter → build → annotate → Graph
//! ```
//!
//! Every call builds its own node and edge collections; nothing is shared
//! between calls.

pub mod annotator;
pub mod builder;
pub mod types;

pub use annotator::{DUPLICATE_VERSION_FAMILY, WILDCARD_PRINCIPAL, annotate, version_family};
pub use builder::{GraphBuilder, build};
pub use types::{EdgeDirection, Graph, GraphEdge, GraphNode, NodeKey, NodeKind};

use crate::acl::{AclEntry, SearchConditions, SearchRequest, filter};
use crate::error::ConfigError;

/// Compile the request's patterns and generate the graph
///
/// A malformed pattern fails before any entry is processed.
pub fn generate(entries: &[AclEntry], request: &SearchRequest) -> Result<Graph, ConfigError> {
    let conditions = SearchConditions::compile(request)?;
    Ok(generate_with(entries, &conditions))
}

/// Generate the graph from already compiled conditions
pub fn generate_with(entries: &[AclEntry], conditions: &SearchConditions) -> Graph {
    let filtered = filter(entries, conditions);
    let graph = build(&filtered);
    Graph {
        nodes: annotate(graph.nodes),
        edges: graph.edges,
    }
}
