//! Graph construction
//!
//! Converts filtered entries into deduplicated nodes and edges. Adding a node
//! or edge that already exists is a no-op, except that a node's
//! `matched_search` flag is OR-ed with the new value.

use crate::acl::ClassifiedEntry;
use crate::graph::types::{Graph, GraphEdge, GraphNode, NodeKey, NodeKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Accumulates nodes and edges for one build pass
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: BTreeMap<NodeKey, GraphNode>,
    edges: BTreeSet<GraphEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists, flagging it if `matched_search` is set
    pub fn add_node(&mut self, name: &str, kind: NodeKind, matched_search: bool) {
        let node = self
            .nodes
            .entry(NodeKey::new(kind, name))
            .or_insert_with(|| GraphNode::new(name, kind));
        node.matched_search |= matched_search;
    }

    /// Insert an edge, returning `false` if it was already present
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        self.edges.insert(edge)
    }

    /// Add both endpoints of an entry and the edges its permission implies
    pub fn add_entry(&mut self, classified: &ClassifiedEntry<'_>) {
        let entry = classified.entry;
        trace!(
            principal = %entry.principal,
            resource = %entry.resource,
            permission = %entry.permission,
            class = ?classified.class,
            "Adding entry"
        );

        self.add_node(
            &entry.principal,
            NodeKind::Principal,
            classified.class.highlights_principal(),
        );
        self.add_node(
            &entry.resource,
            NodeKind::Resource,
            classified.class.highlights_resource(),
        );

        // Unknown wire permissions arrive here as ReadWrite.
        if entry.permission.grants_read() {
            self.add_edge(GraphEdge::read(&entry.resource, &entry.principal));
        }
        if entry.permission.grants_write() {
            self.add_edge(GraphEdge::write(&entry.principal, &entry.resource));
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Finish the pass, ordering nodes by identity
    pub fn finish(self) -> Graph {
        Graph {
            nodes: self.nodes.into_values().collect(),
            edges: self.edges.into_iter().collect(),
        }
    }
}

/// Build a graph from filtered entries
pub fn build(entries: &[ClassifiedEntry<'_>]) -> Graph {
    let mut builder = GraphBuilder::new();
    for classified in entries {
        builder.add_entry(classified);
    }

    debug!(
        entries = entries.len(),
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "Built ACL graph"
    );

    builder.finish()
}
