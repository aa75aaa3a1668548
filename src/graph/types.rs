//! Graph types
//!
//! Nodes are identified by `(kind, name)` and edges by `(from, to, direction)`.
//! Both derive `Ord` so collections built from them iterate deterministically.

use serde::Serialize;
use std::fmt;

/// Which side of an ACL entry a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Principal,
    Resource,
}

impl NodeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Principal => "principal",
            NodeKind::Resource => "resource",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A deduplicated graph vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
    /// Data-quality problems, in the order they were detected
    pub problems: Vec<String>,
    /// Whether this node's name satisfied the include pattern
    pub matched_search: bool,
}

impl GraphNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            problems: Vec::new(),
            matched_search: false,
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.kind, self.name.clone())
    }

    pub fn is_principal(&self) -> bool {
        self.kind == NodeKind::Principal
    }

    pub fn is_resource(&self) -> bool {
        self.kind == NodeKind::Resource
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// Data-flow direction of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// Resource → principal (the principal consumes)
    Read,
    /// Principal → resource (the principal produces)
    Write,
}

/// A deduplicated directed relation between two node names
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub direction: EdgeDirection,
}

impl GraphEdge {
    /// Edge for a principal reading from a resource
    pub fn read(resource: impl Into<String>, principal: impl Into<String>) -> Self {
        Self {
            from: resource.into(),
            to: principal.into(),
            direction: EdgeDirection::Read,
        }
    }

    /// Edge for a principal writing to a resource
    pub fn write(principal: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            from: principal.into(),
            to: resource.into(),
            direction: EdgeDirection::Write,
        }
    }
}

/// Nodes and edges produced by one build pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look a node up by identity
    pub fn node(&self, kind: NodeKind, name: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.kind == kind && n.name == name)
    }

    pub fn principal(&self, name: &str) -> Option<&GraphNode> {
        self.node(NodeKind::Principal, name)
    }

    pub fn resource(&self, name: &str) -> Option<&GraphNode> {
        self.node(NodeKind::Resource, name)
    }

    pub fn has_edge(&self, edge: &GraphEdge) -> bool {
        self.edges.contains(edge)
    }
}
