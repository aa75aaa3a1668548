//! Per-node label payload
//!
//! A closed structure describing what the renderer should draw for a node,
//! independent of any rendering backend.

use crate::graph::{GraphNode, NodeKind};
use crate::label::links::LinkBuilder;
use serde::Serialize;

/// Icon shown next to the schema download link
pub const SCHEMA_ICON: &str = "static/magnifying-glass.svg";

/// Icon for the contact affordance
pub const CONTACT_ICON: &str = "static/contact.svg";

/// Icon for the warning affordance
pub const WARNING_ICON: &str = "static/warning.svg";

/// Separator between problems in the warning text
pub const PROBLEM_SEPARATOR: &str = "; ";

/// Visual emphasis applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Normal,
    /// The node matched the search
    Highlighted,
    /// The node has problems; wins over `Highlighted`
    Flagged,
}

impl Emphasis {
    pub fn for_node(node: &GraphNode) -> Self {
        if node.has_problems() {
            Emphasis::Flagged
        } else if node.matched_search {
            Emphasis::Highlighted
        } else {
            Emphasis::Normal
        }
    }
}

/// A clickable icon with a tooltip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub href: Option<String>,
    pub icon: String,
    pub tooltip: String,
}

/// Everything the renderer needs to draw one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    pub name: String,
    pub kind: NodeKind,
    /// Re-renders the graph focused on this node
    pub zoom_link: String,
    /// Latest-schema download, resources only
    pub schema: Option<Affordance>,
    pub contact: Affordance,
    /// Joined problem text, present only when the node has problems
    pub warning: Option<Affordance>,
    pub emphasis: Emphasis,
}

/// Assemble the label payload for one node
pub fn prepare_label(node: &GraphNode, links: &dyn LinkBuilder) -> NodeLabel {
    let schema = (node.kind == NodeKind::Resource).then(|| Affordance {
        href: Some(links.download_link(&node.name)),
        icon: links.static_resource(SCHEMA_ICON),
        tooltip: "Get latest schema".to_string(),
    });

    let warning = node.has_problems().then(|| Affordance {
        href: None,
        icon: links.static_resource(WARNING_ICON),
        tooltip: node.problems.join(PROBLEM_SEPARATOR),
    });

    NodeLabel {
        name: node.name.clone(),
        kind: node.kind,
        zoom_link: links.self_link(&node.name),
        schema,
        contact: Affordance {
            href: None,
            icon: links.static_resource(CONTACT_ICON),
            tooltip: "Contact owner".to_string(),
        },
        warning,
        emphasis: Emphasis::for_node(node),
    }
}

/// Assemble labels for every node, in node order
pub fn prepare_labels(nodes: &[GraphNode], links: &dyn LinkBuilder) -> Vec<NodeLabel> {
    nodes.iter().map(|n| prepare_label(n, links)).collect()
}
