//! Graphviz DOT source writer
//!
//! Node ids are prefixed with the node kind because a principal and a
//! resource may share a name.

use crate::graph::{EdgeDirection, GraphEdge, NodeKind};
use crate::label::{Affordance, Emphasis, NodeLabel};
use crate::render::RenderInput;

const GRAPH_NAME: &str = "Kafka ACL Graph";
const READ_COLOR: &str = "blue";
const WRITE_COLOR: &str = "red";
const HIGHLIGHT_COLOR: &str = "lawngreen";
const FLAGGED_COLOR: &str = "yellow";

/// Write the DOT source for a prepared graph
pub fn write_dot(input: &RenderInput) -> String {
    let mut out = format!("digraph {} {{\n", quote(GRAPH_NAME));
    out.push_str("  node [fontname=\"Helvetica\"];\n");

    for label in &input.labels {
        out.push_str(&node_statement(label));
    }

    for edge in &input.graph.edges {
        out.push_str(&edge_statement(edge));
    }

    out.push_str("}\n");
    out
}

/// DOT id of a node
pub fn node_id(kind: NodeKind, name: &str) -> String {
    quote(&format!("{}:{}", kind.as_str(), name))
}

/// Fill colour for an emphasis tier, `None` for unfilled nodes
pub fn fill_color(emphasis: Emphasis) -> Option<&'static str> {
    match emphasis {
        Emphasis::Normal => None,
        Emphasis::Highlighted => Some(HIGHLIGHT_COLOR),
        Emphasis::Flagged => Some(FLAGGED_COLOR),
    }
}

fn node_statement(label: &NodeLabel) -> String {
    let shape = match label.kind {
        NodeKind::Principal => "ellipse",
        NodeKind::Resource => "rectangle",
    };

    let mut attrs = vec![
        format!("shape={}", shape),
        format!("label=<{}>", html_label(label)),
    ];
    if let Some(color) = fill_color(label.emphasis) {
        attrs.push("style=filled".to_string());
        attrs.push(format!("fillcolor={}", color));
    }

    format!(
        "  {} [{}];\n",
        node_id(label.kind, &label.name),
        attrs.join(", ")
    )
}

fn edge_statement(edge: &GraphEdge) -> String {
    let (from_kind, to_kind, color) = match edge.direction {
        EdgeDirection::Read => (NodeKind::Resource, NodeKind::Principal, READ_COLOR),
        EdgeDirection::Write => (NodeKind::Principal, NodeKind::Resource, WRITE_COLOR),
    };

    format!(
        "  {} -> {} [color={}];\n",
        node_id(from_kind, &edge.from),
        node_id(to_kind, &edge.to),
        color
    )
}

fn html_label(label: &NodeLabel) -> String {
    let mut rows = vec![format!(
        "<tr><td href=\"{}\" tooltip=\"Zoom\" align=\"center\" colspan=\"2\">{}</td></tr>",
        escape_html(&label.zoom_link),
        escape_html(&label.name)
    )];

    if let Some(schema) = &label.schema {
        rows.push(affordance_row(schema, "Schema"));
    }
    rows.push(affordance_row(&label.contact, "Contact"));
    if let Some(warning) = &label.warning {
        rows.push(affordance_row(warning, &warning.tooltip));
    }

    format!(
        "<table border=\"0\" cellborder=\"0\" cellspacing=\"5\">{}</table>",
        rows.concat()
    )
}

fn affordance_row(affordance: &Affordance, text: &str) -> String {
    let href = affordance
        .href
        .as_deref()
        .map(|h| format!(" href=\"{}\"", escape_html(h)))
        .unwrap_or_default();

    format!(
        "<tr><td{} tooltip=\"{}\" align=\"right\"><img src=\"{}\"/></td><td align=\"left\">{}</td></tr>",
        href,
        escape_html(&affordance.tooltip),
        escape_html(&affordance.icon),
        escape_html(text)
    )
}

/// Quote a DOT id
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Escape text for a Graphviz HTML-like label
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
