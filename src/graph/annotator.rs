//! Data-quality annotations
//!
//! Two independent checks, run in a fixed order:
//!
//! 1. Resources whose names differ only by a `_v<token>` suffix are flagged as
//!    a duplicate version family. This is a heuristic for human review.
//! 2. Principals whose names contain `*` are flagged as wildcard principals.

use crate::graph::types::GraphNode;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Problem attached to resources sharing a version family
pub const DUPLICATE_VERSION_FAMILY: &str = "duplicate version family";

/// Problem attached to principals containing a wildcard
pub const WILDCARD_PRINCIPAL: &str = "wildcard principal name";

const VERSION_MARKER: &str = "_v";
const WILDCARD: char = '*';

/// Strip the version suffix, splitting on the first `_v`
pub fn version_family(name: &str) -> &str {
    name.split_once(VERSION_MARKER)
        .map_or(name, |(family, _)| family)
}

/// Families that more than one distinct resource name belongs to
pub fn duplicated_families<'a, I>(names: I) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut members: HashMap<&str, HashSet<&str>> = HashMap::new();
    for name in names {
        members.entry(version_family(name)).or_default().insert(name);
    }

    members
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(family, _)| family)
        .collect()
}

/// Annotate nodes, returning a fresh collection
///
/// Problems are only ever appended; existing ones are kept.
pub fn annotate(nodes: Vec<GraphNode>) -> Vec<GraphNode> {
    let duplicated: HashSet<String> = duplicated_families(
        nodes
            .iter()
            .filter(|n| n.is_resource())
            .map(|n| n.name.as_str()),
    )
    .into_iter()
    .map(str::to_owned)
    .collect();

    let annotated: Vec<GraphNode> = nodes
        .into_iter()
        .map(|mut node| {
            if node.is_resource() && duplicated.contains(version_family(&node.name)) {
                node.problems.push(DUPLICATE_VERSION_FAMILY.to_string());
            }
            if node.is_principal() && node.name.contains(WILDCARD) {
                node.problems.push(WILDCARD_PRINCIPAL.to_string());
            }
            node
        })
        .collect();

    debug!(
        duplicated_families = duplicated.len(),
        flagged = annotated.iter().filter(|n| n.has_problems()).count(),
        "Annotated ACL graph"
    );

    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::NodeKind;

    fn resource(name: &str) -> GraphNode {
        GraphNode::new(name, NodeKind::Resource)
    }

    fn principal(name: &str) -> GraphNode {
        GraphNode::new(name, NodeKind::Principal)
    }

    #[test]
    fn test_version_family_splits_on_first_marker() {
        assert_eq!(version_family("orders_v1"), "orders");
        assert_eq!(version_family("orders_v1_v2"), "orders");
        assert_eq!(version_family("user_visits_v3"), "user");
        assert_eq!(version_family("orders"), "orders");
    }

    #[test]
    fn test_duplicate_family_flags_all_members() {
        let nodes = annotate(vec![resource("orders_v1"), resource("orders_v2")]);
        assert!(
            nodes
                .iter()
                .all(|n| n.problems == vec![DUPLICATE_VERSION_FAMILY.to_string()])
        );
    }

    #[test]
    fn test_single_version_not_flagged() {
        let nodes = annotate(vec![resource("orders_v1"), resource("payments_v1")]);
        assert!(nodes.iter().all(|n| n.problems.is_empty()));
    }

    #[test]
    fn test_unversioned_name_joins_family() {
        let nodes = annotate(vec![resource("orders"), resource("orders_v2")]);
        assert!(nodes.iter().all(|n| n.has_problems()));
    }

    #[test]
    fn test_principals_ignored_by_family_check() {
        let nodes = annotate(vec![principal("orders_v1"), resource("orders_v2")]);
        assert!(nodes.iter().all(|n| n.problems.is_empty()));
    }

    #[test]
    fn test_wildcard_principal() {
        let nodes = annotate(vec![principal("svc-*-reader"), principal("svc-reader")]);
        assert_eq!(nodes[0].problems, vec![WILDCARD_PRINCIPAL.to_string()]);
        assert!(nodes[1].problems.is_empty());
    }

    #[test]
    fn test_wildcard_resource_not_flagged() {
        let nodes = annotate(vec![resource("orders-*")]);
        assert!(nodes[0].problems.is_empty());
    }

    #[test]
    fn test_existing_problems_kept() {
        let mut node = principal("svc-*");
        node.problems.push("earlier".to_string());
        let nodes = annotate(vec![node]);
        assert_eq!(
            nodes[0].problems,
            vec!["earlier".to_string(), WILDCARD_PRINCIPAL.to_string()]
        );
    }
}
