//! Entry classification and filtering

use crate::acl::patterns::{SearchConditions, SearchPattern};
use crate::acl::types::{AclEntry, MatchClass};
use tracing::debug;

/// An entry tagged with its match class
///
/// Borrows the entry, so classifying never touches the caller's copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedEntry<'a> {
    pub entry: &'a AclEntry,
    pub class: MatchClass,
}

/// Classify one entry against the include pattern
///
/// The principal is tested first, so it wins when both sides match.
pub fn classify(entry: &AclEntry, include: &SearchPattern) -> MatchClass {
    if include.is_empty() {
        MatchClass::All
    } else if include.matches(&entry.principal) {
        MatchClass::PrincipalMatch
    } else if include.matches(&entry.resource) {
        MatchClass::ResourceMatch
    } else {
        MatchClass::NoMatch
    }
}

/// Check the exclusion patterns, independently of inclusion
pub fn is_excluded(entry: &AclEntry, conditions: &SearchConditions) -> bool {
    conditions.exclude_user.matches(&entry.principal)
        || conditions.exclude_resource.matches(&entry.resource)
}

/// Keep the entries to visualise, in input order
pub fn filter<'a>(
    entries: &'a [AclEntry],
    conditions: &SearchConditions,
) -> Vec<ClassifiedEntry<'a>> {
    let kept: Vec<_> = entries
        .iter()
        .map(|entry| ClassifiedEntry {
            entry,
            class: classify(entry, &conditions.include),
        })
        .filter(|c| c.class.is_included())
        .filter(|c| !is_excluded(c.entry, conditions))
        .collect();

    debug!(
        total = entries.len(),
        kept = kept.len(),
        include = conditions.include.as_str(),
        exclude_user = conditions.exclude_user.as_str(),
        exclude_resource = conditions.exclude_resource.as_str(),
        "Filtered ACL entries"
    );

    kept
}
