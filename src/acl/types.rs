//! ACL types
//!
//! Core types shared by the filter and the graph builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission granted by an ACL entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Consume from the resource
    Read,
    /// Produce to the resource
    Write,
    /// Both consume and produce
    ReadWrite,
}

impl Permission {
    /// Get the permission name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::ReadWrite => "readwrite",
        }
    }

    /// Try to parse a permission from its wire name
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Some(Permission::Read),
            "write" => Some(Permission::Write),
            "readwrite" => Some(Permission::ReadWrite),
            _ => None,
        }
    }

    /// Parse a wire name, treating unknown values as `ReadWrite`
    ///
    /// Unknown or legacy values (e.g. `admin`) grant both directions so that
    /// an access grant is never hidden from the graph.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Permission::ReadWrite)
    }

    /// Whether the principal may consume from the resource
    pub const fn grants_read(&self) -> bool {
        matches!(self, Permission::Read | Permission::ReadWrite)
    }

    /// Whether the principal may produce to the resource
    pub const fn grants_write(&self) -> bool {
        matches!(self, Permission::Write | Permission::ReadWrite)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single binding of a principal to a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
    /// Identity side (service user)
    pub principal: String,
    /// Asset side (topic)
    pub resource: String,
    pub permission: Permission,
}

impl AclEntry {
    pub fn new(
        principal: impl Into<String>,
        resource: impl Into<String>,
        permission: Permission,
    ) -> Self {
        Self {
            principal: principal.into(),
            resource: resource.into(),
            permission,
        }
    }
}

/// Why an entry satisfied (or failed) the include pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// No include pattern was given
    All,
    /// The include pattern matched the principal
    PrincipalMatch,
    /// The include pattern matched the resource (and not the principal)
    ResourceMatch,
    /// The include pattern matched neither side
    NoMatch,
}

impl MatchClass {
    /// Whether the entry survives the inclusion step
    pub const fn is_included(&self) -> bool {
        !matches!(self, MatchClass::NoMatch)
    }

    /// Whether the principal was the field that matched the search
    pub const fn highlights_principal(&self) -> bool {
        matches!(self, MatchClass::PrincipalMatch)
    }

    /// Whether the resource was the field that matched the search
    pub const fn highlights_resource(&self) -> bool {
        matches!(self, MatchClass::ResourceMatch)
    }
}

/// Caller-facing search request
///
/// All three patterns are optional and default to empty (no filtering).
/// Field names follow the query-string names used by the HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchRequest {
    pub include_pattern: String,
    pub exclude_user_pattern: String,
    #[serde(alias = "exclude-topic-pattern")]
    pub exclude_resource_pattern: String,
}

impl SearchRequest {
    /// Request that only sets the include pattern
    pub fn including(pattern: impl Into<String>) -> Self {
        Self {
            include_pattern: pattern.into(),
            ..Default::default()
        }
    }
}
