//! Pattern matching for search conditions
//!
//! Provides regex-based search patterns for include/exclude rules.

use crate::acl::types::SearchRequest;
use crate::error::ConfigError;
use regex::Regex;

/// Compiled search pattern
///
/// An empty source string compiles to an unset pattern, which never matches.
#[derive(Debug, Clone, Default)]
pub struct SearchPattern {
    compiled: Option<CompiledPattern>,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl SearchPattern {
    /// Compile a pattern, naming the field it came from in the error
    pub fn new(pattern: &str, field: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Ok(Self::empty());
        }

        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: format!("in {}: {}", field, e),
        })?;

        Ok(Self {
            compiled: Some(CompiledPattern {
                source: pattern.to_string(),
                regex,
            }),
        })
    }

    /// Create an unset pattern (matches nothing)
    pub fn empty() -> Self {
        Self { compiled: None }
    }

    /// Check whether the pattern occurs anywhere in `value`
    pub fn matches(&self, value: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|p| p.regex.is_match(value))
    }

    /// Check if this pattern is unset
    pub fn is_empty(&self) -> bool {
        self.compiled.is_none()
    }

    /// Get the pattern source, empty when unset
    pub fn as_str(&self) -> &str {
        self.compiled
            .as_ref()
            .map(|p| p.source.as_str())
            .unwrap_or_default()
    }
}

/// The three compiled patterns of a search
#[derive(Debug, Clone, Default)]
pub struct SearchConditions {
    pub include: SearchPattern,
    pub exclude_user: SearchPattern,
    pub exclude_resource: SearchPattern,
}

impl SearchConditions {
    /// Compile every pattern of a request
    ///
    /// Fails on the first malformed pattern, before any entry is looked at.
    pub fn compile(request: &SearchRequest) -> Result<Self, ConfigError> {
        Ok(Self {
            include: SearchPattern::new(&request.include_pattern, "include-pattern")?,
            exclude_user: SearchPattern::new(
                &request.exclude_user_pattern,
                "exclude-user-pattern",
            )?,
            exclude_resource: SearchPattern::new(
                &request.exclude_resource_pattern,
                "exclude-resource-pattern",
            )?,
        })
    }

    /// Conditions that keep every entry
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Whether neither exclusion pattern is set
    pub fn excludes_nothing(&self) -> bool {
        self.exclude_user.is_empty() && self.exclude_resource.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern() {
        let pattern = SearchPattern::new("", "include-pattern").unwrap();
        assert!(pattern.is_empty());
        assert!(!pattern.matches("anything"));
        assert_eq!(pattern.as_str(), "");
    }

    #[test]
    fn test_search_not_full_match() {
        let pattern = SearchPattern::new("orders", "include-pattern").unwrap();
        assert!(pattern.matches("orders_v1"));
        assert!(pattern.matches("svc-orders-reader"));
        assert!(!pattern.matches("payments"));
    }

    #[test]
    fn test_anchored_pattern() {
        let pattern = SearchPattern::new("^svc-", "exclude-user-pattern").unwrap();
        assert!(pattern.matches("svc-reader"));
        assert!(!pattern.matches("my-svc-reader"));
        assert_eq!(pattern.as_str(), "^svc-");
    }

    #[test]
    fn test_invalid_pattern_names_field() {
        let result = SearchPattern::new("[invalid", "exclude-resource-pattern");
        match result.unwrap_err() {
            ConfigError::InvalidPattern { pattern, reason } => {
                assert_eq!(pattern, "[invalid");
                assert!(reason.contains("exclude-resource-pattern"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compile_fails_on_any_field() {
        let request = SearchRequest {
            include_pattern: "alice".into(),
            exclude_user_pattern: "(".into(),
            exclude_resource_pattern: String::new(),
        };
        assert!(matches!(
            SearchConditions::compile(&request),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_match_all() {
        let conditions = SearchConditions::match_all();
        assert!(conditions.include.is_empty());
        assert!(conditions.excludes_nothing());
    }
}
