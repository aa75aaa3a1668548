//! ACL entries and search filtering
//!
//! Turns the flat list of Kafka ACL entries into the subset that should be
//! drawn, tagging each surviving entry with the reason it matched.
//!
//! ## Search Model
//!
//! A search is made of three optional regex patterns:
//!
//! - `include` - keep entries whose principal or resource contains a match
//! - `exclude_user` - drop entries whose principal contains a match
//! - `exclude_resource` - drop entries whose resource contains a match
//!
//! Patterns use search semantics (a match anywhere in the string), not full
//! matches. An empty pattern is "not set". The principal is tested before the
//! resource, so an entry matching on both sides is a principal match.
//!
//! ```text
//! entries → classify(include) → drop NoMatch → drop excluded → ClassifiedEntry
//! ```

pub mod filter;
pub mod patterns;
pub mod types;

pub use filter::{ClassifiedEntry, classify, filter, is_excluded};
pub use patterns::{SearchConditions, SearchPattern};
pub use types::{AclEntry, MatchClass, Permission, SearchRequest};
