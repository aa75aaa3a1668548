//! Aiven ACL source
//!
//! Fetches Kafka ACLs and schema registry documents from the Aiven API and
//! caches them with an explicit TTL policy.

pub mod cache;
pub mod client;
pub mod source;
pub mod types;

pub use cache::CachedAclSource;
pub use client::AivenClient;
pub use source::{AclSource, StaticAclSource};
pub use types::{AivenAcl, SchemaDocument, parse_acl_document};
