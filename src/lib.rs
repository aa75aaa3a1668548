//! Kafka ACL Graph
//!
//! Renders the Kafka ACLs of an Aiven service as a directed graph of
//! principals and topics.
//!
//! ## Features
//!
//! - **Search** with include, exclude-user and exclude-topic regex patterns
//! - **Annotations** for duplicate topic version families and wildcard principals
//! - **Clickable labels** that zoom into a node or download a topic's schema
//! - **Two entry points** - an HTTP server and a `render` command for files
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Pipeline
//!
//! ```text
//! AclSource → filter → build → annotate → prepare labels → GraphRenderer
//! ```
//!
//! Read permissions become `topic → principal` edges, write permissions
//! `principal → topic` edges.
//!
//! ## Example Configuration
//!
//! ```toml
//! [aiven]
//! project = "data"
//! service = "kafka-prod"
//! # token from AIVEN_API_TOKEN env var
//!
//! [server]
//! port = 8080
//! public_url = "https://acl.example.com"
//!
//! [cache]
//! ttl_secs = 600
//! ```

pub mod acl;
pub mod aiven;
pub mod auth;
pub mod config;
pub mod error;
pub mod graph;
pub mod label;
pub mod render;
pub mod server;
pub mod util;

// Re-export main types
pub use acl::{AclEntry, Permission, SearchRequest};
pub use config::{AppConfig, load_config};
pub use error::AppError;
pub use graph::{Graph, generate};
