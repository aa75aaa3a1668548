//! Label preparation
//!
//! Builds the per-node display payload handed to the renderer: display name,
//! zoom and schema links, icon URLs, the contact and warning affordances, and
//! the emphasis tier.

pub mod links;
pub mod payload;

pub use links::{GRAPH_PATH, LinkBuilder, SCHEMA_PATH_PREFIX, UrlLinkBuilder};
pub use payload::{Affordance, Emphasis, NodeLabel, prepare_label, prepare_labels};
