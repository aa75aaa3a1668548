//! ACL source abstraction

use crate::acl::AclEntry;
use crate::aiven::types::{SchemaDocument, parse_acl_document};
use crate::error::AivenResult;
// async_trait required for dyn-compatibility with Arc<dyn AclSource>
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Supplies ACL entries and schema documents
#[async_trait]
pub trait AclSource: Send + Sync {
    /// Fetch every ACL entry of the service
    async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>>;

    /// Fetch the latest value schema registered for a resource
    async fn fetch_latest_schema(&self, resource: &str) -> AivenResult<SchemaDocument>;
}

#[async_trait]
impl<S: AclSource + ?Sized> AclSource for Arc<S> {
    async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>> {
        (**self).fetch_entries().await
    }

    async fn fetch_latest_schema(&self, resource: &str) -> AivenResult<SchemaDocument> {
        (**self).fetch_latest_schema(resource).await
    }
}

/// Source serving a fixed set of entries, e.g. loaded from a file
#[derive(Debug, Clone, Default)]
pub struct StaticAclSource {
    entries: Arc<[AclEntry]>,
    schemas: HashMap<String, Value>,
}

impl StaticAclSource {
    pub fn new(entries: Vec<AclEntry>) -> Self {
        Self {
            entries: entries.into(),
            schemas: HashMap::new(),
        }
    }

    /// Parse an ACL document in the Aiven `/acl` shape
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(parse_acl_document(json)?))
    }

    /// Register a schema for a resource
    pub fn with_schema(mut self, resource: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(resource.into(), schema);
        self
    }
}

#[async_trait]
impl AclSource for StaticAclSource {
    async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>> {
        Ok(Arc::clone(&self.entries))
    }

    async fn fetch_latest_schema(&self, resource: &str) -> AivenResult<SchemaDocument> {
        Ok(self
            .schemas
            .get(resource)
            .cloned()
            .map_or(SchemaDocument::Missing, SchemaDocument::Defined))
    }
}
