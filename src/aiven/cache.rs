//! Time-to-live cache in front of an ACL source
//!
//! Holds one ACL list and up to `max_schemas` schema documents. Entries older
//! than the TTL are refetched on the next request. A zero TTL disables caching.

use crate::acl::AclEntry;
use crate::aiven::source::AclSource;
use crate::aiven::types::SchemaDocument;
use crate::config::CacheConfig;
use crate::error::AivenResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, trace};

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Cached<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Caching wrapper around any [`AclSource`]
pub struct CachedAclSource<S> {
    inner: S,
    ttl: Duration,
    max_schemas: usize,
    entries: RwLock<Option<Cached<Arc<[AclEntry]>>>>,
    schemas: RwLock<HashMap<String, Cached<SchemaDocument>>>,
}

impl<S: AclSource> CachedAclSource<S> {
    pub fn new(inner: S, ttl: Duration, max_schemas: usize) -> Self {
        Self {
            inner,
            ttl,
            max_schemas,
            entries: RwLock::new(None),
            schemas: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(inner: S, config: &CacheConfig) -> Self {
        Self::new(inner, Duration::from_secs(config.ttl_secs), config.max_schemas)
    }

    /// Drop everything cached
    pub async fn invalidate(&self) {
        *self.entries.write().await = None;
        self.schemas.write().await.clear();
    }

    pub async fn cached_schema_count(&self) -> usize {
        self.schemas.read().await.len()
    }

    fn store_schema(
        &self,
        schemas: &mut HashMap<String, Cached<SchemaDocument>>,
        resource: &str,
        document: SchemaDocument,
    ) {
        if self.max_schemas == 0 {
            return;
        }

        if !schemas.contains_key(resource) && schemas.len() >= self.max_schemas {
            let ttl = self.ttl;
            schemas.retain(|_, cached| cached.is_fresh(ttl));
        }
        if !schemas.contains_key(resource) && schemas.len() >= self.max_schemas {
            let oldest = schemas
                .iter()
                .min_by_key(|(_, cached)| cached.fetched_at)
                .map(|(name, _)| name.clone());
            if let Some(oldest) = oldest {
                trace!(resource = %oldest, "Evicting cached schema");
                schemas.remove(&oldest);
            }
        }

        schemas.insert(resource.to_string(), Cached::new(document));
    }
}

#[async_trait]
impl<S: AclSource> AclSource for CachedAclSource<S> {
    async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>> {
        if let Some(cached) = self.entries.read().await.as_ref()
            && cached.is_fresh(self.ttl)
        {
            debug!(entries = cached.value.len(), "Using cached ACLs");
            return Ok(Arc::clone(&cached.value));
        }

        let entries = self.inner.fetch_entries().await?;
        if !self.ttl.is_zero() {
            *self.entries.write().await = Some(Cached::new(Arc::clone(&entries)));
        }
        Ok(entries)
    }

    async fn fetch_latest_schema(&self, resource: &str) -> AivenResult<SchemaDocument> {
        if let Some(cached) = self.schemas.read().await.get(resource)
            && cached.is_fresh(self.ttl)
        {
            debug!(resource, "Using cached schema");
            return Ok(cached.value.clone());
        }

        let document = self.inner.fetch_latest_schema(resource).await?;
        if !self.ttl.is_zero() {
            let mut schemas = self.schemas.write().await;
            self.store_schema(&mut schemas, resource, document.clone());
        }
        Ok(document)
    }
}
