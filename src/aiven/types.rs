//! Aiven API wire types

use crate::acl::{AclEntry, Permission};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

/// Response of `GET /project/{project}/service/{service}/acl`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AclListResponse {
    pub acl: Vec<AivenAcl>,
}

/// A Kafka ACL record as returned by Aiven
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AivenAcl {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub topic: String,
    pub permission: String,
}

impl AivenAcl {
    /// Convert to an entry, granting both directions for unknown permissions
    pub fn into_entry(self) -> AclEntry {
        let permission = Permission::try_parse(&self.permission).unwrap_or_else(|| {
            warn!(
                username = %self.username,
                topic = %self.topic,
                permission = %self.permission,
                "Unknown ACL permission, treating as readwrite"
            );
            Permission::ReadWrite
        });

        AclEntry {
            principal: self.username,
            resource: self.topic,
            permission,
        }
    }
}

/// Response of the schema registry version listing
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaVersions {
    #[serde(default)]
    pub versions: Vec<u64>,
}

impl SchemaVersions {
    pub fn latest(&self) -> Option<u64> {
        self.versions.iter().copied().max()
    }
}

/// Latest schema of a resource, or the marker that none is registered
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDocument {
    Defined(Value),
    Missing,
}

impl SchemaDocument {
    pub fn is_missing(&self) -> bool {
        matches!(self, SchemaDocument::Missing)
    }

    /// JSON body served to clients
    pub fn to_json(&self) -> Value {
        match self {
            SchemaDocument::Defined(value) => value.clone(),
            SchemaDocument::Missing => json!({ "error": "No schema defined!" }),
        }
    }
}

/// An ACL document as stored on disk: the `/acl` response or a bare list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AclDocument {
    Response(AclListResponse),
    List(Vec<AivenAcl>),
}

/// Parse an ACL document into entries
pub fn parse_acl_document(json: &str) -> Result<Vec<AclEntry>, serde_json::Error> {
    let records = match serde_json::from_str::<AclDocument>(json)? {
        AclDocument::Response(response) => response.acl,
        AclDocument::List(list) => list,
    };
    Ok(records.into_iter().map(AivenAcl::into_entry).collect())
}
