//! Authentication provider trait

use crate::error::AuthError;
use crate::util::SecretString;
// async_trait required for dyn-compatibility with Box<dyn AuthProvider>
use async_trait::async_trait;

/// Supplies credentials for Aiven API requests
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get the header to attach to each request
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError>;

    /// Get a description of the auth method (for logging)
    fn auth_type(&self) -> &'static str;
}

/// Authentication header to use with requests
#[derive(Debug, Clone)]
pub enum AuthHeader {
    /// Aiven's native token scheme
    AivenV1(SecretString),
    /// Bearer token
    Bearer(SecretString),
}

impl AuthHeader {
    /// Get the header name for this auth type
    pub fn header_name(&self) -> &'static str {
        "Authorization"
    }

    /// Get the header value for this auth type
    pub fn header_value(&self) -> String {
        match self {
            AuthHeader::AivenV1(token) => format!("aivenv1 {}", token.expose_secret()),
            AuthHeader::Bearer(token) => format!("Bearer {}", token.expose_secret()),
        }
    }
}

/// Box type alias for auth providers
pub type BoxedAuthProvider = Box<dyn AuthProvider>;
