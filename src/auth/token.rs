//! API token authentication

use crate::auth::provider::{AuthHeader, AuthProvider};
use crate::config::TokenScheme;
use crate::error::AuthError;
use crate::util::SecretString;
use async_trait::async_trait;

/// Environment variable holding the Aiven API token
pub const TOKEN_ENV_VAR: &str = "AIVEN_API_TOKEN";

/// Static API token provider
#[derive(Debug, Clone)]
pub struct TokenProvider {
    token: SecretString,
    scheme: TokenScheme,
}

impl TokenProvider {
    pub fn new(token: SecretString, scheme: TokenScheme) -> Result<Self, AuthError> {
        if token.expose_secret().trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(Self { token, scheme })
    }

    /// Create from the `AIVEN_API_TOKEN` environment variable
    pub fn from_env(scheme: TokenScheme) -> Result<Self, AuthError> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => Self::new(SecretString::new(token), scheme),
            _ => Err(AuthError::NotConfigured),
        }
    }
}

#[async_trait]
impl AuthProvider for TokenProvider {
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError> {
        Ok(match self.scheme {
            TokenScheme::AivenV1 => AuthHeader::AivenV1(self.token.clone()),
            TokenScheme::Bearer => AuthHeader::Bearer(self.token.clone()),
        })
    }

    fn auth_type(&self) -> &'static str {
        match self.scheme {
            TokenScheme::AivenV1 => "aivenv1 token",
            TokenScheme::Bearer => "bearer token",
        }
    }
}
