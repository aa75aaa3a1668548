//! Authentication module
//!
//! Provides the `Authorization` header for Aiven API requests.

pub mod provider;
pub mod token;

pub use provider::{AuthHeader, AuthProvider, BoxedAuthProvider};
pub use token::TokenProvider;

use crate::config::AivenConfig;
use crate::error::AuthError;

/// Create an auth provider from configuration
pub fn create_auth_provider(config: &AivenConfig) -> Result<BoxedAuthProvider, AuthError> {
    match &config.token {
        Some(token) => Ok(Box::new(TokenProvider::new(
            token.clone(),
            config.token_scheme,
        )?)),
        None => Ok(Box::new(TokenProvider::from_env(config.token_scheme)?)),
    }
}
