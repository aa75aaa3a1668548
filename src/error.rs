//! Error types for kafka-acl-graph
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API,
//! and convert to HTTP responses at the server boundary.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Aiven API error: {0}")]
    Aiven(#[from] AivenError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

/// Aiven API specific errors
#[derive(Error, Debug)]
pub enum AivenError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Aiven API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized: invalid or expired token")]
    Unauthorized,

    #[error("Forbidden: token lacks access to {action}")]
    Forbidden { action: String },

    #[error("Invalid response from Aiven: {0}")]
    InvalidResponse(String),
}

impl AivenError {
    /// Create an appropriate error from an HTTP status code and response body
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => AivenError::Unauthorized,
            403 => AivenError::Forbidden {
                action: "this service".into(),
            },
            404 => AivenError::NotFound {
                resource: "requested resource".into(),
            },
            429 => AivenError::RateLimited { retry_after: 60 },
            _ => AivenError::Api {
                status,
                message: if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                },
            },
        }
    }

    /// Whether the error signals that the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, AivenError::NotFound { .. })
    }
}

/// Errors raised while turning a graph into an image
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start renderer '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("Renderer exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No authentication configured")]
    NotConfigured,

    #[error("Invalid token format")]
    InvalidToken,
}

/// Result type alias for Aiven API operations
pub type AivenResult<T> = std::result::Result<T, AivenError>;

/// Result type alias for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;
