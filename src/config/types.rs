//! Configuration types for kafka-acl-graph
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Aiven connection settings
    pub aiven: AivenConfig,

    /// Caching policy for data fetched from Aiven
    pub cache: CacheConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Graphviz settings
    pub renderer: RendererConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Aiven connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AivenConfig {
    /// Aiven API root (e.g., `https://api.aiven.io/v1`)
    pub url: String,

    /// Aiven project name
    pub project: String,

    /// Kafka service name within the project
    pub service: String,

    /// API token (prefer env var AIVEN_API_TOKEN)
    pub token: Option<SecretString>,

    /// Authorization scheme used with the token
    pub token_scheme: TokenScheme,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries for failed requests
    pub max_retries: u32,
}

impl Default for AivenConfig {
    fn default() -> Self {
        Self {
            url: "https://api.aiven.io/v1".to_string(),
            project: String::new(),
            service: String::new(),
            token: None,
            token_scheme: TokenScheme::AivenV1,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl AivenConfig {
    /// Get the base URL of the configured Kafka service
    pub fn service_url(&self) -> String {
        format!(
            "{}/project/{}/service/{}",
            self.url.trim_end_matches('/'),
            urlencoding::encode(&self.project),
            urlencoding::encode(&self.service)
        )
    }
}

/// Authorization header scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScheme {
    /// `Authorization: aivenv1 <token>`
    #[default]
    AivenV1,
    /// `Authorization: Bearer <token>`
    Bearer,
}

/// Cache policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of cached ACLs and schemas, in seconds (0 disables caching)
    pub ttl_secs: u64,

    /// Maximum number of schema documents kept
    pub max_schemas: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 600,
            max_schemas: 100,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Externally visible base URL used in graph links
    /// (defaults to `http://host:port`)
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// Base URL for links embedded in the graph
    pub fn base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

/// Graphviz renderer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Graphviz executable
    pub command: String,

    /// Image format to produce
    pub format: OutputFormat,

    /// Directory for intermediate files
    pub work_dir: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "dot".to_string(),
            format: OutputFormat::Svg,
            work_dir: std::env::temp_dir(),
        }
    }
}

/// Image format produced by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    /// File extension and Graphviz `-T` argument
    pub const fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "image/svg+xml; charset=utf-8",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
