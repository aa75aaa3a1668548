//! HTTP server
//!
//! Serves the rendered graph, schema downloads, a status probe, the OpenAPI
//! document and the icons referenced from node labels.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::aiven::AclSource;
use crate::config::ServerConfig;
use crate::label::{GRAPH_PATH, UrlLinkBuilder};
use crate::render::GraphRenderer;
use crate::util::find_available_addr;
use axum::{Router, routing::get};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for route handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AclSource>,
    pub renderer: Arc<dyn GraphRenderer>,
    pub links: UrlLinkBuilder,
}

impl AppState {
    pub fn new(
        source: Arc<dyn AclSource>,
        renderer: Arc<dyn GraphRenderer>,
        links: UrlLinkBuilder,
    ) -> Self {
        Self {
            source,
            renderer,
            links,
        }
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GRAPH_PATH, get(handlers::graph_image))
        .route("/api/v1/{topic}", get(handlers::topic_schema))
        .route("/internal/status", get(handlers::status))
        .route("/internal/swagger.yaml", get(handlers::swagger))
        .route("/static/{file}", get(handlers::static_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "127.0.0.1:8080")
    pub bind: SocketAddr,
    /// Externally visible base URL, if different from the bind address
    pub public_url: Option<String>,
}

impl HttpConfig {
    /// Create config from host and port strings
    pub fn from_host_port(host: &str, port: u16) -> Result<Self, std::net::AddrParseError> {
        let ip: IpAddr = host.parse()?;
        Ok(Self {
            bind: SocketAddr::new(ip, port),
            public_url: None,
        })
    }

    pub fn from_server_config(config: &ServerConfig) -> Result<Self, std::net::AddrParseError> {
        let mut http = Self::from_host_port(&config.host, config.port)?;
        http.public_url = config.public_url.clone();
        Ok(http)
    }

    /// Base URL for label links once the actual port is known
    fn base_url(&self, port: u16) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}", SocketAddr::new(self.bind.ip(), port)),
        }
    }
}

/// Start the HTTP server in the background
///
/// Port discovery is used to find an available port if the configured port is
/// taken. Returns the bound address and a token that stops the server.
pub async fn run_server(
    source: Arc<dyn AclSource>,
    renderer: Arc<dyn GraphRenderer>,
    config: HttpConfig,
) -> anyhow::Result<(SocketAddr, CancellationToken)> {
    let bind_addr = find_available_addr(config.bind).await?;

    let links = UrlLinkBuilder::new(config.base_url(bind_addr.port()));
    info!(base_url = links.base_url(), "Graph links configured");
    let app = router(AppState::new(source, renderer, links));

    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", local_addr);

    let ct = CancellationToken::new();
    let shutdown = ct.clone();
    tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        if let Err(e) = result {
            error!(error = %e, "HTTP server error");
        }
    });

    Ok((local_addr, ct))
}

/// Run the HTTP server and wait for Ctrl+C
pub async fn run_server_blocking(
    source: Arc<dyn AclSource>,
    renderer: Arc<dyn GraphRenderer>,
    config: HttpConfig,
) -> anyhow::Result<()> {
    let (_, ct) = run_server(source, renderer, config).await?;

    info!("Press Ctrl+C to stop the server");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        _ = ct.cancelled() => {
            info!("Server cancelled");
        }
    }

    ct.cancel();

    info!("HTTP server stopped");
    Ok(())
}
