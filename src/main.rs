//! Kafka ACL Graph
//!
//! Serves or renders the Kafka ACL graph of an Aiven service.

use clap::{Parser, Subcommand};
use kafka_acl_graph::{
    acl::{SearchConditions, SearchRequest},
    aiven::{AclSource, AivenClient, CachedAclSource, StaticAclSource},
    auth::create_auth_provider,
    config::{AppConfig, LogFormat, load_config},
    graph::generate_with,
    label::UrlLinkBuilder,
    render::{GraphRenderer, GraphvizRenderer, RenderInput, write_dot},
    server::{HttpConfig, run_server_blocking},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Kafka ACL Graph - visualise who reads and writes which topics
#[derive(Parser, Debug)]
#[command(name = "kafka-acl-graph")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "KAFKA_ACL_GRAPH_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "KAFKA_ACL_GRAPH_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// HTTP server host (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// HTTP server port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,

        /// Serve ACLs from a JSON file instead of the Aiven API
        #[arg(long)]
        acl_file: Option<PathBuf>,
    },

    /// Render the graph to a file
    Render {
        /// Regex selecting principals and topics to draw
        #[arg(long, default_value = "")]
        include_pattern: String,

        /// Regex of principals to leave out
        #[arg(long, default_value = "")]
        exclude_user_pattern: String,

        /// Regex of topics to leave out
        #[arg(long, alias = "exclude-topic-pattern", default_value = "")]
        exclude_resource_pattern: String,

        /// Read ACLs from a JSON file instead of the Aiven API
        #[arg(long)]
        acl_file: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "graph.svg")]
        output: PathBuf,

        /// Write the DOT source instead of running Graphviz
        #[arg(long)]
        dot_only: bool,
    },
}

impl Command {
    fn acl_file(&self) -> Option<&Path> {
        match self {
            Command::Serve { acl_file, .. } | Command::Render { acl_file, .. } => {
                acl_file.as_deref()
            }
        }
    }
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Build the ACL source: a file when given, the Aiven API otherwise
async fn create_source(
    config: &AppConfig,
    acl_file: Option<&Path>,
) -> anyhow::Result<Arc<dyn AclSource>> {
    if let Some(path) = acl_file {
        let json = tokio::fs::read_to_string(path).await?;
        let source = StaticAclSource::from_json(&json)
            .inspect_err(|e| error!(path = %path.display(), error = %e, "Invalid ACL file"))?;
        info!(path = %path.display(), "Using ACLs from file");
        return Ok(Arc::new(source));
    }

    let auth = create_auth_provider(&config.aiven)
        .inspect_err(|e| error!(error = %e, "Failed to create auth provider"))?;
    let client = AivenClient::new(&config.aiven, auth)
        .inspect_err(|e| error!(error = %e, "Failed to create Aiven client"))?;

    Ok(Arc::new(CachedAclSource::from_config(client, &config.cache)))
}

async fn render(
    config: &AppConfig,
    source: Arc<dyn AclSource>,
    request: SearchRequest,
    output: &Path,
    dot_only: bool,
) -> anyhow::Result<()> {
    // Compile patterns before fetching anything
    let conditions = SearchConditions::compile(&request)
        .inspect_err(|e| error!(error = %e, "Invalid search pattern"))?;

    let entries = source.fetch_entries().await?;
    let graph = generate_with(&entries, &conditions);
    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Generated graph"
    );

    let links = UrlLinkBuilder::new(config.server.base_url());
    let input = RenderInput::new(graph, &links);

    if dot_only {
        tokio::fs::write(output, write_dot(&input)).await?;
    } else {
        let renderer = GraphvizRenderer::new(&config.renderer);
        let rendered = renderer.render(&input).await?;
        let written = tokio::fs::write(output, &rendered.bytes).await;
        rendered.artifact.dispose().await;
        written?;
    }

    info!(output = %output.display(), "Wrote graph");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading the environment
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Credentials are only needed when talking to Aiven
    let require_aiven = args.command.acl_file().is_none();
    let mut config = load_config(args.config.as_deref(), require_aiven)?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting kafka-acl-graph"
    );

    let source = create_source(&config, args.command.acl_file()).await?;

    match args.command {
        Command::Serve { host, port, .. } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let http_config = HttpConfig::from_server_config(&config.server)?;
            let renderer: Arc<dyn GraphRenderer> =
                Arc::new(GraphvizRenderer::new(&config.renderer));

            run_server_blocking(source, renderer, http_config).await?;
        }
        Command::Render {
            include_pattern,
            exclude_user_pattern,
            exclude_resource_pattern,
            output,
            dot_only,
            ..
        } => {
            let request = SearchRequest {
                include_pattern,
                exclude_user_pattern,
                exclude_resource_pattern,
            };
            render(&config, source, request, &output, dot_only).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kafka_acl_graph::acl::AclEntry;
    use kafka_acl_graph::aiven::SchemaDocument;
    use kafka_acl_graph::error::{AivenError, AivenResult, ConfigError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source counting how often it is asked for entries
    #[derive(Default)]
    struct CountingSource {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl AclSource for CountingSource {
        async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::from(Vec::new()))
        }

        async fn fetch_latest_schema(&self, _resource: &str) -> AivenResult<SchemaDocument> {
            Err(AivenError::Unauthorized)
        }
    }

    #[tokio::test]
    async fn test_render_rejects_bad_pattern_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.dot");
        let source = Arc::new(CountingSource::default());

        let result = render(
            &AppConfig::default(),
            source.clone(),
            SearchRequest::including("("),
            &output,
            true,
        )
        .await;

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidPattern { .. })
        ));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_render_dot_only_writes_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.dot");
        let source = Arc::new(CountingSource::default());

        render(
            &AppConfig::default(),
            source.clone(),
            SearchRequest::default(),
            &output,
            true,
        )
        .await
        .unwrap();

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(std::fs::read_to_string(&output).unwrap().starts_with("digraph"));
    }
}
