//! Graphviz process renderer
//!
//! Writes the DOT source to a temporary file in the work directory and runs
//! the Graphviz executable on it. Both files are returned as the render
//! artifact. If the render is cancelled the files are removed and the child
//! process is killed.

use crate::config::{OutputFormat, RendererConfig};
use crate::error::{RenderError, RenderResult};
use crate::render::dot::write_dot;
use crate::render::{GraphRenderer, RenderArtifact, RenderInput, RenderedGraph};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{info, instrument};

/// Renderer backed by the Graphviz command line
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    command: String,
    format: OutputFormat,
    work_dir: PathBuf,
}

impl GraphvizRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            command: config.command.clone(),
            format: config.format,
            work_dir: config.work_dir.clone(),
        }
    }

    /// Create an empty, uniquely named file in the work directory
    fn temp_path(&self, suffix: &str) -> RenderResult<TempPath> {
        let file = tempfile::Builder::new()
            .prefix("acl-graph-")
            .suffix(suffix)
            .tempfile_in(&self.work_dir)?;
        Ok(file.into_temp_path())
    }

    async fn run(&self, source: &Path, output: &Path) -> RenderResult<Vec<u8>> {
        let result = Command::new(&self.command)
            .arg(format!("-T{}", self.format.extension()))
            .arg("-o")
            .arg(output)
            .arg(source)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RenderError::Spawn {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                status: result.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(tokio::fs::read(output).await?)
    }
}

#[async_trait]
impl GraphRenderer for GraphvizRenderer {
    #[instrument(skip_all, fields(nodes = input.graph.nodes.len(), edges = input.graph.edges.len()))]
    async fn render(&self, input: &RenderInput) -> RenderResult<RenderedGraph> {
        let source_path = self.temp_path(".dot")?;
        tokio::fs::write(&source_path, write_dot(input)).await?;
        let output_path = self.temp_path(&format!(".{}", self.format.extension()))?;

        // Dropping the paths on error removes both files
        let bytes = self.run(&source_path, &output_path).await?;
        info!(
            path = %output_path.display(),
            bytes = bytes.len(),
            "Graph rendered"
        );

        Ok(RenderedGraph {
            bytes,
            content_type: self.format.content_type(),
            artifact: RenderArtifact::new(vec![source_path, output_path]),
        })
    }

    fn backend(&self) -> &'static str {
        "graphviz"
    }
}
