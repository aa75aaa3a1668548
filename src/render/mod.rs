//! Graph rendering
//!
//! The renderer receives the graph plus the prepared label of every node and
//! returns image bytes together with a [`RenderArtifact`] handle. Callers
//! dispose the handle once the bytes are used; a handle that is dropped
//! instead (cancelled request, early return) removes its files on drop.

pub mod dot;
pub mod graphviz;

pub use dot::write_dot;
pub use graphviz::GraphvizRenderer;

use crate::error::RenderResult;
use crate::graph::Graph;
use crate::label::{LinkBuilder, NodeLabel, prepare_labels};
// async_trait required for dyn-compatibility with Arc<dyn GraphRenderer>
use async_trait::async_trait;
use tempfile::TempPath;
use tracing::{debug, warn};

/// A graph with its per-node label payloads
#[derive(Debug, Clone)]
pub struct RenderInput {
    pub graph: Graph,
    /// One label per node, in node order
    pub labels: Vec<NodeLabel>,
}

impl RenderInput {
    pub fn new(graph: Graph, links: &dyn LinkBuilder) -> Self {
        let labels = prepare_labels(&graph.nodes, links);
        Self { graph, labels }
    }
}

/// Files left behind by a render
///
/// Each file is deleted when the artifact is dropped.
#[derive(Debug, Default)]
#[must_use = "render artifacts must be disposed"]
pub struct RenderArtifact {
    paths: Vec<TempPath>,
}

impl RenderArtifact {
    pub fn new(paths: Vec<TempPath>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every file off the async runtime; missing files are ignored
    pub async fn dispose(self) {
        let paths = self.paths;
        let removal = tokio::task::spawn_blocking(move || {
            for path in paths {
                let path_str = path.display().to_string();
                match path.close() {
                    Ok(()) => debug!(path = %path_str, "Removed render artifact"),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => warn!(path = %path_str, error = %e, "Failed to remove render artifact"),
                }
            }
        });
        if let Err(e) = removal.await {
            warn!(error = %e, "Render artifact cleanup task failed");
        }
    }
}

/// Result of a render
#[derive(Debug)]
pub struct RenderedGraph {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub artifact: RenderArtifact,
}

/// Turns a prepared graph into an image
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    async fn render(&self, input: &RenderInput) -> RenderResult<RenderedGraph>;

    /// Name of the backend (for logging)
    fn backend(&self) -> &'static str;
}
