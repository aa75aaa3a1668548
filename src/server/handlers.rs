//! Route handlers

use crate::acl::{SearchConditions, SearchRequest};
use crate::error::ConfigError;
use crate::graph::generate_with;
use crate::render::{RenderInput, RenderedGraph};
use crate::server::AppState;
use crate::server::error::ApiError;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{Span, debug, field, info, instrument};

/// OpenAPI description of the routes
const SWAGGER_YAML: &str = include_str!("../../assets/swagger.yaml");

/// Icons referenced from node labels
const STATIC_FILES: &[(&str, &str)] = &[
    (
        "magnifying-glass.svg",
        include_str!("../../assets/static/magnifying-glass.svg"),
    ),
    ("contact.svg", include_str!("../../assets/static/contact.svg")),
    ("warning.svg", include_str!("../../assets/static/warning.svg")),
];

/// Render the graph for a search
///
/// `exclude-topic-pattern` is an alias of `exclude-resource-pattern`; a query
/// carrying both is rejected like any other malformed query.
#[instrument(skip_all, fields(include = field::Empty))]
pub async fn graph_image(
    State(state): State<AppState>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(request) = query.map_err(|e| ConfigError::InvalidRequest {
        message: e.body_text(),
    })?;
    Span::current().record("include", request.include_pattern.as_str());

    // Compile patterns before fetching anything
    let conditions = SearchConditions::compile(&request)?;

    let entries = state.source.fetch_entries().await?;
    let graph = generate_with(&entries, &conditions);
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Generated graph"
    );

    let input = RenderInput::new(graph, &state.links);
    let RenderedGraph {
        bytes,
        content_type,
        artifact,
    } = state.renderer.render(&input).await?;
    artifact.dispose().await;

    info!(
        bytes = bytes.len(),
        backend = state.renderer.backend(),
        "Rendered graph"
    );

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Latest schema of a topic
#[instrument(skip_all, fields(topic = %topic))]
pub async fn topic_schema(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let document = state.source.fetch_latest_schema(&topic).await?;
    Ok(Json(document.to_json()))
}

pub async fn status() -> &'static str {
    "OK"
}

pub async fn swagger() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml")],
        SWAGGER_YAML,
    )
        .into_response()
}

/// Serve a bundled icon
pub async fn static_file(Path(file): Path<String>) -> Response {
    match STATIC_FILES.iter().find(|(name, _)| *name == file) {
        Some((_, content)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            *content,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
