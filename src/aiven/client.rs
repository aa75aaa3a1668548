//! Aiven API client
//!
//! Provides a typed HTTP client for the Kafka ACL and schema registry
//! endpoints of one Aiven service.

use crate::acl::AclEntry;
use crate::aiven::source::AclSource;
use crate::aiven::types::{AclListResponse, AivenAcl, SchemaDocument, SchemaVersions};
use crate::auth::BoxedAuthProvider;
use crate::config::AivenConfig;
use crate::error::{AivenError, AivenResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// First retry delay, doubled on every further attempt
const BASE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on any single retry delay, including server hints
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Aiven API client
pub struct AivenClient {
    http: Client,
    base_url: String,
    auth: BoxedAuthProvider,
    max_retries: u32,
}

impl AivenClient {
    /// Create a new Aiven client from configuration
    pub fn new(config: &AivenConfig, auth: BoxedAuthProvider) -> AivenResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(format!("kafka-acl-graph/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AivenError::Request)?;

        info!(
            service = %config.service,
            project = %config.project,
            auth = auth.auth_type(),
            "Created Aiven client"
        );

        Ok(Self {
            http,
            base_url: config.service_url(),
            auth,
            max_retries: config.max_retries,
        })
    }

    /// Build a URL for a service endpoint
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add authentication to a request
    async fn authenticate(&self, request: RequestBuilder) -> AivenResult<RequestBuilder> {
        let header = self
            .auth
            .get_auth_header()
            .await
            .map_err(|e| AivenError::Api {
                status: 401,
                message: e.to_string(),
            })?;

        Ok(request.header(header.header_name(), header.header_value()))
    }

    /// Execute a request with retries
    async fn execute(&self, request: RequestBuilder) -> AivenResult<Response> {
        let mut last_error: Option<AivenError> = None;

        for attempt in 0..=self.max_retries {
            if let Some(error) = &last_error {
                let delay = retry_delay(attempt, error);
                debug!(
                    delay_ms = delay.as_millis() as u64,
                    "Retrying request (attempt {})",
                    attempt + 1
                );
                tokio::time::sleep(delay).await;
            }

            let req = request
                .try_clone()
                .ok_or_else(|| AivenError::InvalidResponse("Cannot clone request".to_string()))?;

            let error = match req.send().await {
                Ok(response) => match handle_response(response).await {
                    Ok(response) => return Ok(response),
                    Err(e) => e,
                },
                Err(e) => AivenError::Request(e),
            };

            if !is_retryable(&error) {
                return Err(error);
            }
            warn!(error = %error, attempt = attempt + 1, "Aiven request failed");
            last_error = Some(error);
        }

        Err(last_error.unwrap_or_else(|| AivenError::InvalidResponse("Unknown error".to_string())))
    }

    /// Make an authenticated GET request
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AivenResult<T> {
        let request = self.http.get(self.url(endpoint));
        let request = self.authenticate(request).await?;

        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| AivenError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// List the Kafka ACLs of the service
    pub async fn list_acls(&self) -> AivenResult<Vec<AivenAcl>> {
        info!("Fetching ACLs from Aiven");
        let response: AclListResponse = self.get("/acl").await?;
        Ok(response.acl)
    }

    /// Fetch the latest value schema registered for a topic
    pub async fn latest_schema(&self, topic: &str) -> AivenResult<SchemaDocument> {
        info!(topic, "Fetching latest schema from Aiven");
        let subject = subject_path(topic);

        let versions: SchemaVersions = match self.get(&format!("{}/versions", subject)).await {
            Ok(versions) => versions,
            Err(e) if e.is_not_found() => return Ok(SchemaDocument::Missing),
            Err(e) => return Err(e),
        };

        let Some(latest) = versions.latest() else {
            return Ok(SchemaDocument::Missing);
        };

        let schema = self
            .get(&format!("{}/versions/{}/schema", subject, latest))
            .await?;
        Ok(SchemaDocument::Defined(schema))
    }
}

#[async_trait]
impl AclSource for AivenClient {
    async fn fetch_entries(&self) -> AivenResult<Arc<[AclEntry]>> {
        let entries: Vec<AclEntry> = self
            .list_acls()
            .await?
            .into_iter()
            .map(AivenAcl::into_entry)
            .collect();
        Ok(entries.into())
    }

    async fn fetch_latest_schema(&self, resource: &str) -> AivenResult<SchemaDocument> {
        self.latest_schema(resource).await
    }
}

/// Handle API response
async fn handle_response(response: Response) -> AivenResult<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        return Err(AivenError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    Err(AivenError::from_response(status.as_u16(), &body))
}

/// Schema registry subject path for a topic's value schema
fn subject_path(topic: &str) -> String {
    format!(
        "/kafka/schema/subjects/{}-value",
        urlencoding::encode(topic)
    )
}

/// Delay before a retry: exponential backoff, or the server's Retry-After
/// hint when that is longer
fn retry_delay(attempt: u32, error: &AivenError) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    let backoff = BASE_RETRY_DELAY.saturating_mul(factor);
    let delay = match error {
        AivenError::RateLimited { retry_after } => backoff.max(Duration::from_secs(*retry_after)),
        _ => backoff,
    };
    delay.min(MAX_RETRY_DELAY)
}

/// Check if an error is retryable
fn is_retryable(error: &AivenError) -> bool {
    match error {
        AivenError::Request(e) => e.is_timeout() || e.is_connect(),
        AivenError::RateLimited { .. } => true,
        AivenError::Api { status, .. } => *status >= 500,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_path() {
        assert_eq!(
            subject_path("orders_v1"),
            "/kafka/schema/subjects/orders_v1-value"
        );
        assert_eq!(
            subject_path("a/b"),
            "/kafka/schema/subjects/a%2Fb-value"
        );
    }

    #[test]
    fn test_retry_delay_backoff() {
        let error = AivenError::Api {
            status: 503,
            message: String::new(),
        };
        assert_eq!(retry_delay(1, &error), Duration::from_millis(100));
        assert_eq!(retry_delay(2, &error), Duration::from_millis(200));
        assert_eq!(retry_delay(4, &error), Duration::from_millis(800));
        assert_eq!(retry_delay(u32::MAX, &error), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_retry_delay_honours_retry_after() {
        let error = AivenError::RateLimited { retry_after: 2 };
        assert_eq!(retry_delay(1, &error), Duration::from_secs(2));

        // Backoff wins once it exceeds the hint
        let error = AivenError::RateLimited { retry_after: 0 };
        assert_eq!(retry_delay(3, &error), Duration::from_millis(400));

        let error = AivenError::RateLimited { retry_after: 3600 };
        assert_eq!(retry_delay(1, &error), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(&AivenError::RateLimited { retry_after: 60 }));
        assert!(is_retryable(&AivenError::Api {
            status: 503,
            message: "Service unavailable".to_string()
        }));
        assert!(!is_retryable(&AivenError::Api {
            status: 400,
            message: "Bad request".to_string()
        }));
        assert!(!is_retryable(&AivenError::Unauthorized));
        assert!(!is_retryable(&AivenError::NotFound {
            resource: "acl".to_string()
        }));
    }
}
