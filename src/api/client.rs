//! HTTP client for the Acumatica contract-based entity API.
//!
//! All requests share one lazily established session; an expired session is
//! re-established at most once per request.

use crate::auth::{AcumaticaSession, AuthError};
use crate::config::RuntimeConfig;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::query::QueryParams;

/// Cap on response body text carried in error messages.
const ERROR_BODY_LIMIT: usize = 2048;

/// Entity API client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed ({status}) {path}: {body}")]
    RequestFailed {
        status: u16,
        path: String,
        body: String,
    },

    #[error("Invalid JSON from {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for entity and generic inquiry GET requests.
pub struct AcumaticaClient {
    session: Arc<AcumaticaSession>,
    config: Arc<RuntimeConfig>,
    http_client: Client,
}

impl AcumaticaClient {
    /// Create a new client sharing the given session.
    pub fn new(session: Arc<AcumaticaSession>, config: Arc<RuntimeConfig>) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            session,
            config,
            http_client,
        }
    }

    fn entity_path(&self, entity: &str) -> String {
        format!(
            "/entity/{}/{}/{}",
            self.config.endpoint, self.config.version, entity
        )
    }

    fn entity_key_path(&self, entity: &str, keys: &[&str]) -> String {
        let encoded: Vec<String> = keys
            .iter()
            .map(|key| urlencoding::encode(key).into_owned())
            .collect();
        format!("{}/{}", self.entity_path(entity), encoded.join("/"))
    }

    fn inquiry_path(&self, name: &str) -> String {
        format!(
            "/entity/{}/{}/GI/{}",
            self.config.endpoint,
            self.config.version,
            urlencoding::encode(name)
        )
    }

    /// Fetch a collection of entity records.
    pub async fn get_entity(
        &self,
        entity: &str,
        params: &QueryParams,
    ) -> Result<Value, ClientError> {
        self.execute(&self.entity_path(entity), params.to_paged_pairs())
            .await
    }

    /// Fetch a single entity record addressed by its key fields.
    ///
    /// Every key becomes one percent-encoded path segment, so keys containing
    /// `/` or spaces stay intact.
    pub async fn get_entity_by_key(
        &self,
        entity: &str,
        keys: &[&str],
        params: &QueryParams,
    ) -> Result<Value, ClientError> {
        self.execute(&self.entity_key_path(entity, keys), params.to_pairs())
            .await
    }

    /// Run a generic inquiry by name.
    pub async fn get_generic_inquiry(
        &self,
        inquiry: &str,
        params: &QueryParams,
    ) -> Result<Value, ClientError> {
        self.execute(&self.inquiry_path(inquiry), params.to_paged_pairs())
            .await
    }

    /// Execute an authenticated GET against the entity API.
    ///
    /// A 401 clears the session and retries once after a fresh login; any
    /// failure after that is terminal for this request.
    async fn execute(
        &self,
        path: &str,
        pairs: Vec<(&'static str, String)>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut reauthenticated = false;

        loop {
            let cookie = self.session.ensure_session().await?;

            tracing::debug!("GET {}", path);

            let response = self
                .http_client
                .get(&url)
                .query(&pairs)
                .header(COOKIE, cookie)
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && !reauthenticated {
                tracing::info!("Session rejected (401), logging in again");
                self.session.invalidate().await;
                reauthenticated = true;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::RequestFailed {
                    status: status.as_u16(),
                    path: path.to_string(),
                    body: truncate_body(body),
                });
            }

            return response
                .json()
                .await
                .map_err(|source| ClientError::InvalidJson {
                    path: path.to_string(),
                    source,
                });
        }
    }
}

/// Trim an error body for diagnostics.
fn truncate_body(body: String) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body;
    }
    let mut end = ERROR_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}
