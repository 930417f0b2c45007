//! Client side of the relay: how the shell reaches `POST /api/optimize`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Shown when the relay fails without an `error` field we can read.
pub const RELAY_FALLBACK_MESSAGE: &str = "Optimization failed";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn optimize(&self, job_description: &str) -> Result<String, RelayError>;
}

#[derive(Debug, Deserialize)]
struct OptimizeBody {
    optimized: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to a running relay over HTTP.
#[derive(Clone)]
pub struct HttpRelayClient {
    client: Client,
    endpoint: String,
}

impl HttpRelayClient {
    /// `base_url` is the relay origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/optimize", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn optimize(&self, job_description: &str) -> Result<String, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "jobDescription": job_description }))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| RELAY_FALLBACK_MESSAGE.to_string());
            return Err(RelayError::Rejected(message));
        }

        let body: OptimizeBody = response.json().await?;
        Ok(body.optimized)
    }
}
