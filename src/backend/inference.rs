//! Model inference against a local OpenAI-compatible endpoint (Ollama, Docker Model Runner).

use super::Backend;
use crate::config::LlmConfig;
use crate::error::BackendError;
use crate::types::CompletionRequest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Local backends ignore auth, but some proxies insist on the header being present.
const PLACEHOLDER_API_KEY: &str = "not-needed";

/// HTTP client for the chat-completions and models endpoints.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    base_url: String,
    http: reqwest::Client,
}

// -- OpenAI-compatible response types -----------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

impl InferenceClient {
    /// Create a client for the configured backend.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn check_status(
        url: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(BackendError::Status {
            url: url.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl Backend for InferenceClient {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, BackendError> {
        let url = self.url("chat/completions");

        debug!(
            "Inference request to model {} (max_tokens={}, temperature={})",
            request.model, request.max_tokens, request.temperature
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(PLACEHOLDER_API_KEY)
            .json(request)
            .send()
            .await
            .map_err(|source| BackendError::Unreachable {
                url: url.clone(),
                source,
            })?;

        let resp = Self::check_status(&url, resp).await?;
        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|source| BackendError::Malformed {
                url: url.clone(),
                source,
            })?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }

    async fn list_models(&self) -> Result<Vec<String>, BackendError> {
        let url = self.url("models");
        debug!("Listing models at {}", url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(PLACEHOLDER_API_KEY)
            .send()
            .await
            .map_err(|source| BackendError::Unreachable {
                url: url.clone(),
                source,
            })?;

        let resp = Self::check_status(&url, resp).await?;
        let list: ModelList = resp
            .json()
            .await
            .map_err(|source| BackendError::Malformed {
                url: url.clone(),
                source,
            })?;

        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}
