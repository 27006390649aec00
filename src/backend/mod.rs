//! Chat-completion backend seam.

pub mod inference;

pub use inference::InferenceClient;

use crate::error::BackendError;
use crate::types::CompletionRequest;
use async_trait::async_trait;

/// An OpenAI-compatible inference service.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one chat-completion request and return the first choice's text,
    /// or `None` when the backend produced no content.
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, BackendError>;

    /// List the model identifiers the backend serves.
    async fn list_models(&self) -> Result<Vec<String>, BackendError>;
}
