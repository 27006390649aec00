//! In-process backend double that records every request it receives.

use crate::backend::Backend;
use crate::error::BackendError;
use crate::types::CompletionRequest;
use async_trait::async_trait;
use std::sync::Mutex;

enum Reply {
    Content(Option<String>),
    Status(u16, String),
}

pub(crate) struct RecordingBackend {
    reply: Reply,
    models: Vec<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingBackend {
    pub(crate) fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Content(Some(text.to_string())))
    }

    /// Backend that answers with no message content at all.
    pub(crate) fn empty() -> Self {
        Self::with_reply(Reply::Content(None))
    }

    pub(crate) fn failing(status: u16, body: &str) -> Self {
        Self::with_reply(Reply::Status(status, body.to_string()))
    }

    pub(crate) fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            models: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn error(&self, path: &str) -> Option<BackendError> {
        match &self.reply {
            Reply::Status(code, body) => Some(BackendError::Status {
                url: format!("http://localhost:11434/v1/{path}"),
                status: reqwest::StatusCode::from_u16(*code).unwrap(),
                body: body.clone(),
            }),
            Reply::Content(_) => None,
        }
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Content(text) => Ok(text.clone()),
            Reply::Status(..) => Err(self.error("chat/completions").unwrap()),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, BackendError> {
        match self.error("models") {
            Some(err) => Err(err),
            None => Ok(self.models.clone()),
        }
    }
}
