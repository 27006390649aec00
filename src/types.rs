//! Shared types used across the adapter: chat wire shapes and the tool reply envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inference types
// ---------------------------------------------------------------------------

/// A single message in a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// One self-contained chat-completion request, serialized as-is onto the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    /// The system message content, if the request carries one.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }

    /// The user message content.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tool replies
// ---------------------------------------------------------------------------

/// The `{content, isError}` envelope returned for every tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReply {
    pub content: String,
    pub is_error: bool,
}

impl ToolReply {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            content: format!("Error: {}", message),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn completion_request_wire_shape() {
        let req = CompletionRequest {
            model: "qwen2.5-coder:7b".into(),
            messages: vec![ChatMessage::system("be terse"), ChatMessage::user("hi")],
            max_tokens: 50,
            temperature: 0.1,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "qwen2.5-coder:7b",
                "messages": [
                    { "role": "system", "content": "be terse" },
                    { "role": "user", "content": "hi" }
                ],
                "max_tokens": 50,
                "temperature": 0.1
            })
        );
        assert_eq!(req.system_prompt(), Some("be terse"));
        assert_eq!(req.user_prompt(), Some("hi"));
    }

    #[test]
    fn error_reply_is_prefixed() {
        let reply = ToolReply::error("Unknown tool: nope");
        assert!(reply.is_error);
        assert_eq!(reply.content, "Error: Unknown tool: nope");
    }
}
