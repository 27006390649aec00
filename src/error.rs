//! Typed failures for tool dispatch and backend round-trips.
//!
//! Every variant here ends up rendered as an `Error: <message>` envelope by
//! the dispatcher; none of them reach the transport as a raw fault.

use thiserror::Error;

/// Failures talking to the chat-completion backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout.
    #[error("Backend unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("Backend request to {url} failed ({status}): {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body did not match the chat-completions schema.
    #[error("Malformed backend response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Argument bag did not match a tool's declared input schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{tool}: arguments must be a JSON object")]
    NotAnObject { tool: &'static str },

    #[error("{tool}: missing required argument '{field}'")]
    Missing {
        tool: &'static str,
        field: &'static str,
    },

    #[error("{tool}: argument '{field}' must be {expected}")]
    WrongType {
        tool: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{tool}: argument '{field}' has unsupported value '{value}' (expected one of: {allowed})")]
    UnknownVariant {
        tool: &'static str,
        field: &'static str,
        value: String,
        allowed: String,
    },
}

/// Everything that can go wrong inside a single `tools/call`.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
