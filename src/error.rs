// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with consistent user-facing messages.

/// Client error type. Every variant is terminal for the single action that
/// produced it; none of them invalidate the session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Malformed view model: {0}")]
    Decode(String),

    #[error("Action rejected by server: {0}")]
    ActionRejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Activity {0} is not available right now")]
    ActivityUnavailable(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Inline message shown for network failures.
    pub const TRANSPORT_MESSAGE: &'static str =
        "Unable to reach the server right now. Please try again.";

    /// Inline message shown when the server response cannot be decoded.
    pub const DECODE_MESSAGE: &'static str = "The server sent an unexpected response.";

    /// Fallback when the server rejects an action without saying why.
    pub const REJECTED_MESSAGE: &'static str = "The server could not complete this action.";

    /// Text to surface as the view model's `error_message`.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::ActionRejected(msg) if !msg.trim().is_empty() => msg.clone(),
            ClientError::ActionRejected(_) => Self::REJECTED_MESSAGE.to_string(),
            ClientError::Transport(_) => Self::TRANSPORT_MESSAGE.to_string(),
            ClientError::Decode(_) => Self::DECODE_MESSAGE.to_string(),
            ClientError::ActivityUnavailable(_) => {
                "This activity is not available right now.".to_string()
            }
            ClientError::InvalidInput(msg)
            | ClientError::NotFound(msg)
            | ClientError::Config(msg) => msg.clone(),
        }
    }

    /// Whether the failure happened below the `success` flag (network, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
