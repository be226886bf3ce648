//! Error types for the admin client

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Infrastructure
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Backend
    // ─────────────────────────────────────────────────────────────
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────
    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("A submission is already in progress")]
    SubmitInFlight,

    #[error("Image processing failed: {message}")]
    Image { message: String },
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn image(message: impl Into<String>) -> Self {
        Self::Image {
            message: message.into(),
        }
    }

    /// Short text for the error banner shown above tables and forms.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(e) if e.is_connect() => "Cannot reach the server".to_string(),
            Error::Status { status, .. } => format!("Server rejected the request ({status})"),
            other => other.to_string(),
        }
    }
}
