//! Error types for the herokron database

use thiserror::Error;

/// Result type for database operations
pub type Result<T> = std::result::Result<T, HerokronError>;

/// Database errors
///
/// Structural problems in the backing file never show up here: those are
/// repaired on open by writing a fresh default document.
#[derive(Error, Debug)]
pub enum HerokronError {
    #[error("Invalid Heroku API key. View your API key(s) at: https://dashboard.heroku.com/account")]
    InvalidKey,

    #[error("API key is not registered")]
    UnknownKey,

    #[error("Webhook passed doesn't match webhook format: {0}")]
    MalformedWebhook(String),

    #[error("Color must be #RRGGBB, RRGGBB or a base 10 integer, got {0:?}")]
    InvalidColorFormat(String),

    #[error("Color {0} is out of range (0 to 16777215)")]
    ColorOutOfRange(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Heroku request failed: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
