// src/error.rs
// =============================================================================
// Typed errors for the parts of the program that talk to GitHub, read
// configuration, or parse user input.
//
// The command handlers in main.rs still use anyhow::Result, the same way
// the rest of the application layer does. These variants exist so callers
// can tell an absent resource (a normal empty state) apart from a real
// API failure and render each one differently.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Non-2xx response other than 404
    #[error("GitHub API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// 404 from the API: repository or README does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection, TLS, or timeout failure before a response arrived
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    // Absent resources are expected outcomes (a repo with no README), so the
    // views show a fallback instead of an error banner for these.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
