//! Error handling for the hushold client

use std::fmt;
use thiserror::Error;

/// Unified error type for the hushold client
#[derive(Error, Debug)]
pub enum Error {
    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] hushold_store::StoreError),

    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
