//! Unified application error type.
//! Store failures are `StoreError`; everything the rest of the crate
//! surfaces to a caller is an `AppError`.

use std::io;
use thiserror::Error;

/// A failure coming out of a single Record Store call.
///
/// Every variant is treated as transient by the access layer and retried
/// until the query retry budget is spent.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,

    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The value has no stored form that reads back unchanged.
    #[error("value cannot be stored: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store / access layer
    // ---------------------------
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Max retries reached for {operation} after {attempts} attempts: {source}")]
    RetryExhausted {
        operation: &'static str,
        attempts: u32,
        #[source]
        source: StoreError,
    },

    #[error("Failed to connect to database after {attempts} attempts: {source}")]
    ConnectFailed {
        attempts: u32,
        #[source]
        source: StoreError,
    },

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Output
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
