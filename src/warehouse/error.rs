//! Warehouse load error types.

use std::io;
use thiserror::Error;

use crate::config::WarehouseConfigError;
use crate::model::TableName;

/// Result type for warehouse operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a table.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The warehouse rejected or failed the load.
    #[error("load of {table} failed: {message}")]
    LoadFailure { table: TableName, message: String },

    /// Service-account key could not be read or used.
    #[error("credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Transport failure talking to the warehouse API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid warehouse configuration: {0}")]
    Config(#[from] WarehouseConfigError),
}

impl LoadError {
    pub fn load_failure(table: TableName, message: impl Into<String>) -> Self {
        Self::LoadFailure {
            table,
            message: message.into(),
        }
    }
}

/// Errors reading a service-account key or obtaining a token.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("failed to read key file: {0}")]
    Read(#[source] io::Error),

    #[error("malformed key file: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed")]
    SigningFailed,

    #[error("token exchange failed (HTTP {status}): {body}")]
    TokenExchange { status: u16, body: String },
}
