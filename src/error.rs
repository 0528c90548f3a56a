//! Error types for migrate-core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    /// A controlled-vocabulary label with no entry in its table.
    #[error("unrecognized {vocabulary} value '{value}'")]
    UnrecognizedVocabularyValue { vocabulary: String, value: String },

    /// A record failed to map; carries its position and original title.
    #[error("record {index} ('{title}') rejected: {source}")]
    Record {
        index: usize,
        title: String,
        #[source]
        source: Box<MigrateError>,
    },

    /// Every failure of a collect-all batch, in input order.
    #[error("{} record(s) rejected; first: {}", .failures.len(), first_message(.failures))]
    Batch { failures: Vec<MigrateError> },

    #[error("invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    #[error("asset '{codename}' could not be read from {}: {source}", .path.display())]
    AssetRead {
        codename: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// A protocol request missing or mistyping a required payload field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid package: {0}")]
    InvalidPackage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn first_message(failures: &[MigrateError]) -> String {
    failures
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl MigrateError {
    /// The innermost vocabulary value behind this error, if there is one.
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            MigrateError::UnrecognizedVocabularyValue { value, .. } => Some(value),
            MigrateError::Record { source, .. } => source.offending_value(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
