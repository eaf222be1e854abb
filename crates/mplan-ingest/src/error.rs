//! Error types for media plan ingestion.

use std::path::{Path, PathBuf};

use thiserror::Error;

use mplan_model::ModelError;

/// Errors that can occur while loading plan lines, master data or config.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Two source columns map onto the same canonical field.
    #[error("columns '{first}' and '{second}' in {path} both map to field '{field}'")]
    DuplicateField {
        path: PathBuf,
        field: String,
        first: String,
        second: String,
    },

    /// Master-data document is not usable at all.
    #[error("invalid master data in {path}: {source}")]
    MasterData {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Validation config could not be parsed.
    #[error("failed to parse TOML config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl IngestError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
