//! Error types for procedure sheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort ingestion before any record is normalized.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input access ===
    /// Input file not found.
    #[error("input not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrong password, corrupt container, or no way to open it.
    #[error("could not decrypt workbook: {reason}")]
    Decryption { reason: String },

    /// Sheet bytes are not parseable as a table.
    #[error("failed to parse sheet '{sheet}': {message}")]
    CsvParse { sheet: String, message: String },

    // === Schema ===
    /// Requested sheet is not part of the workbook.
    #[error("sheet '{sheet}' not found in {path}")]
    MissingSheet { sheet: String, path: PathBuf },

    /// Sheet ends before its header row.
    #[error("sheet '{sheet}' has no header row after skipping {skipped} rows")]
    NoHeaderRow { sheet: String, skipped: usize },

    /// Required columns absent from the header row.
    #[error("sheet '{sheet}' is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
