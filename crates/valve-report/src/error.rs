//! Error types for report rendering.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Output file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV writing failed: {0}")]
    Csv(#[from] csv::Error),

    /// The report lacks the section a renderer depends on.
    #[error("report has no {section} section")]
    MissingSection { section: &'static str },
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = RenderError::Io {
            path: PathBuf::from("/out/Dashboard_01-01-2026.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write /out/Dashboard_01-01-2026.json: denied"
        );
    }
}
