use thiserror::Error;

use valve_model::ModelError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no usable procedure rows: {rows_seen} rows read, {dropped} without case number")]
    NoRecords { rows_seen: usize, dropped: usize },
    #[error(transparent)]
    InvalidConfig(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
