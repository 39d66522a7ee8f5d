//! Report computation engine for the heart-valve KPI dashboard.
//!
//! Data flows one way: raw rows are normalized into
//! [`ProcedureRecord`](valve_model::ProcedureRecord)s, classified, aggregated
//! per section, annotated with statuses and assembled into a
//! [`ReportModel`](valve_model::ReportModel).

pub mod aggregate;
pub mod assemble;
pub mod classify;
pub mod datetime;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod status;

pub use aggregate::ReportScope;
pub use assemble::{assemble_report, date_token, generated_label};
pub use classify::{CLASSIFICATION_RULES, ClassificationRule, classify};
pub use error::{ReportError, Result};
pub use normalize::{NormalizeSummary, RecordNormalizer, normalize_row, normalize_rows};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use status::StatusRule;
