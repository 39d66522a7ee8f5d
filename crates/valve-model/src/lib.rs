//! Data model for the heart-valve KPI dashboard.
//!
//! Holds the raw row representation handed over by sheet readers, the typed
//! [`ProcedureRecord`] produced by normalization, the report tree consumed by
//! renderers, and the [`ReportConfig`] that carries targets and benchmarks.

pub mod category;
pub mod columns;
pub mod complication;
pub mod config;
pub mod error;
pub mod raw;
pub mod record;
pub mod report;

pub use category::KpiCategory;
pub use complication::{ComplicationCode, ComplicationFlags};
pub use config::{DEFAULT_REPORT_YEAR, ReportConfig};
pub use error::{ModelError, Result};
pub use raw::{RawRow, RawTable, RawValue, format_numeric};
pub use record::ProcedureRecord;
pub use report::{Cell, CellValue, ReportModel, Row, Section, SectionKind, Status};
