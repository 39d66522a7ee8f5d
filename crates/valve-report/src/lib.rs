//! Output side of the dashboard.
//!
//! Renderers consume a finished [`ReportModel`](valve_model::ReportModel)
//! together with a [`StyleTable`]; they never recompute values or statuses.
//!
//! - **JSON**: the report with the resolved style of every cell
//! - **CSV**: one line per cell, for spreadsheets and diffing

mod chart;
mod csv_output;
mod error;
mod fingerprint;
mod json;
mod render;
mod style;

pub use chart::{ChartSeries, ChartSpec};
pub use csv_output::CsvRenderer;
pub use error::{RenderError, Result};
pub use fingerprint::fingerprint;
pub use json::JsonRenderer;
pub use render::{ReportRenderer, write_report};
pub use style::{CellStyle, StyleTable, number_format};
