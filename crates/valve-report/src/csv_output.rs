//! Flat CSV output, one line per cell.

use csv::WriterBuilder;

use valve_model::ReportModel;

use crate::error::Result;
use crate::render::ReportRenderer;
use crate::style::StyleTable;

const HEADER: [&str; 7] = [
    "section", "title", "row", "label", "column", "value", "status",
];

/// Long-format table: every cell becomes one record keyed by section, row
/// label and column, with its formatted value and status.
#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
    pub delimiter: u8,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl ReportRenderer for CsvRenderer {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, report: &ReportModel, _styles: &StyleTable) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for section in &report.sections {
            for (row_idx, row) in section.rows.iter().enumerate() {
                let label = row.label().unwrap_or_default();
                let row_number = (row_idx + 1).to_string();
                for (cell, column) in row.cells.iter().zip(&section.columns).skip(1) {
                    writer.write_record([
                        section.kind.as_str(),
                        section.title.as_str(),
                        row_number.as_str(),
                        label,
                        column.as_str(),
                        cell.value.to_string().as_str(),
                        cell.status.as_str(),
                    ])?;
                }
            }
        }
        let bytes = writer
            .into_inner()
            .map_err(|error| csv::Error::from(error.into_error()))?;
        Ok(bytes)
    }
}
