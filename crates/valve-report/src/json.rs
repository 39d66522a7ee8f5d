//! JSON output: the report plus the resolved style of every cell.

use serde::Serialize;

use valve_model::{CellValue, ReportModel, SectionKind, Status};

use crate::chart::ChartSpec;
use crate::error::Result;
use crate::fingerprint::fingerprint;
use crate::render::ReportRenderer;
use crate::style::{CellStyle, StyleTable, number_format};

#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    report_year: i32,
    months_elapsed: u32,
    generated_at: String,
    generated_label: &'a str,
    fingerprint: String,
    sections: Vec<JsonSection<'a>>,
    chart: ChartSpec,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    kind: SectionKind,
    title: &'a str,
    columns: &'a [String],
    rows: Vec<Vec<JsonCell<'a>>>,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    value: &'a CellValue,
    display: String,
    status: Status,
    style: CellStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    number_format: Option<&'static str>,
}

impl ReportRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &ReportModel, styles: &StyleTable) -> Result<Vec<u8>> {
        let sections = report
            .sections
            .iter()
            .map(|section| JsonSection {
                kind: section.kind,
                title: &section.title,
                columns: &section.columns,
                rows: section
                    .rows
                    .iter()
                    .map(|row| {
                        row.cells
                            .iter()
                            .map(|cell| JsonCell {
                                value: &cell.value,
                                display: cell.value.to_string(),
                                status: cell.status,
                                style: styles.style(cell.status),
                                number_format: number_format(&cell.value),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        let document = JsonDocument {
            report_year: report.report_year,
            months_elapsed: report.months_elapsed,
            generated_at: report.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            generated_label: &report.generated_label,
            fingerprint: fingerprint(report)?,
            sections,
            chart: ChartSpec::from_report(report)?,
        };
        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };
        bytes.push(b'\n');
        Ok(bytes)
    }
}
