//! Raw rows to report in one call.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{info, info_span};

use valve_model::{ProcedureRecord, RawRow, ReportConfig, ReportModel};

use crate::assemble::assemble_report;
use crate::error::{ReportError, Result};
use crate::normalize::{NormalizeSummary, normalize_rows};

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub report: ReportModel,
    pub normalize: NormalizeSummary,
    /// Records the report was built from, in sheet order.
    pub records: Vec<ProcedureRecord>,
}

/// Normalize `rows` and assemble the report.
///
/// Fails when no row survives the case-number gate or the config is
/// invalid; nothing partial is returned.
pub fn run_pipeline<I>(
    rows: I,
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<PipelineOutput>
where
    I: IntoIterator<Item = RawRow>,
{
    config.validate()?;

    let (records, summary) = info_span!("normalize").in_scope(|| {
        let start = Instant::now();
        let (records, summary) = normalize_rows(rows);
        info!(
            rows = summary.rows_seen,
            records = records.len(),
            dropped = summary.dropped,
            coerced_cells = summary.coerced_cells,
            unclassified = summary.unclassified,
            duration_ms = start.elapsed().as_millis(),
            "normalization complete"
        );
        (records, summary)
    });
    if records.is_empty() {
        return Err(ReportError::NoRecords {
            rows_seen: summary.rows_seen,
            dropped: summary.dropped,
        });
    }

    let report = info_span!("assemble", report_year = config.report_year).in_scope(|| {
        let start = Instant::now();
        let report = assemble_report(&records, config, generated_at)?;
        info!(
            sections = report.sections.len(),
            months_elapsed = report.months_elapsed,
            duration_ms = start.elapsed().as_millis(),
            "report assembled"
        );
        Ok::<_, ReportError>(report)
    })?;

    Ok(PipelineOutput {
        report,
        normalize: summary,
        records,
    })
}
