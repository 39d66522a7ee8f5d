//! Stages driven by the `report` command: ingest, compute, output.
//!
//! Each stage runs in its own `info_span!` and logs its duration. Errors
//! carry `anyhow` context naming the stage input.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{debug, info, info_span};

use valve_core::{NormalizeSummary, run_pipeline};
use valve_ingest::{
    CsvSheetReader, IngestOptions, PassthroughDecryptor, ProcedureSheet, read_procedure_sheet,
};
use valve_model::{KpiCategory, ProcedureRecord, ReportConfig, ReportModel};
use valve_report::{
    CsvRenderer, JsonRenderer, ReportRenderer, StyleTable, fingerprint, write_report,
};

use crate::logging::redact_value;

/// Output document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Json,
    Csv,
}

impl OutputKind {
    fn renderer(self) -> Box<dyn ReportRenderer> {
        match self {
            OutputKind::Json => Box::new(JsonRenderer::default()),
            OutputKind::Csv => Box::new(CsvRenderer::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Sheet file or exported workbook directory.
    pub input: PathBuf,
    pub ingest: IngestOptions,
    pub config: ReportConfig,
    pub output_dir: PathBuf,
    pub outputs: Vec<OutputKind>,
    /// Compute and summarize without writing files.
    pub dry_run: bool,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug)]
pub struct ReportRun {
    /// Resolved sheet file.
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub report: ReportModel,
    pub normalize: NormalizeSummary,
    pub missing_columns: Vec<&'static str>,
    pub fingerprint: String,
    pub outputs: Vec<PathBuf>,
}

/// Default output directory: `output/` next to a sheet file, inside a
/// workbook directory.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.join("output")
    } else {
        input
            .parent()
            .map_or_else(|| PathBuf::from("output"), |parent| parent.join("output"))
    }
}

pub fn ingest(input: &Path, options: &IngestOptions) -> Result<ProcedureSheet> {
    let span = info_span!("ingest", input = %input.display(), sheet = %options.sheet);
    span.in_scope(|| {
        let start = Instant::now();
        let sheet = read_procedure_sheet(
            input,
            options,
            &PassthroughDecryptor,
            &CsvSheetReader::new(),
        )
        .with_context(|| format!("read procedure sheet from {}", input.display()))?;
        info!(
            source = %sheet.source.display(),
            rows = sheet.row_count(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(sheet)
    })
}

/// Debug-log the labels of records counted as OTHER.
fn log_unclassified(records: &[ProcedureRecord]) {
    for record in records
        .iter()
        .filter(|record| record.kpi_category == KpiCategory::Other)
    {
        debug!(
            case = %record.sequence_id,
            label = redact_value(record.raw_procedure_label.as_deref().unwrap_or_default()),
            "procedure label matched no category"
        );
    }
}

pub fn write_outputs(
    output_dir: &Path,
    report: &ReportModel,
    outputs: &[OutputKind],
) -> Result<Vec<PathBuf>> {
    let span = info_span!("output", output_dir = %output_dir.display());
    span.in_scope(|| {
        let start = Instant::now();
        let styles = StyleTable::dashboard();
        let mut written = Vec::new();
        for kind in outputs {
            let renderer = kind.renderer();
            let path = write_report(output_dir, report, renderer.as_ref(), &styles)
                .with_context(|| format!("write {} report", renderer.extension()))?;
            written.push(path);
        }
        info!(
            files = written.len(),
            duration_ms = start.elapsed().as_millis(),
            "outputs written"
        );
        Ok(written)
    })
}

/// Run every stage for one request.
pub fn run_report(request: &ReportRequest) -> Result<ReportRun> {
    let sheet = ingest(&request.input, &request.ingest)?;
    let source = sheet.source.clone();
    let missing_columns = sheet.columns.missing_expected().to_vec();

    let output = run_pipeline(sheet.into_rows(), &request.config, request.generated_at)
        .context("compute report")?;
    if output.normalize.unclassified > 0 {
        info!(unclassified = output.normalize.unclassified, "records counted as OTHER");
        log_unclassified(&output.records);
    }
    let fingerprint = fingerprint(&output.report).context("fingerprint report")?;
    debug!(fingerprint = %fingerprint, "report fingerprint");

    let outputs = if request.dry_run {
        info!("dry run: no files written");
        Vec::new()
    } else {
        write_outputs(&request.output_dir, &output.report, &request.outputs)?
    };

    Ok(ReportRun {
        source,
        output_dir: request.output_dir.clone(),
        report: output.report,
        normalize: output.normalize,
        missing_columns,
        fingerprint,
        outputs,
    })
}
