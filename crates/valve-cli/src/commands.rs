use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::info_span;

use valve_cli::pipeline::{OutputKind, ReportRequest, ReportRun, default_output_dir, run_report};
use valve_core::CLASSIFICATION_RULES;
use valve_ingest::IngestOptions;
use valve_model::{KpiCategory, ReportConfig};

use crate::cli::{CategoriesArgs, OutputFormatArg, ReportArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_categories(args: &CategoriesArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rang"),
        header_cell("Kategorie"),
        header_cell("Stichworte"),
        header_cell("Soll/Monat"),
    ]);
    apply_table_style(&mut table);
    for (idx, rule) in CLASSIFICATION_RULES.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            rule.category.to_string(),
            rule.tokens.join(", "),
            config.monthly_target(rule.category).to_string(),
        ]);
    }
    table.add_row(vec![
        "-".to_string(),
        KpiCategory::Other.to_string(),
        "(kein Treffer)".to_string(),
        config.monthly_target(KpiCategory::Other).to_string(),
    ]);
    println!("{table}");
    Ok(())
}

pub fn run_report_command(args: &ReportArgs) -> Result<ReportRun> {
    let span = info_span!("report", input = %args.input.display());
    let _guard = span.enter();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(year) = args.year {
        config.report_year = year;
    }
    let request = ReportRequest {
        input: args.input.clone(),
        ingest: IngestOptions {
            sheet: args.sheet.clone(),
            header_skip: args.skip_rows,
            password: args.password.clone(),
        },
        config,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input)),
        outputs: format_outputs(args.format),
        dry_run: args.dry_run,
        generated_at: Local::now().naive_local(),
    };
    run_report(&request)
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(ReportConfig::default()),
    }
}

fn format_outputs(format: OutputFormatArg) -> Vec<OutputKind> {
    match format {
        OutputFormatArg::Json => vec![OutputKind::Json],
        OutputFormatArg::Csv => vec![OutputKind::Csv],
        OutputFormatArg::Both => vec![OutputKind::Json, OutputKind::Csv],
    }
}
