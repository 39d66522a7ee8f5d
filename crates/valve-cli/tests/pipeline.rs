//! End-to-end runs of the report stages against sheet fixtures.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use valve_cli::pipeline::{OutputKind, ReportRequest, default_output_dir, run_report};
use valve_ingest::IngestOptions;
use valve_model::{CellValue, ReportConfig, SectionKind};

const SHEET: &str = "Herzklappen Strukturliste\n\
Stand 2026\n\
\n\
Legende: x = ja\n\
;;\n\
intern\n\
Nr.;Prozedur;Eingriff;VWD;Team;Device;KS;Tod w. Aufenth.\n\
1;05.01.2026;TAVI transfemoral;4;Team A;Evolut FX;x;\n\
2;12.01.2026;TAVI transapikal;6;Team B;Sapien 3;;\n\
3;09.02.2026;Edge-to-edge MK;3;;PASCAL Precision;ja;1\n\
;Gesamt: 3;;;;;;\n";

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .expect("timestamp")
}

fn request(input: &Path, output_dir: &Path) -> ReportRequest {
    ReportRequest {
        input: input.to_path_buf(),
        ingest: IngestOptions::default(),
        config: ReportConfig::default(),
        output_dir: output_dir.to_path_buf(),
        outputs: vec![OutputKind::Json, OutputKind::Csv],
        dry_run: false,
        generated_at: generated_at(),
    }
}

#[test]
fn report_run_writes_json_and_csv() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    fs::write(&input, SHEET).expect("write sheet");
    let output_dir = dir.path().join("out");

    let run = run_report(&request(&input, &output_dir)).expect("report run");

    assert_eq!(run.normalize.records(), 3);
    assert_eq!(run.normalize.dropped, 1);
    assert_eq!(run.report.months_elapsed, 2);
    assert_eq!(run.fingerprint.len(), 64);
    assert!(run.missing_columns.contains(&"Stroke"));
    assert_eq!(run.outputs.len(), 2);
    assert!(run.outputs.iter().all(|path| path.is_file()));

    let json_path = output_dir.join("Dashboard_18-10-2026.json");
    let document: serde_json::Value =
        serde_json::from_slice(&fs::read(&json_path).expect("read json")).expect("parse json");
    assert_eq!(document["fingerprint"], run.fingerprint.as_str());
    assert_eq!(document["months_elapsed"], 2);

    let csv = fs::read_to_string(output_dir.join("Dashboard_18-10-2026.csv")).expect("read csv");
    assert!(csv.contains("team;5. TAVI-TEAMS 2026;1;Team A;Fälle;1;NEUTRAL"));

    let referral = run
        .report
        .section(SectionKind::ClinicReferral)
        .expect("referral section");
    let total = referral.row("Gesamt").expect("total row");
    assert_eq!(total.cells[1].value, CellValue::Integer(3));
    assert_eq!(total.cells[2].value, CellValue::Integer(2));
}

#[test]
fn unmatched_labels_are_counted_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    let sheet = SHEET.replace(
        ";Gesamt: 3;",
        "4;10.02.2026;Ballonvalvuloplastie;2;;;;\n;Gesamt: 4;",
    );
    fs::write(&input, sheet).expect("write sheet");

    let mut request = request(&input, &dir.path().join("out"));
    request.dry_run = true;
    let run = run_report(&request).expect("report run");

    assert_eq!(run.normalize.records(), 4);
    assert_eq!(run.normalize.unclassified, 1);
    let trend = run
        .report
        .section(SectionKind::HistoricalTrend)
        .expect("trend section");
    assert_eq!(
        trend.cell("2026", "Gesamt").map(|cell| &cell.value),
        Some(&CellValue::Integer(4))
    );
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    fs::write(&input, SHEET).expect("write sheet");
    let output_dir = dir.path().join("out");

    let mut request = request(&input, &output_dir);
    request.dry_run = true;
    let run = run_report(&request).expect("report run");

    assert!(run.outputs.is_empty());
    assert!(!output_dir.exists());
}

#[test]
fn fingerprint_ignores_generation_time() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    fs::write(&input, SHEET).expect("write sheet");

    let mut first = request(&input, &dir.path().join("a"));
    first.dry_run = true;
    let mut second = first.clone();
    second.generated_at = generated_at() + chrono::Duration::days(3);

    let a = run_report(&first).expect("first run");
    let b = run_report(&second).expect("second run");
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_ne!(a.report.generated_label, b.report.generated_label);
}

#[test]
fn missing_required_column_fails_with_context() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    let without_label = SHEET.replace("Eingriff", "Bemerkung");
    fs::write(&input, without_label).expect("write sheet");

    let err = run_report(&request(&input, &dir.path().join("out"))).expect_err("missing column");
    let message = format!("{err:#}");
    assert!(message.contains("read procedure sheet"));
    assert!(message.contains("Eingriff"));
}

#[test]
fn sheet_without_records_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    let header_only: String = SHEET.lines().take(7).collect::<Vec<_>>().join("\n");
    fs::write(&input, header_only).expect("write sheet");

    let err = run_report(&request(&input, &dir.path().join("out"))).expect_err("no records");
    assert!(format!("{err:#}").contains("compute report"));
}

#[test]
fn output_dir_defaults_next_to_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("Daten.csv");
    fs::write(&input, SHEET).expect("write sheet");

    assert_eq!(default_output_dir(&input), dir.path().join("output"));
    assert_eq!(default_output_dir(dir.path()), dir.path().join("output"));
}
