//! Section ordering and report-level metadata.

use chrono::NaiveDateTime;
use tracing::debug;

use valve_model::{ProcedureRecord, ReportConfig, ReportModel, Section, SectionKind};

use crate::aggregate::{
    ReportScope, complications, device_mix, history, length_of_stay, performance, referral, team,
};
use crate::error::Result;

/// Display stamp shown next to the report title.
pub fn generated_label(generated_at: NaiveDateTime) -> String {
    format!("Stand: {}", date_token(generated_at))
}

/// `DD-MM-YYYY`; safe for file names.
pub fn date_token(generated_at: NaiveDateTime) -> String {
    generated_at.format("%d-%m-%Y").to_string()
}

fn build_section(kind: SectionKind, scope: &ReportScope<'_>) -> Section {
    match kind {
        SectionKind::Performance => performance::section(scope),
        SectionKind::LengthOfStay => length_of_stay::section(scope),
        SectionKind::ClinicReferral => referral::section(scope),
        SectionKind::DeviceMix => device_mix::section(scope),
        SectionKind::Team => team::section(scope),
        SectionKind::Complications => complications::section(scope),
        SectionKind::HistoricalTrend => history::section(scope),
    }
}

/// Build the full report from normalized records.
///
/// The output depends only on `records`, `config` and `generated_at`. An
/// empty record set yields a zero-filled report.
pub fn assemble_report(
    records: &[ProcedureRecord],
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<ReportModel> {
    config.validate()?;
    let scope = ReportScope::new(records, config);
    debug!(
        report_year = scope.report_year,
        year_records = scope.year_records.len(),
        months_elapsed = scope.months_elapsed,
        "report scope resolved"
    );

    let sections = SectionKind::ORDER
        .iter()
        .enumerate()
        .map(|(idx, &kind)| {
            let mut section = build_section(kind, &scope);
            section.title = format!("{}. {}", idx + 1, section.title);
            section
        })
        .collect();

    Ok(ReportModel {
        report_year: scope.report_year,
        months_elapsed: scope.months_elapsed,
        generated_at,
        generated_label: generated_label(generated_at),
        date_token: date_token(generated_at),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::ModelError;

    use super::*;
    use crate::ReportError;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .expect("timestamp")
    }

    #[test]
    fn date_strings() {
        assert_eq!(date_token(at()), "18-10-2026");
        assert_eq!(generated_label(at()), "Stand: 18-10-2026");
    }

    #[test]
    fn sections_in_layout_order() {
        let report = assemble_report(&[], &ReportConfig::default(), at()).expect("report");
        let kinds: Vec<SectionKind> = report.sections.iter().map(|section| section.kind).collect();
        assert_eq!(kinds, SectionKind::ORDER.to_vec());
        assert_eq!(report.sections[0].title, "1. LEISTUNGSZAHLEN & PROGNOSE 2026");
        assert_eq!(report.sections[6].title, "7. HISTORISCHE ENTWICKLUNG");
        assert_eq!(report.months_elapsed, 1);
        assert_eq!(report.file_name("json"), "Dashboard_18-10-2026.json");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ReportConfig::default();
        config.los_span_years = 0;
        let err = assemble_report(&[], &config, at()).expect_err("invalid");
        assert!(matches!(
            err,
            ReportError::InvalidConfig(ModelError::InvalidConfig { .. })
        ));
    }
}
