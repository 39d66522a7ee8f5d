//! Complication rates of the report year against benchmarks.

use valve_model::{Cell, CellValue, ComplicationCode, Row, Section, SectionKind};

use super::ReportScope;
use crate::status::StatusRule;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplicationRate {
    pub code: ComplicationCode,
    /// Sum of the indicator over report-year records.
    pub events: f64,
    pub rate: f64,
    pub benchmark: f64,
}

/// `events / cases`, 0 when there are no cases.
pub fn rate(events: f64, cases: usize) -> f64 {
    if cases == 0 {
        0.0
    } else {
        events / cases as f64
    }
}

pub fn compute(scope: &ReportScope<'_>) -> Vec<ComplicationRate> {
    let cases = scope.year_records.len();
    ComplicationCode::ALL
        .iter()
        .map(|&code| {
            let events: f64 = scope
                .year_records
                .iter()
                .map(|record| record.complication_flags.get(code))
                .sum();
            ComplicationRate {
                code,
                events,
                rate: rate(events, cases),
                benchmark: scope.config.benchmark(code),
            }
        })
        .collect()
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mut section = Section::new(
        SectionKind::Complications,
        format!("KOMPLIKATIONEN {}", scope.report_year),
        &["Indikator", "Ereignisse", "Rate", "Benchmark"],
    );
    for complication in compute(scope) {
        let rule = StatusRule::complication_rate(complication.benchmark);
        section.push_row(Row::new(vec![
            Cell::text(complication.code.indicator()),
            Cell::neutral(CellValue::Number(complication.events)),
            Cell::new(
                CellValue::Percent(complication.rate),
                rule.evaluate(complication.rate),
            ),
            Cell::neutral(CellValue::Percent(complication.benchmark)),
        ]));
    }
    section
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::{KpiCategory, ProcedureRecord, ReportConfig, Status};

    use super::*;

    fn case(year: i32, stroke: f64) -> ProcedureRecord {
        let mut record = ProcedureRecord::new("1", KpiCategory::Tavi);
        record.procedure_date = NaiveDate::from_ymd_opt(year, 7, 7);
        record.complication_flags.set(ComplicationCode::Stroke, stroke);
        record
    }

    #[test]
    fn rate_over_report_year_cases() {
        let mut records: Vec<_> = (0..99).map(|_| case(2026, 0.0)).collect();
        records.push(case(2026, 1.0));
        records.push(case(2025, 1.0));
        let config = ReportConfig::default();
        let scope = ReportScope::new(&records, &config);
        let section = section(&scope);
        let stroke = section.cell("Apoplex", "Rate").expect("stroke");
        assert_eq!(stroke.value, CellValue::Percent(0.01));
        assert_eq!(stroke.status, Status::OnTarget);
        let mortality = section.cell("Mortalität", "Rate").expect("mortality");
        assert_eq!(mortality.value, CellValue::Percent(0.0));
    }

    #[test]
    fn no_cases_rate_zero() {
        assert_eq!(rate(3.0, 0), 0.0);
        let records: Vec<ProcedureRecord> = Vec::new();
        let config = ReportConfig::default();
        let rates = compute(&ReportScope::new(&records, &config));
        assert!(rates.iter().all(|rate| rate.rate == 0.0));
    }

    #[test]
    fn above_benchmark_is_below_target() {
        let records = vec![case(2026, 1.0), case(2026, 0.0)];
        let config = ReportConfig::default();
        let section = section(&ReportScope::new(&records, &config));
        let stroke = section.cell("Apoplex", "Rate").expect("stroke");
        assert_eq!(stroke.status, Status::BelowTarget);
    }
}
