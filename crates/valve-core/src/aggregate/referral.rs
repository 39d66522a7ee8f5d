//! Outpatient valve clinic referrals in the report year.

use valve_model::{Cell, CellValue, KpiCategory, Row, Section, SectionKind};

use super::{ReportScope, share};

pub const TOTAL_LABEL: &str = "Gesamt";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferralRow {
    /// `None` for the total over all targeted categories.
    pub category: Option<KpiCategory>,
    pub cases: usize,
    pub referred: usize,
    pub share: f64,
}

impl ReferralRow {
    fn new(category: Option<KpiCategory>, cases: usize, referred: usize) -> Self {
        Self {
            category,
            cases,
            referred,
            share: share(referred, cases),
        }
    }

    pub fn label(&self) -> &'static str {
        self.category.map_or(TOTAL_LABEL, |category| category.as_str())
    }
}

/// One row per targeted category, then the total.
pub fn compute(scope: &ReportScope<'_>) -> Vec<ReferralRow> {
    let mut rows: Vec<ReferralRow> = KpiCategory::TARGETED
        .iter()
        .map(|&category| {
            let (cases, referred) = scope
                .year_category(category)
                .fold((0, 0), |(cases, referred), record| {
                    (cases + 1, referred + usize::from(record.outpatient_clinic_referral))
                });
            ReferralRow::new(Some(category), cases, referred)
        })
        .collect();
    let cases = rows.iter().map(|row| row.cases).sum();
    let referred = rows.iter().map(|row| row.referred).sum();
    rows.push(ReferralRow::new(None, cases, referred));
    rows
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mut section = Section::new(
        SectionKind::ClinicReferral,
        format!("ZUWEISUNG KLAPPENSPRECHSTUNDE {}", scope.report_year),
        &["Kategorie", "Fälle", "KS-Zuweisung", "Anteil"],
    );
    for row in compute(scope) {
        section.push_row(Row::new(vec![
            Cell::text(row.label()),
            Cell::count(row.cases),
            Cell::count(row.referred),
            Cell::neutral(CellValue::Percent(row.share)),
        ]));
    }
    section
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::{ProcedureRecord, ReportConfig};

    use super::*;

    fn case(category: KpiCategory, referred: bool) -> ProcedureRecord {
        let mut record = ProcedureRecord::new("1", category);
        record.procedure_date = NaiveDate::from_ymd_opt(2026, 4, 2);
        record.outpatient_clinic_referral = referred;
        record
    }

    #[test]
    fn counts_referrals_per_category_and_total() {
        let records = vec![
            case(KpiCategory::Tavi, true),
            case(KpiCategory::Tavi, false),
            case(KpiCategory::Mteer, true),
            case(KpiCategory::Other, true),
        ];
        let config = ReportConfig::default();
        let scope = ReportScope::new(&records, &config);
        let rows = compute(&scope);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].share, 0.5);
        let total = rows.last().expect("total");
        assert_eq!(total.label(), TOTAL_LABEL);
        assert_eq!((total.cases, total.referred), (3, 2));
        let ttvi = rows
            .iter()
            .find(|row| row.category == Some(KpiCategory::Ttvi))
            .expect("ttvi");
        assert_eq!(ttvi.share, 0.0);
    }
}
