//! TAVI case share per team.

use std::collections::BTreeMap;

use valve_model::{Cell, CellValue, KpiCategory, Row, Section, SectionKind};

use super::{ReportScope, share};

/// Bucket for TAVI cases without a team entry.
pub const UNASSIGNED_TEAM: &str = "ohne Angabe";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamShare {
    pub team: String,
    pub cases: usize,
    pub share: f64,
}

/// Teams by descending case count, ties by name.
pub fn compute(scope: &ReportScope<'_>) -> Vec<TeamShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for record in scope.year_category(KpiCategory::Tavi) {
        let team = record.team.as_deref().unwrap_or(UNASSIGNED_TEAM);
        *counts.entry(team).or_default() += 1;
        total += 1;
    }
    let mut shares: Vec<TeamShare> = counts
        .into_iter()
        .map(|(team, cases)| TeamShare {
            team: team.to_string(),
            cases,
            share: share(cases, total),
        })
        .collect();
    // Stable: ties keep the map's name order.
    shares.sort_by(|a, b| b.cases.cmp(&a.cases));
    shares
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mut section = Section::new(
        SectionKind::Team,
        format!("TAVI-TEAMS {}", scope.report_year),
        &["Team", "Fälle", "Anteil (%)"],
    );
    for team in compute(scope) {
        section.push_row(Row::new(vec![
            Cell::text(team.team),
            Cell::count(team.cases),
            Cell::neutral(CellValue::Percent(team.share)),
        ]));
    }
    section
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::{ProcedureRecord, ReportConfig};

    use super::*;

    fn tavi(team: Option<&str>) -> ProcedureRecord {
        let mut record = ProcedureRecord::new("1", KpiCategory::Tavi);
        record.procedure_date = NaiveDate::from_ymd_opt(2026, 2, 3);
        record.team = team.map(str::to_string);
        record
    }

    #[test]
    fn ordered_by_count_then_name() {
        let records = vec![
            tavi(Some("Team B")),
            tavi(Some("Team A")),
            tavi(Some("Team C")),
            tavi(Some("Team C")),
            tavi(None),
        ];
        let config = ReportConfig::default();
        let teams = compute(&ReportScope::new(&records, &config));
        let names: Vec<&str> = teams.iter().map(|team| team.team.as_str()).collect();
        assert_eq!(names, vec!["Team C", "Team A", "Team B", UNASSIGNED_TEAM]);
        let total: f64 = teams.iter().map(|team| team.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_tavi_no_rows() {
        let mut other = tavi(Some("Team A"));
        other.kpi_category = KpiCategory::Mteer;
        let records = vec![other];
        let config = ReportConfig::default();
        assert!(compute(&ReportScope::new(&records, &config)).is_empty());
    }
}
