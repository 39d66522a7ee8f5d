//! Multi-year case counts for the trend chart.

use valve_model::{Cell, KpiCategory, Row, Section, SectionKind};

use super::ReportScope;

pub const YEAR_COLUMN: &str = "Jahr";
pub const SERIES_COLUMNS: [&str; 3] = ["TAVI", "TEER", "Gesamt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCounts {
    pub year: i32,
    pub tavi: usize,
    /// MTEER and TTEER together.
    pub teer: usize,
    pub total: usize,
}

pub fn compute(scope: &ReportScope<'_>) -> Vec<YearCounts> {
    scope
        .config
        .history_years()
        .map(|year| {
            let mut counts = YearCounts {
                year,
                tavi: 0,
                teer: 0,
                total: 0,
            };
            for record in scope.in_year(year) {
                counts.total += 1;
                if record.kpi_category == KpiCategory::Tavi {
                    counts.tavi += 1;
                } else if record.kpi_category.is_teer() {
                    counts.teer += 1;
                }
            }
            counts
        })
        .collect()
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mut columns = vec![YEAR_COLUMN];
    columns.extend(SERIES_COLUMNS);
    let mut section = Section::new(
        SectionKind::HistoricalTrend,
        "HISTORISCHE ENTWICKLUNG",
        &columns,
    );
    for counts in compute(scope) {
        section.push_row(Row::new(vec![
            Cell::text(counts.year.to_string()),
            Cell::count(counts.tavi),
            Cell::count(counts.teer),
            Cell::count(counts.total),
        ]));
    }
    section
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::{ProcedureRecord, ReportConfig};

    use super::*;

    fn case(category: KpiCategory, year: i32) -> ProcedureRecord {
        let mut record = ProcedureRecord::new("1", category);
        record.procedure_date = NaiveDate::from_ymd_opt(year, 3, 1);
        record
    }

    #[test]
    fn counts_per_history_year() {
        let records = vec![
            case(KpiCategory::Tavi, 2022),
            case(KpiCategory::Mteer, 2022),
            case(KpiCategory::Tteer, 2023),
            case(KpiCategory::Other, 2023),
            case(KpiCategory::Tavi, 2021),
            ProcedureRecord::new("9", KpiCategory::Tavi),
        ];
        let config = ReportConfig::default();
        let years = compute(&ReportScope::new(&records, &config));
        assert_eq!(years.len(), 5);
        assert_eq!(
            years[0],
            YearCounts {
                year: 2022,
                tavi: 1,
                teer: 1,
                total: 2
            }
        );
        assert_eq!((years[1].teer, years[1].total), (1, 2));
        assert!(years[2..].iter().all(|year| year.total == 0));
    }
}
