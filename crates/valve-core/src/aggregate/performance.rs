//! Monthly case counts against targets, with a run-rate forecast.

use valve_model::{Cell, CellValue, KpiCategory, Row, Section, SectionKind};

use super::ReportScope;
use crate::status::StatusRule;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mrz", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

/// Performance of one targeted category in the report year.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPerformance {
    pub category: KpiCategory,
    pub monthly_target: u32,
    /// Case count per calendar month, January first.
    pub monthly: [usize; 12],
    pub ytd: usize,
    pub forecast: u64,
    pub yearly_target: u64,
    pub achievement: f64,
}

/// Year-end projection from the cases so far.
///
/// Halves round to the nearest even number.
pub fn forecast(ytd: usize, months_elapsed: u32) -> u64 {
    let months = f64::from(months_elapsed.max(1));
    let projected = (ytd as f64 / months * 12.0).round_ties_even();
    projected as u64
}

/// Forecast over yearly target; 0 when there is no target.
pub fn achievement_ratio(forecast: u64, yearly_target: u64) -> f64 {
    if yearly_target == 0 {
        0.0
    } else {
        forecast as f64 / yearly_target as f64
    }
}

pub fn compute(scope: &ReportScope<'_>) -> Vec<CategoryPerformance> {
    KpiCategory::TARGETED
        .iter()
        .map(|&category| {
            let mut monthly = [0usize; 12];
            for record in scope.year_category(category) {
                if let Some(month) = record.month() {
                    monthly[(month - 1) as usize] += 1;
                }
            }
            let ytd = monthly.iter().sum();
            let monthly_target = scope.config.monthly_target(category);
            let forecast = forecast(ytd, scope.months_elapsed);
            let yearly_target = u64::from(monthly_target) * 12;
            CategoryPerformance {
                category,
                monthly_target,
                monthly,
                ytd,
                forecast,
                yearly_target,
                achievement: achievement_ratio(forecast, yearly_target),
            }
        })
        .collect()
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mut columns = vec!["Kategorie"];
    columns.extend(MONTH_LABELS);
    columns.extend(["YTD", "Prognose", "Soll", "Erreichung"]);
    let mut section = Section::new(
        SectionKind::Performance,
        format!("LEISTUNGSZAHLEN & PROGNOSE {}", scope.report_year),
        &columns,
    );
    for performance in compute(scope) {
        let mut cells = vec![Cell::text(performance.category.as_str())];
        for (idx, count) in performance.monthly.iter().enumerate() {
            let month = idx as u32 + 1;
            let rule =
                StatusRule::monthly_target(performance.monthly_target, month, scope.months_elapsed);
            cells.push(Cell::new(
                CellValue::Integer(*count as i64),
                rule.evaluate(*count as f64),
            ));
        }
        cells.push(Cell::count(performance.ytd));
        cells.push(Cell::integer(performance.forecast as i64));
        cells.push(Cell::integer(performance.yearly_target as i64));
        cells.push(Cell::neutral(CellValue::Percent(performance.achievement)));
        section.push_row(Row::new(cells));
    }
    section
}
