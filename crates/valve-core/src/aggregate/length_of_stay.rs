//! Length-of-stay statistics per year.

use valve_model::{Cell, CellValue, Row, Section, SectionKind};

use super::{ReportScope, mean, median};
use crate::status::StatusRule;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearStay {
    pub year: i32,
    /// Median over all positive stays.
    pub median_all: f64,
    /// Mean over stays in `(0, short_stay_limit_days)`.
    pub short_mean: f64,
    pub short_median: f64,
    pub short_count: usize,
}

pub fn compute(scope: &ReportScope<'_>) -> Vec<YearStay> {
    let limit = scope.config.short_stay_limit_days;
    scope
        .config
        .los_years()
        .map(|year| {
            let stays: Vec<f64> = scope
                .in_year(year)
                .filter_map(|record| record.length_of_stay())
                .collect();
            let short: Vec<f64> = stays.iter().copied().filter(|days| *days < limit).collect();
            YearStay {
                year,
                median_all: median(&stays).unwrap_or(0.0),
                short_mean: mean(&short).unwrap_or(0.0),
                short_median: median(&short).unwrap_or(0.0),
                short_count: short.len(),
            }
        })
        .collect()
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let title = format!(
        "VERWEILDAUER (ZIEL: {} TAGE MEDIAN)",
        valve_model::format_numeric(scope.config.los_target_days)
    );
    let limit = valve_model::format_numeric(scope.config.short_stay_limit_days);
    let short_mean = format!("VWD <{limit}d (Mittel)");
    let short_median = format!("VWD <{limit}d (Med)");
    let mut section = Section::new(
        SectionKind::LengthOfStay,
        title,
        &["Jahr", "VWD Alle (Med)", short_mean.as_str(), short_median.as_str()],
    );
    let rule = StatusRule::short_stay_median(scope.config);
    for stay in compute(scope) {
        section.push_row(Row::new(vec![
            Cell::text(stay.year.to_string()),
            Cell::neutral(CellValue::Number(stay.median_all)),
            Cell::neutral(CellValue::Number(stay.short_mean)),
            Cell::new(
                CellValue::Number(stay.short_median),
                rule.evaluate(stay.short_median),
            ),
        ]));
    }
    section
}
