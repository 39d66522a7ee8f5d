//! Per-section aggregation over the normalized record set.
//!
//! Every aggregator reads the same [`ReportScope`], so all sections agree on
//! the report-year subset and on `months_elapsed`. Each module exposes a
//! typed `compute` step and a `section` step that turns the result into
//! status-annotated cells.

pub mod complications;
pub mod device_mix;
pub mod history;
pub mod length_of_stay;
pub mod performance;
pub mod referral;
pub mod team;

use valve_model::{KpiCategory, ProcedureRecord, ReportConfig};

/// Cross-section quantities, resolved once per run.
#[derive(Debug, Clone)]
pub struct ReportScope<'a> {
    pub records: &'a [ProcedureRecord],
    pub config: &'a ReportConfig,
    pub report_year: i32,
    /// Latest month with data in the report year; 1 when there is none.
    pub months_elapsed: u32,
    /// Records dated in the report year. Undated records never appear here.
    pub year_records: Vec<&'a ProcedureRecord>,
}

impl<'a> ReportScope<'a> {
    pub fn new(records: &'a [ProcedureRecord], config: &'a ReportConfig) -> Self {
        let report_year = config.report_year;
        let year_records: Vec<&ProcedureRecord> = records
            .iter()
            .filter(|record| record.is_in_year(report_year))
            .collect();
        let months_elapsed = months_elapsed(&year_records);
        Self {
            records,
            config,
            report_year,
            months_elapsed,
            year_records,
        }
    }

    /// Report-year records of one category.
    pub fn year_category(&self, category: KpiCategory) -> impl Iterator<Item = &'a ProcedureRecord> + '_ {
        self.year_records
            .iter()
            .copied()
            .filter(move |record| record.kpi_category == category)
    }

    /// All records dated in `year`.
    pub fn in_year(&self, year: i32) -> impl Iterator<Item = &'a ProcedureRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.is_in_year(year))
    }
}

/// Maximum month present among `records`, 1 when empty.
pub fn months_elapsed(records: &[&ProcedureRecord]) -> u32 {
    records
        .iter()
        .filter_map(|record| record.month())
        .max()
        .unwrap_or(1)
}

/// `numerator / denominator`, 0 for an empty denominator.
pub(crate) fn share(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; even-length input averages the two middle values.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
