use chrono::{Datelike, NaiveDate};

use crate::{ComplicationFlags, KpiCategory};

/// One validated case from the procedure sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureRecord {
    pub sequence_id: String,
    pub procedure_date: Option<NaiveDate>,
    pub raw_procedure_label: Option<String>,
    pub kpi_category: KpiCategory,
    /// Days as recorded; use [`ProcedureRecord::length_of_stay`] for statistics.
    pub length_of_stay_days: Option<f64>,
    pub team: Option<String>,
    pub device_label: Option<String>,
    pub outpatient_clinic_referral: bool,
    pub complication_flags: ComplicationFlags,
}

impl ProcedureRecord {
    pub fn new(sequence_id: impl Into<String>, kpi_category: KpiCategory) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            procedure_date: None,
            raw_procedure_label: None,
            kpi_category,
            length_of_stay_days: None,
            team: None,
            device_label: None,
            outpatient_clinic_referral: false,
            complication_flags: ComplicationFlags::default(),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.procedure_date.map(|date| date.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.procedure_date.map(|date| date.month())
    }

    pub fn is_in_year(&self, year: i32) -> bool {
        self.year() == Some(year)
    }

    /// Length of stay usable for statistics; non-positive values are unset.
    pub fn length_of_stay(&self) -> Option<f64> {
        self.length_of_stay_days.filter(|days| *days > 0.0)
    }

    pub fn device_contains(&self, needle: &str) -> bool {
        self.device_label
            .as_deref()
            .is_some_and(|label| label.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_stay_is_unset() {
        let mut record = ProcedureRecord::new("1", KpiCategory::Tavi);
        record.length_of_stay_days = Some(0.0);
        assert_eq!(record.length_of_stay(), None);
        record.length_of_stay_days = Some(-2.0);
        assert_eq!(record.length_of_stay(), None);
        record.length_of_stay_days = Some(4.0);
        assert_eq!(record.length_of_stay(), Some(4.0));
    }

    #[test]
    fn year_and_month_follow_date() {
        let mut record = ProcedureRecord::new("7", KpiCategory::Mteer);
        assert_eq!(record.year(), None);
        record.procedure_date = NaiveDate::from_ymd_opt(2026, 3, 14);
        assert_eq!(record.year(), Some(2026));
        assert_eq!(record.month(), Some(3));
        assert!(record.is_in_year(2026));
    }
}
