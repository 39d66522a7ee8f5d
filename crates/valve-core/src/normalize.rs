//! Raw sheet rows to typed procedure records.
//!
//! Normalization never fails as a whole. A row without a case number is
//! dropped; a cell that cannot be coerced becomes an absent value.

use std::borrow::Cow;

use tracing::debug;

use valve_model::{
    ComplicationCode, ComplicationFlags, KpiCategory, ProcedureRecord, RawRow, RawValue, columns,
};

use crate::classify::classify;
use crate::datetime::{parse_number, parse_procedure_date};

const REFERRAL_TOKENS: [&str; 3] = ["x", "1", "ja"];

/// Counters collected while normalizing one sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub rows_seen: usize,
    /// Rows without a case number.
    pub dropped: usize,
    /// Non-blank cells that could not be read as their column's type.
    pub coerced_cells: usize,
    /// Records whose procedure label matched no category.
    pub unclassified: usize,
}

impl NormalizeSummary {
    pub fn records(&self) -> usize {
        self.rows_seen - self.dropped
    }
}

/// Normalize one row; `None` when the row has no case number.
pub fn normalize_row(row: &RawRow) -> Option<ProcedureRecord> {
    normalize_counted(row).map(|(record, _)| record)
}

/// Record plus the number of cells that fell back to absent.
fn normalize_counted(row: &RawRow) -> Option<(ProcedureRecord, usize)> {
    let sequence_id = row.get(columns::SEQUENCE_ID).as_text()?.into_owned();
    let mut coerced = 0usize;

    let date_cell = row.get(columns::PROCEDURE_DATE);
    let procedure_date = parse_procedure_date(date_cell);
    if procedure_date.is_none() && !date_cell.is_blank() {
        coerced += 1;
    }

    let raw_procedure_label = text_cell(row.get(columns::PROCEDURE_LABEL));
    let kpi_category = classify(raw_procedure_label.as_deref());

    let stay_cell = row.get(columns::LENGTH_OF_STAY);
    let length_of_stay_days = parse_number(stay_cell);
    if length_of_stay_days.is_none() && !stay_cell.is_blank() {
        coerced += 1;
    }

    let mut complication_flags = ComplicationFlags::default();
    for code in ComplicationCode::ALL {
        let cell = row.get(code.column());
        match parse_number(cell) {
            Some(value) => complication_flags.set(code, value),
            None if !cell.is_blank() => coerced += 1,
            None => {}
        }
    }

    let record = ProcedureRecord {
        sequence_id,
        procedure_date,
        raw_procedure_label,
        kpi_category,
        length_of_stay_days,
        team: text_cell(row.get(columns::TEAM)),
        device_label: text_cell(row.get(columns::DEVICE)),
        outpatient_clinic_referral: is_referral(row.get(columns::CLINIC_REFERRAL)),
        complication_flags,
    };
    Some((record, coerced))
}

fn text_cell(value: &RawValue) -> Option<String> {
    value.as_text().map(Cow::into_owned)
}

/// `x`, `1` and `ja` mark a referral; anything else does not.
fn is_referral(value: &RawValue) -> bool {
    value.as_text().is_some_and(|text| {
        let lowered = text.to_lowercase();
        REFERRAL_TOKENS.contains(&lowered.as_str())
    })
}

/// Lazy, single-pass normalization over raw rows.
///
/// Counters are available through [`RecordNormalizer::summary`] once the
/// iterator has been drained.
#[derive(Debug)]
pub struct RecordNormalizer<I> {
    rows: I,
    summary: NormalizeSummary,
}

impl<I> RecordNormalizer<I>
where
    I: Iterator<Item = RawRow>,
{
    pub fn new(rows: I) -> Self {
        Self {
            rows,
            summary: NormalizeSummary::default(),
        }
    }

    pub fn summary(&self) -> NormalizeSummary {
        self.summary
    }
}

impl<I> Iterator for RecordNormalizer<I>
where
    I: Iterator<Item = RawRow>,
{
    type Item = ProcedureRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            self.summary.rows_seen += 1;
            match normalize_counted(&row) {
                Some((record, coerced)) => {
                    self.summary.coerced_cells += coerced;
                    if record.kpi_category == KpiCategory::Other {
                        self.summary.unclassified += 1;
                        debug!(row = self.summary.rows_seen, "procedure label matched no category");
                    }
                    return Some(record);
                }
                None => {
                    self.summary.dropped += 1;
                    debug!(row = self.summary.rows_seen, "row without case number dropped");
                }
            }
        }
        None
    }
}

/// Normalize every row, returning the records and the counters.
pub fn normalize_rows<I>(rows: I) -> (Vec<ProcedureRecord>, NormalizeSummary)
where
    I: IntoIterator<Item = RawRow>,
{
    let mut normalizer = RecordNormalizer::new(rows.into_iter());
    let records: Vec<ProcedureRecord> = normalizer.by_ref().collect();
    (records, normalizer.summary())
}
