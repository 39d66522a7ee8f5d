#![deny(unsafe_code)]

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Untyped cell value as produced by a sheet reader.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Missing,
}

impl RawValue {
    /// Missing values and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Number(value) => value.is_nan(),
            RawValue::Date(_) | RawValue::DateTime(_) => false,
        }
    }

    /// Trimmed textual form, `None` when blank.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        if self.is_blank() {
            return None;
        }
        match self {
            RawValue::Text(text) => Some(Cow::Borrowed(text.trim())),
            RawValue::Number(value) => Some(Cow::Owned(format_numeric(*value))),
            RawValue::Date(date) => Some(Cow::Owned(date.format("%Y-%m-%d").to_string())),
            RawValue::DateTime(dt) => Some(Cow::Owned(dt.format("%Y-%m-%dT%H:%M:%S").to_string())),
            RawValue::Missing => None,
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

static MISSING: RawValue = RawValue::Missing;

/// One source row keyed by canonical column name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawRow {
    pub cells: BTreeMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: RawValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: RawValue) {
        self.cells.insert(column.to_string(), value);
    }

    /// Value of `column`, [`RawValue::Missing`] when the column is absent.
    pub fn get(&self, column: &str) -> &RawValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }
}

/// A sheet as read from the source workbook, header row already split off.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(sheet: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            sheet: sheet.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(RawValue::Missing.is_blank());
        assert!(RawValue::Text("  ".to_string()).is_blank());
        assert!(RawValue::Number(f64::NAN).is_blank());
        assert!(!RawValue::Number(0.0).is_blank());
    }

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(4.50), "4.5");
        assert_eq!(format_numeric(120.0), "120");
        assert_eq!(RawValue::Number(17.0).as_text().as_deref(), Some("17"));
    }

    #[test]
    fn absent_column_reads_as_missing() {
        let row = RawRow::new().with("Nr.", RawValue::Number(1.0));
        assert_eq!(row.get("Team"), &RawValue::Missing);
    }
}
