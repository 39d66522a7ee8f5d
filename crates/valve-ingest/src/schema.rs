//! Header resolution against the fixed procedure column set.

use std::collections::HashMap;

use tracing::warn;

use valve_model::{RawRow, RawTable, RawValue, columns};

use crate::error::{IngestError, Result};

/// Trim, drop byte-order marks and collapse inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn header_key(raw: &str) -> String {
    normalize_header(raw).to_uppercase()
}

/// Positions of the known columns within one sheet's header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: Vec<(&'static str, usize)>,
    missing_expected: Vec<&'static str>,
}

impl ColumnMap {
    /// Match the sheet header against the known columns.
    ///
    /// Fails when any required column is absent. Absent expected columns are
    /// logged and read as missing values for every row.
    pub fn resolve(table: &RawTable) -> Result<Self> {
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (idx, header) in table.headers.iter().enumerate() {
            lookup.entry(header_key(header)).or_insert(idx);
        }
        let mut positions = Vec::new();
        let mut missing_required = Vec::new();
        let mut missing_expected = Vec::new();
        for column in columns::REQUIRED_COLUMNS {
            match lookup.get(&header_key(column)) {
                Some(idx) => positions.push((column, *idx)),
                None => missing_required.push(column.to_string()),
            }
        }
        if !missing_required.is_empty() {
            return Err(IngestError::MissingColumns {
                sheet: table.sheet.clone(),
                columns: missing_required,
            });
        }
        for column in columns::expected_columns() {
            match lookup.get(&header_key(column)) {
                Some(idx) => positions.push((column, *idx)),
                None => missing_expected.push(column),
            }
        }
        if !missing_expected.is_empty() {
            warn!(
                sheet = %table.sheet,
                columns = %missing_expected.join(", "),
                "expected columns absent; affected statistics will be empty"
            );
        }
        Ok(Self {
            positions,
            missing_expected,
        })
    }

    pub fn missing_expected(&self) -> &[&'static str] {
        &self.missing_expected
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, idx)| *idx)
    }

    /// Key one sheet row by canonical column name.
    pub fn project(&self, row: &[RawValue]) -> RawRow {
        let mut raw = RawRow::new();
        for (column, idx) in &self.positions {
            if let Some(value) = row.get(*idx) {
                raw.insert(column, value.clone());
            }
        }
        raw
    }

    /// Consume the table into canonical rows, one per sheet row.
    pub fn into_rows(self, table: RawTable) -> impl Iterator<Item = RawRow> {
        table.rows.into_iter().map(move |row| self.project(&row))
    }
}
