//! The report tree handed to renderers.
//!
//! A [`ReportModel`] is an ordered list of [`Section`]s; each section is a
//! small table of [`Row`]s whose [`Cell`]s carry a value and a [`Status`].
//! Renderers decide how a status looks; the model only says which one applies.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual classification of a cell, derived from its value and rule only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Neutral,
    BelowTarget,
    OnTarget,
    Warn,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Neutral,
        Status::BelowTarget,
        Status::OnTarget,
        Status::Warn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Neutral => "NEUTRAL",
            Status::BelowTarget => "BELOW_TARGET",
            Status::OnTarget => "ON_TARGET",
            Status::Warn => "WARN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    /// Fraction in `[0, ∞)`; renderers show it as a percentage.
    Percent(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Number(value) | CellValue::Percent(value) => Some(*value),
            CellValue::Text(_) | CellValue::Empty => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value:.1}"),
            CellValue::Percent(value) => write!(f, "{:.1}%", value * 100.0),
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub status: Status,
}

impl Cell {
    pub fn new(value: CellValue, status: Status) -> Self {
        Self { value, status }
    }

    pub fn neutral(value: CellValue) -> Self {
        Self::new(value, Status::Neutral)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::neutral(CellValue::Text(text.into()))
    }

    pub fn integer(value: i64) -> Self {
        Self::neutral(CellValue::Integer(value))
    }

    pub fn count(value: usize) -> Self {
        Self::integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Text of the first cell, which every section uses as the row label.
    pub fn label(&self) -> Option<&str> {
        self.cells.first().and_then(|cell| cell.value.as_text())
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

/// Report sections in their fixed layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Performance,
    LengthOfStay,
    ClinicReferral,
    DeviceMix,
    Team,
    Complications,
    HistoricalTrend,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 7] = [
        SectionKind::Performance,
        SectionKind::LengthOfStay,
        SectionKind::ClinicReferral,
        SectionKind::DeviceMix,
        SectionKind::Team,
        SectionKind::Complications,
        SectionKind::HistoricalTrend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Performance => "performance",
            SectionKind::LengthOfStay => "length_of_stay",
            SectionKind::ClinicReferral => "clinic_referral",
            SectionKind::DeviceMix => "device_mix",
            SectionKind::Team => "team",
            SectionKind::Complications => "complications",
            SectionKind::HistoricalTrend => "historical_trend",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(kind: SectionKind, title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            kind,
            title: title.into(),
            columns: columns.iter().map(|column| (*column).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// First row whose label equals `label`.
    pub fn row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.label() == Some(label))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at (`row label`, `column name`).
    pub fn cell(&self, label: &str, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.row(label).and_then(|row| row.cell(index))
    }
}

/// Fully assembled dashboard for one report year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    pub report_year: i32,
    /// Latest month with data in the report year, shared by every section.
    pub months_elapsed: u32,
    pub generated_at: NaiveDateTime,
    /// Display stamp, e.g. `Stand: 18-10-2026`.
    pub generated_label: String,
    /// Filename-safe date, e.g. `18-10-2026`.
    pub date_token: String,
    pub sections: Vec<Section>,
}

impl ReportModel {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Suggested output file name for the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("Dashboard_{}.{extension}", self.date_token)
    }
}
