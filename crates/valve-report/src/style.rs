//! Cell style vocabulary keyed by [`Status`].

use std::collections::BTreeMap;

use serde::Serialize;

use valve_model::{CellValue, Status};

/// Visual attributes a renderer applies to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    /// Fill colour as `#RRGGBB`.
    pub background: Option<&'static str>,
    pub font_color: Option<&'static str>,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        background: None,
        font_color: None,
    };
}

/// Immutable status → style mapping handed to every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: BTreeMap<Status, CellStyle>,
}

impl StyleTable {
    /// Traffic-light palette of the dashboard workbook.
    pub fn dashboard() -> Self {
        Self::from_entries([
            (Status::Neutral, CellStyle::PLAIN),
            (
                Status::BelowTarget,
                CellStyle {
                    background: Some("#FFC7CE"),
                    font_color: Some("#9C0006"),
                },
            ),
            (
                Status::OnTarget,
                CellStyle {
                    background: Some("#C6EFCE"),
                    font_color: Some("#006100"),
                },
            ),
            (
                Status::Warn,
                CellStyle {
                    background: Some("#FFEB9C"),
                    font_color: None,
                },
            ),
        ])
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Status, CellStyle)>) -> Self {
        Self {
            styles: entries.into_iter().collect(),
        }
    }

    /// Style for `status`; statuses without an entry render plain.
    pub fn style(&self, status: Status) -> CellStyle {
        self.styles
            .get(&status)
            .copied()
            .unwrap_or(CellStyle::PLAIN)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Spreadsheet number format for a cell value.
pub fn number_format(value: &CellValue) -> Option<&'static str> {
    match value {
        CellValue::Percent(_) => Some("0.0%"),
        CellValue::Number(_) => Some("0.0"),
        CellValue::Integer(_) => Some("0"),
        CellValue::Text(_) | CellValue::Empty => None,
    }
}
