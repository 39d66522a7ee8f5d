//! Chart description attached to the historical trend section.

use serde::Serialize;

use valve_model::{ReportModel, Section, SectionKind};

use crate::error::{RenderError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Multi-series column chart over the trend table.
///
/// The first column provides the category axis; every further column is one
/// series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub section: SectionKind,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn from_report(report: &ReportModel) -> Result<Self> {
        let section = report
            .section(SectionKind::HistoricalTrend)
            .ok_or(RenderError::MissingSection {
                section: SectionKind::HistoricalTrend.as_str(),
            })?;
        Ok(Self::from_section(section))
    }

    pub fn from_section(section: &Section) -> Self {
        let categories = section
            .rows
            .iter()
            .map(|row| row.label().unwrap_or_default().to_string())
            .collect();
        let series = section
            .columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, name)| ChartSeries {
                name: name.clone(),
                values: section
                    .rows
                    .iter()
                    .map(|row| {
                        row.cell(idx)
                            .and_then(|cell| cell.value.as_f64())
                            .unwrap_or(0.0)
                    })
                    .collect(),
            })
            .collect();
        Self {
            title: section.title.clone(),
            section: section.kind,
            categories,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use valve_model::{Cell, Row};

    use super::*;

    #[test]
    fn series_per_count_column() {
        let mut section = Section::new(
            SectionKind::HistoricalTrend,
            "7. HISTORISCHE ENTWICKLUNG",
            &["Jahr", "TAVI", "TEER"],
        );
        section.push_row(Row::new(vec![
            Cell::text("2025"),
            Cell::integer(410),
            Cell::integer(150),
        ]));
        section.push_row(Row::new(vec![
            Cell::text("2026"),
            Cell::integer(380),
            Cell::integer(171),
        ]));
        let chart = ChartSpec::from_section(&section);
        assert_eq!(chart.categories, vec!["2025", "2026"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "TAVI");
        assert_eq!(chart.series[1].values, vec![150.0, 171.0]);
    }
}
