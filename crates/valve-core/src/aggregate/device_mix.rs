//! Device strategy ratios: Evolut share of TAVI, PASCAL share of TEER.

use valve_model::{Cell, CellValue, KpiCategory, Row, Section, SectionKind};

use super::{ReportScope, share};
use crate::status::StatusRule;

const EVOLUT: &str = "evolut";
const PASCAL: &str = "pascal";
const CLIP: &str = "clip";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMix {
    pub tavi_cases: usize,
    pub evolut: usize,
    /// Evolut cases over all TAVI cases, including those without a device.
    pub evolut_share: f64,
    pub pascal: usize,
    pub clip: usize,
    /// `pascal / (pascal + clip)` over MTEER and TTEER cases.
    pub pascal_share: f64,
}

pub fn compute(scope: &ReportScope<'_>) -> DeviceMix {
    let tavi: Vec<_> = scope.year_category(KpiCategory::Tavi).collect();
    let evolut = tavi
        .iter()
        .filter(|record| record.device_contains(EVOLUT))
        .count();

    let (mut pascal, mut clip) = (0usize, 0usize);
    for record in scope
        .year_records
        .iter()
        .filter(|record| record.kpi_category.is_teer())
    {
        // A label naming both devices counts toward both.
        pascal += usize::from(record.device_contains(PASCAL));
        clip += usize::from(record.device_contains(CLIP));
    }

    DeviceMix {
        tavi_cases: tavi.len(),
        evolut,
        evolut_share: share(evolut, tavi.len()),
        pascal,
        clip,
        pascal_share: share(pascal, pascal + clip),
    }
}

pub fn section(scope: &ReportScope<'_>) -> Section {
    let mix = compute(scope);
    let mut section = Section::new(
        SectionKind::DeviceMix,
        format!("STRATEGIE & QUALITÄT {}", scope.report_year),
        &["Kennzahl", "Wert"],
    );
    let evolut_label = format!(
        "Evolut-Anteil (Ziel {:.0}%)",
        scope.config.evolut_target * 100.0
    );
    let evolut_rule = StatusRule::evolut_share(scope.config);
    let rows = [
        metric(
            &evolut_label,
            Cell::new(
                CellValue::Percent(mix.evolut_share),
                evolut_rule.evaluate(mix.evolut_share),
            ),
        ),
        metric("Evolut-Fälle", Cell::count(mix.evolut)),
        metric("TAVI-Fälle", Cell::count(mix.tavi_cases)),
        metric(
            "PASCAL-Anteil (TEER)",
            Cell::neutral(CellValue::Percent(mix.pascal_share)),
        ),
        metric("PASCAL-Fälle", Cell::count(mix.pascal)),
        metric("Clip-Fälle", Cell::count(mix.clip)),
    ];
    for row in rows {
        section.push_row(row);
    }
    section
}

fn metric(label: &str, value: Cell) -> Row {
    Row::new(vec![Cell::text(label), value])
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use valve_model::{ProcedureRecord, ReportConfig, Status};

    use super::*;

    fn case(category: KpiCategory, device: Option<&str>) -> ProcedureRecord {
        let mut record = ProcedureRecord::new("1", category);
        record.procedure_date = NaiveDate::from_ymd_opt(2026, 5, 5);
        record.device_label = device.map(str::to_string);
        record
    }

    fn status_for(evolut: usize, total: usize) -> Status {
        let mut records: Vec<_> = (0..evolut)
            .map(|_| case(KpiCategory::Tavi, Some("Evolut PRO+")))
            .collect();
        records.extend((evolut..total).map(|_| case(KpiCategory::Tavi, None)));
        let config = ReportConfig::default();
        let scope = ReportScope::new(&records, &config);
        section(&scope)
            .cell("Evolut-Anteil (Ziel 80%)", "Wert")
            .expect("evolut cell")
            .status
    }

    #[test]
    fn evolut_thresholds() {
        assert_eq!(status_for(8, 10), Status::OnTarget);
        assert_eq!(status_for(3, 4), Status::Warn);
        assert_eq!(status_for(7, 10), Status::Warn);
        assert_eq!(status_for(6, 10), Status::BelowTarget);
        assert_eq!(status_for(0, 0), Status::BelowTarget);
    }

    #[test]
    fn pascal_share_over_teer_only() {
        let records = vec![
            case(KpiCategory::Mteer, Some("PASCAL Precision")),
            case(KpiCategory::Tteer, Some("TriClip")),
            case(KpiCategory::Mteer, Some("MitraClip G4")),
            case(KpiCategory::Tavi, Some("Pascal")),
            case(KpiCategory::Mteer, None),
        ];
        let config = ReportConfig::default();
        let mix = compute(&ReportScope::new(&records, &config));
        assert_eq!((mix.pascal, mix.clip), (1, 2));
        assert!((mix.pascal_share - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(mix.tavi_cases, 1);
        assert_eq!(mix.evolut_share, 0.0);
    }

    #[test]
    fn no_teer_devices_share_is_zero() {
        let records = vec![case(KpiCategory::Mteer, Some("Cardioband"))];
        let config = ReportConfig::default();
        assert_eq!(compute(&ReportScope::new(&records, &config)).pascal_share, 0.0);
    }
}
