//! Report configuration: targets, benchmarks and year spans.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ComplicationCode, KpiCategory, ModelError, Result};

/// Reporting year used when neither the CLI nor a config file names one.
pub const DEFAULT_REPORT_YEAR: i32 = 2026;

/// Targets and thresholds driving every section of the report.
///
/// Keys missing from a TOML file keep their default values; a table that is
/// present (e.g. `[monthly_targets]`) replaces the default table as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub report_year: i32,
    /// Years in the length-of-stay table, ending at the report year.
    pub los_span_years: u32,
    /// Years in the historical trend table, ending at the report year.
    pub history_span_years: u32,
    /// Stays of this many days or more are excluded from the short-stay subset.
    pub short_stay_limit_days: f64,
    /// Short-stay median at or below this counts as on target.
    pub los_target_days: f64,
    /// Evolut share at or above this is on target.
    pub evolut_target: f64,
    /// Evolut share below this is below target; between floor and target warns.
    pub evolut_floor: f64,
    pub monthly_targets: BTreeMap<KpiCategory, u32>,
    /// Maximum acceptable complication rate per indicator.
    pub benchmarks: BTreeMap<ComplicationCode, f64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_year: DEFAULT_REPORT_YEAR,
            los_span_years: 3,
            history_span_years: 5,
            short_stay_limit_days: 21.0,
            los_target_days: 5.0,
            evolut_target: 0.8,
            evolut_floor: 0.7,
            monthly_targets: BTreeMap::from([
                (KpiCategory::Tavi, 46),
                (KpiCategory::Mteer, 10),
                (KpiCategory::Tteer, 7),
                (KpiCategory::Ttvi, 3),
                (KpiCategory::Ttvr, 1),
            ]),
            benchmarks: BTreeMap::from([
                (ComplicationCode::Mortality, 0.02),
                (ComplicationCode::Stroke, 0.015),
                (ComplicationCode::Pacemaker, 0.10),
                (ComplicationCode::Vascular, 0.05),
            ]),
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_report_year(mut self, year: i32) -> Self {
        self.report_year = year;
        self
    }

    /// Parse a TOML document; `origin` names it in error messages.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| ModelError::ConfigParse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.los_span_years == 0 {
            return Err(invalid("los_span_years must be at least 1".to_string()));
        }
        if self.history_span_years == 0 {
            return Err(invalid("history_span_years must be at least 1".to_string()));
        }
        if !(self.short_stay_limit_days > 0.0) {
            return Err(invalid("short_stay_limit_days must be positive".to_string()));
        }
        if !(self.los_target_days > 0.0) {
            return Err(invalid("los_target_days must be positive".to_string()));
        }
        if self.evolut_floor > self.evolut_target {
            return Err(invalid(format!(
                "evolut_floor {} exceeds evolut_target {}",
                self.evolut_floor, self.evolut_target
            )));
        }
        if let Some((code, value)) = self.benchmarks.iter().find(|(_, value)| **value < 0.0) {
            return Err(invalid(format!("benchmark for {code} is negative: {value}")));
        }
        Ok(())
    }

    /// Monthly target for `category`; categories without one have target 0.
    pub fn monthly_target(&self, category: KpiCategory) -> u32 {
        self.monthly_targets.get(&category).copied().unwrap_or(0)
    }

    /// Benchmark rate for `code`; a missing benchmark tolerates no events.
    pub fn benchmark(&self, code: ComplicationCode) -> f64 {
        self.benchmarks.get(&code).copied().unwrap_or(0.0)
    }

    pub fn los_years(&self) -> RangeInclusive<i32> {
        self.span_ending_at_report_year(self.los_span_years)
    }

    pub fn history_years(&self) -> RangeInclusive<i32> {
        self.span_ending_at_report_year(self.history_span_years)
    }

    fn span_ending_at_report_year(&self, years: u32) -> RangeInclusive<i32> {
        let back = i32::try_from(years.saturating_sub(1)).unwrap_or(i32::MAX);
        self.report_year.saturating_sub(back)..=self.report_year
    }
}

fn invalid(message: String) -> ModelError {
    ModelError::InvalidConfig { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_targets() {
        let config = ReportConfig::default();
        assert_eq!(config.report_year, 2026);
        assert_eq!(config.monthly_target(KpiCategory::Tavi), 46);
        assert_eq!(config.monthly_target(KpiCategory::Ttvr), 1);
        assert_eq!(config.monthly_target(KpiCategory::Other), 0);
        assert_eq!(config.benchmark(ComplicationCode::Stroke), 0.015);
        assert_eq!(config.los_years(), 2024..=2026);
        assert_eq!(config.history_years(), 2022..=2026);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn spans_follow_report_year() {
        let config = ReportConfig::default().with_report_year(2021);
        assert!(config.validate().is_ok());
        assert_eq!(config.los_years(), 2019..=2021);
        assert_eq!(config.history_years(), 2017..=2021);
    }

    #[test]
    fn empty_span_is_invalid() {
        let config = ReportConfig {
            los_span_years: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_inverted_evolut_thresholds() {
        let mut config = ReportConfig::default();
        config.evolut_floor = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig { .. })
        ));
    }
}
