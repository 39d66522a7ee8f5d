//! KPI categories used for targets, forecasts and trends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Procedure bucket a case is counted under.
///
/// Every record carries exactly one category. `Other` is the fallback for
/// labels no classification rule matches and is never targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KpiCategory {
    /// Transcatheter aortic valve implantation.
    Tavi,
    /// Mitral transcatheter edge-to-edge repair.
    Mteer,
    /// Tricuspid transcatheter edge-to-edge repair.
    Tteer,
    /// Transcatheter tricuspid valve implantation.
    Ttvi,
    /// Transcatheter tricuspid valve replacement.
    Ttvr,
    Other,
}

impl KpiCategory {
    /// Categories with a monthly target, in report row order.
    pub const TARGETED: [KpiCategory; 5] = [
        KpiCategory::Tavi,
        KpiCategory::Mteer,
        KpiCategory::Tteer,
        KpiCategory::Ttvi,
        KpiCategory::Ttvr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiCategory::Tavi => "TAVI",
            KpiCategory::Mteer => "MTEER",
            KpiCategory::Tteer => "TTEER",
            KpiCategory::Ttvi => "TTVI",
            KpiCategory::Ttvr => "TTVR",
            KpiCategory::Other => "OTHER",
        }
    }

    /// True for the mitral and tricuspid edge-to-edge repairs.
    pub fn is_teer(&self) -> bool {
        matches!(self, KpiCategory::Mteer | KpiCategory::Tteer)
    }
}

impl fmt::Display for KpiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KpiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TAVI" => Ok(KpiCategory::Tavi),
            "MTEER" => Ok(KpiCategory::Mteer),
            "TTEER" => Ok(KpiCategory::Tteer),
            "TTVI" => Ok(KpiCategory::Ttvi),
            "TTVR" => Ok(KpiCategory::Ttvr),
            "OTHER" | "SONSTIGE" => Ok(KpiCategory::Other),
            other => Err(format!("unknown KPI category: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive() {
        assert_eq!("tavi".parse::<KpiCategory>(), Ok(KpiCategory::Tavi));
        assert_eq!(" Mteer ".parse::<KpiCategory>(), Ok(KpiCategory::Mteer));
        assert_eq!("Sonstige".parse::<KpiCategory>(), Ok(KpiCategory::Other));
        assert!("valve".parse::<KpiCategory>().is_err());
    }

    #[test]
    fn targeted_excludes_other() {
        assert!(!KpiCategory::TARGETED.contains(&KpiCategory::Other));
        assert_eq!(KpiCategory::TARGETED[0], KpiCategory::Tavi);
    }
}
