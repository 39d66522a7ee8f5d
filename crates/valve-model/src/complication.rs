//! Complication indicators tracked per case.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four benchmarked complication indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplicationCode {
    /// In-hospital death.
    Mortality,
    Stroke,
    /// New pacemaker implantation.
    Pacemaker,
    /// Vascular access complication.
    Vascular,
}

impl ComplicationCode {
    pub const ALL: [ComplicationCode; 4] = [
        ComplicationCode::Mortality,
        ComplicationCode::Stroke,
        ComplicationCode::Pacemaker,
        ComplicationCode::Vascular,
    ];

    /// Source sheet column holding the indicator.
    pub fn column(&self) -> &'static str {
        match self {
            ComplicationCode::Mortality => "Tod w. Aufenth.",
            ComplicationCode::Stroke => "Stroke",
            ComplicationCode::Pacemaker => "SM_neu",
            ComplicationCode::Vascular => "Gefäß_Kom.",
        }
    }

    /// Label shown in the complications section.
    pub fn indicator(&self) -> &'static str {
        match self {
            ComplicationCode::Mortality => "Mortalität",
            ComplicationCode::Stroke => "Apoplex",
            ComplicationCode::Pacemaker => "Schrittmacher",
            ComplicationCode::Vascular => "Gefäßkompl.",
        }
    }

    fn index(self) -> usize {
        match self {
            ComplicationCode::Mortality => 0,
            ComplicationCode::Stroke => 1,
            ComplicationCode::Pacemaker => 2,
            ComplicationCode::Vascular => 3,
        }
    }
}

impl fmt::Display for ComplicationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator())
    }
}

/// Numeric indicator value per complication code; unset codes read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplicationFlags {
    values: [f64; 4],
}

impl ComplicationFlags {
    pub fn get(&self, code: ComplicationCode) -> f64 {
        self.values[code.index()]
    }

    pub fn set(&mut self, code: ComplicationCode, value: f64) {
        self.values[code.index()] = value;
    }

    #[must_use]
    pub fn with(mut self, code: ComplicationCode, value: f64) -> Self {
        self.set(code, value);
        self
    }
}
