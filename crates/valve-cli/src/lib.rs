//! CLI library components for the heart-valve KPI dashboard.

pub mod logging;
pub mod pipeline;
