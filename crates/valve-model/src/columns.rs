//! Column names of the procedure sheet.
//!
//! The source workbook keeps its German headers; lookups against them are
//! whitespace-normalized and case-insensitive in the ingest layer.

use crate::ComplicationCode;

/// Running case number; rows without it are not cases.
pub const SEQUENCE_ID: &str = "Nr.";
pub const PROCEDURE_DATE: &str = "Prozedur";
pub const PROCEDURE_LABEL: &str = "Eingriff";
/// Length of stay in days.
pub const LENGTH_OF_STAY: &str = "VWD";
pub const TEAM: &str = "Team";
pub const DEVICE: &str = "Device";
/// Outpatient clinic referral marker.
pub const CLINIC_REFERRAL: &str = "KS";

/// Columns without which no report can be built.
pub const REQUIRED_COLUMNS: [&str; 3] = [SEQUENCE_ID, PROCEDURE_DATE, PROCEDURE_LABEL];

/// Columns that degrade single sections when absent.
pub fn expected_columns() -> Vec<&'static str> {
    let mut columns = vec![LENGTH_OF_STAY, TEAM, DEVICE, CLINIC_REFERRAL];
    columns.extend(ComplicationCode::ALL.iter().map(|code| code.column()));
    columns
}

/// Every column the normalizer reads.
pub fn all_columns() -> Vec<&'static str> {
    let mut columns = REQUIRED_COLUMNS.to_vec();
    columns.extend(expected_columns());
    columns
}
