//! Content hash of a report, independent of when it was generated.

use sha2::{Digest, Sha256};

use valve_model::ReportModel;

use crate::error::Result;

/// Fields derived from the generation timestamp.
const TIMESTAMP_FIELDS: [&str; 3] = ["generated_at", "generated_label", "date_token"];

/// SHA-256 (hex) of the report's canonical JSON with the timestamp fields
/// removed. Equal inputs give equal fingerprints across runs.
pub fn fingerprint(report: &ReportModel) -> Result<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(object) = value.as_object_mut() {
        for field in TIMESTAMP_FIELDS {
            object.remove(field);
        }
    }
    let canonical = serde_json::to_vec(&value)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
