//! Locating, opening and resolving the procedure sheet.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use valve_model::{RawRow, RawTable};

use crate::csv_table::DEFAULT_HEADER_SKIP;
use crate::error::{IngestError, Result};
use crate::schema::ColumnMap;
use crate::source::{SheetReader, WorkbookDecryptor};

/// Sheet holding one row per procedure.
pub const DEFAULT_SHEET: &str = "Daten";

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub sheet: String,
    /// Rows above the header row.
    pub header_skip: usize,
    pub password: Option<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            header_skip: DEFAULT_HEADER_SKIP,
            password: None,
        }
    }
}

/// A resolved procedure sheet, ready for normalization.
#[derive(Debug, Clone)]
pub struct ProcedureSheet {
    pub source: PathBuf,
    pub columns: ColumnMap,
    pub table: RawTable,
}

impl ProcedureSheet {
    pub fn row_count(&self) -> usize {
        self.table.rows.len()
    }

    pub fn into_rows(self) -> impl Iterator<Item = RawRow> {
        self.columns.into_rows(self.table)
    }
}

/// Resolve `sheet` inside `path`.
///
/// A file is taken as the sheet itself. A directory is treated as an
/// exported workbook with one `<sheet>.csv` per sheet; the name matches
/// case-insensitively.
pub fn locate_sheet(path: &Path, sheet: &str) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let candidate = entry.path();
        if !candidate.is_file() {
            continue;
        }
        let is_csv = candidate
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let stem_matches = candidate
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.trim().eq_ignore_ascii_case(sheet.trim()));
        if is_csv && stem_matches {
            candidates.push(candidate);
        }
    }
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| IngestError::MissingSheet {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
        })
}

/// Read, decrypt, parse and resolve the procedure sheet at `path`.
pub fn read_procedure_sheet(
    path: &Path,
    options: &IngestOptions,
    decryptor: &dyn WorkbookDecryptor,
    reader: &dyn SheetReader,
) -> Result<ProcedureSheet> {
    let source = locate_sheet(path, &options.sheet)?;
    let blob = std::fs::read(&source).map_err(|source_error| IngestError::FileRead {
        path: source.clone(),
        source: source_error,
    })?;
    debug!(path = %source.display(), bytes = blob.len(), "input read");
    let bytes = decryptor.decrypt(options.password.as_deref(), blob)?;
    let table = reader.read_sheet(&bytes, &options.sheet, options.header_skip)?;
    let columns = ColumnMap::resolve(&table)?;
    info!(
        sheet = %options.sheet,
        rows = table.rows.len(),
        columns = table.headers.len(),
        "procedure sheet resolved"
    );
    Ok(ProcedureSheet {
        source,
        columns,
        table,
    })
}
