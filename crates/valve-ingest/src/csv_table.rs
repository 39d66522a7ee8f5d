use csv::ReaderBuilder;
use tracing::debug;

use valve_model::{RawTable, RawValue};

use crate::error::{IngestError, Result};
use crate::schema::normalize_header;
use crate::source::SheetReader;

/// Title and legend rows above the header in the procedure workbook.
pub const DEFAULT_HEADER_SKIP: usize = 5;

const ZIP_SIGNATURE: [u8; 4] = *b"PK\x03\x04";
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Reads a sheet exported as delimited text.
///
/// The whole input is one sheet. The delimiter is detected from the first
/// lines unless set explicitly; undecodable bytes are replaced, not rejected.
/// Empty lines are dropped by the CSV parser and do not count toward the
/// header skip; rows of empty fields do.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSheetReader {
    pub delimiter: Option<u8>,
}

impl CsvSheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

impl SheetReader for CsvSheetReader {
    fn read_sheet(&self, bytes: &[u8], sheet: &str, header_skip: usize) -> Result<RawTable> {
        if bytes.starts_with(&ZIP_SIGNATURE) {
            return Err(parse_error(
                sheet,
                "input is an xlsx archive; export the sheet as CSV first",
            ));
        }
        let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(bytes, header_skip));
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(bytes);
        let mut records = reader.byte_records();
        let no_header = || IngestError::NoHeaderRow {
            sheet: sheet.to_string(),
            skipped: header_skip,
        };
        for _ in 0..header_skip {
            records
                .next()
                .ok_or_else(no_header)?
                .map_err(|error| parse_error(sheet, error))?;
        }
        let header = records
            .next()
            .ok_or_else(no_header)?
            .map_err(|error| parse_error(sheet, error))?;
        let headers: Vec<String> = header
            .iter()
            .map(|field| normalize_header(&String::from_utf8_lossy(field)))
            .collect();
        let width = headers.len();
        let mut table = RawTable::new(sheet, headers);
        let mut blank_rows = 0usize;
        for record in records {
            let record = record.map_err(|error| parse_error(sheet, error))?;
            let row: Vec<RawValue> = (0..width)
                .map(|idx| {
                    record
                        .get(idx)
                        .map_or(RawValue::Missing, |field| {
                            infer_value(&String::from_utf8_lossy(field))
                        })
                })
                .collect();
            if row.iter().all(RawValue::is_blank) {
                blank_rows += 1;
                continue;
            }
            table.push_row(row);
        }
        debug!(
            sheet,
            delimiter = %char::from(delimiter),
            columns = width,
            rows = table.rows.len(),
            blank_rows,
            "sheet read"
        );
        Ok(table)
    }
}

/// Picks `;`, tab or `,` by frequency over the header region.
///
/// Semicolons win ties because spreadsheet exports in German locales use them
/// while writing decimal commas into the cells.
pub fn detect_delimiter(bytes: &[u8], header_skip: usize) -> u8 {
    let (mut semicolons, mut commas, mut tabs) = (0usize, 0usize, 0usize);
    for line in bytes.split(|byte| *byte == b'\n').take(header_skip + 3) {
        for byte in line {
            match byte {
                b';' => semicolons += 1,
                b',' => commas += 1,
                b'\t' => tabs += 1,
                _ => {}
            }
        }
    }
    if semicolons > 0 && semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Types a text cell: blank → missing, finite number → number, else text.
pub fn infer_value(raw: &str) -> RawValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return RawValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => RawValue::Number(value),
        _ => RawValue::Text(trimmed.to_string()),
    }
}

fn parse_error(sheet: &str, message: impl ToString) -> IngestError {
    IngestError::CsvParse {
        sheet: sheet.to_string(),
        message: message.to_string(),
    }
}
