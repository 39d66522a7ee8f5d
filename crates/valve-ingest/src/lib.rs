//! Procedure sheet ingestion.
//!
//! Turns an input file into raw rows keyed by the canonical column names:
//! locate the sheet, decrypt the bytes, parse the sheet, resolve headers.

pub mod csv_table;
pub mod error;
pub mod schema;
pub mod source;
pub mod workbook;

pub use csv_table::{CsvSheetReader, DEFAULT_HEADER_SKIP, detect_delimiter, infer_value};
pub use error::{IngestError, Result};
pub use schema::{ColumnMap, normalize_header};
pub use source::{PassthroughDecryptor, SheetReader, WorkbookDecryptor};
pub use workbook::{DEFAULT_SHEET, IngestOptions, ProcedureSheet, locate_sheet, read_procedure_sheet};
