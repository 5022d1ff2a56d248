//! FILENAME: core/persistence/src/lib.rs
//! Estimadores Persistence Module
//!
//! Reads uploaded spreadsheets into a `Table` and writes the two-sheet
//! statistics report in XLSX format.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::{LoadError, ReportError};
pub use xlsx_reader::{check_extension, load_table, load_table_from_bytes, SUPPORTED_EXTENSIONS};
pub use xlsx_writer::{
    read_report, save_report, write_report, ReportContents, DATA_SHEET_NAME, STATS_HEADER,
    STATS_SHEET_NAME,
};
