//! FILENAME: core/persistence/src/error.rs

use stats_engine::AnalysisError;
use thiserror::Error;

/// Failure to turn an uploaded file into a Table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Sheet has no header row")]
    MissingHeader,
}

/// Failure to produce (or read back) a report workbook.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No data loaded for the report")]
    MissingTable,

    #[error("Uploaded file could not be loaded: {0}")]
    Load(#[from] LoadError),

    #[error("No column selected for the report")]
    MissingColumn,

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid report: {0}")]
    InvalidReport(String),
}
