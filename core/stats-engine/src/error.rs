//! FILENAME: core/stats-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No data loaded")]
    NoTable,

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column is not numeric: {0}")]
    NotNumeric(String),
}
