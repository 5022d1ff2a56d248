//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value held by a single spreadsheet cell.
//! CONTEXT: Values come from uploaded workbooks and are written back verbatim
//! into reports, so every kind the reader can produce has a variant here.
//! Spreadsheet error literals (`#DIV/0!`) are read as text.

use serde::{Deserialize, Serialize};

use crate::number_format::{format_number, NumberFormat};

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Excel serial date: whole days since 1899-12-30, fraction is time of day.
    DateTime(f64),
}

impl CellValue {
    /// True for blank cells and for numbers that are NaN.
    /// Missing values are skipped by every statistic.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Returns the number if this is a non-missing numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n, NumberFormat::General),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            CellValue::DateTime(serial) => format_number(*serial, NumberFormat::DateTime),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}
