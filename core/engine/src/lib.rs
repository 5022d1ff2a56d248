//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the table engine.
//! CONTEXT: Re-exports the Table model shared by the loader, the statistics
//! engine and the report writer.

pub mod cell;
pub mod number_format;
pub mod table;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use number_format::{format_number, NumberFormat};
pub use table::{normalize_header_names, Column, ColumnKind, Table};
