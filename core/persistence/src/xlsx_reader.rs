//! FILENAME: core/persistence/src/xlsx_reader.rs
//! Spreadsheet Loader: first sheet of an uploaded workbook -> Table.

use calamine::{
    open_workbook_auto, open_workbook_auto_from_rs, CellErrorType, Data, Range, Reader, Sheets,
};
use engine::{format_number, CellValue, NumberFormat, Table};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::LoadError;

/// File extensions accepted as Excel workbooks.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xlsb", "xls"];

/// Text values read as missing, matching the usual dataframe defaults.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads the first sheet of the workbook at `path`.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    check_extension(path)?;
    if !path.is_file() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }

    log::debug!(target: "LOADER", "load_table path={}", path.display());
    let mut workbook = open_workbook_auto(path)?;
    read_first_sheet(&mut workbook)
}

/// Loads the first sheet of an in-memory workbook. `file_name` is the
/// original upload name and only decides whether the format is accepted.
pub fn load_table_from_bytes(bytes: &[u8], file_name: &str) -> Result<Table, LoadError> {
    check_extension(Path::new(file_name))?;

    log::debug!(target: "LOADER", "load_table_from_bytes name={} size={}", file_name, bytes.len());
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    read_first_sheet(&mut workbook)
}

/// Accepts only Excel workbook extensions, case-insensitively.
pub fn check_extension(path: &Path) -> Result<(), LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else if extension.is_empty() {
        Err(LoadError::UnsupportedFormat(path.display().to_string()))
    } else {
        Err(LoadError::UnsupportedFormat(format!(".{}", extension)))
    }
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Table, LoadError> {
    let sheet_names = workbook.sheet_names();
    let first = sheet_names.first().ok_or(LoadError::NoSheets)?;

    let range = workbook.worksheet_range(first)?;
    let table = range_to_table(&range)?;

    log::debug!(
        target: "LOADER",
        "sheet={} rows={} columns={}",
        first,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Converts a sheet range into a Table. The first row is the header.
///
/// Trailing rows whose cells are all missing are dropped: a sheet has no
/// way to store them, so the report's data sheet could not reproduce them.
pub(crate) fn range_to_table(range: &Range<Data>) -> Result<Table, LoadError> {
    if range.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let mut rows = range.rows();
    let header_row = rows.next().ok_or(LoadError::MissingHeader)?;

    let header: Vec<String> = header_row.iter().map(header_text).collect();
    if header.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::MissingHeader);
    }

    let mut data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    while data
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_missing))
    {
        data.pop();
    }

    Ok(Table::from_rows(header, data))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => format_number(*f, NumberFormat::General),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64(), NumberFormat::DateTime),
        Data::Error(e) => e.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if MISSING_MARKERS.contains(&s.as_str()) {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(CellErrorType::NA) => CellValue::Empty,
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
