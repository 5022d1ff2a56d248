//! FILENAME: core/persistence/src/xlsx_writer.rs
//! Report Writer: the loaded Table plus its column statistics as a two-sheet
//! workbook, and the matching reader used to check a written report.

use calamine::{Data, Reader, Xlsx};
use engine::{CellValue, Table};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use stats_engine::{describe, StatValue, Statistic, StatisticsSummary, NO_MODE};
use std::io::Cursor;
use std::path::Path;

use crate::xlsx_reader::range_to_table;
use crate::ReportError;

/// Sheet 1: the uploaded data, verbatim.
pub const DATA_SHEET_NAME: &str = "Datos Originales";
/// Sheet 2: one row per statistic.
pub const STATS_SHEET_NAME: &str = "Estadísticas";
/// Header row of the statistics sheet.
pub const STATS_HEADER: [&str; 2] = ["Estadística", "Valor"];

const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// A report read back from its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContents {
    pub data: Table,
    pub statistics: Vec<(Statistic, StatValue)>,
}

/// Builds the report workbook for `column` of `table` and returns its bytes.
/// Fails instead of producing a partial workbook when either input is
/// missing or the column is not a numeric column of the table.
pub fn write_report(table: Option<&Table>, column: Option<&str>) -> Result<Vec<u8>, ReportError> {
    let table = table.ok_or(ReportError::MissingTable)?;
    let column = column
        .filter(|c| !c.trim().is_empty())
        .ok_or(ReportError::MissingColumn)?;

    let summary = describe(table, column)?;
    let mut workbook = build_workbook(table, &summary)?;
    let bytes = workbook.save_to_buffer()?;

    log::debug!(
        target: "REPORT",
        "column={} rows={} columns={} bytes={}",
        column,
        table.row_count(),
        table.column_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Writes the report to `path`.
pub fn save_report(table: Option<&Table>, column: Option<&str>, path: &Path) -> Result<(), ReportError> {
    let bytes = write_report(table, column)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn build_workbook(table: &Table, summary: &StatisticsSummary) -> Result<Workbook, ReportError> {
    let mut xlsx = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let date_format = Format::new().set_num_format(DATE_TIME_FORMAT);

    let data_sheet = xlsx.add_worksheet();
    data_sheet.set_name(DATA_SHEET_NAME)?;
    write_data_sheet(data_sheet, table, &header_format, &date_format)?;

    let stats_sheet = xlsx.add_worksheet();
    stats_sheet.set_name(STATS_SHEET_NAME)?;
    write_stats_sheet(stats_sheet, summary, &header_format)?;

    Ok(xlsx)
}

fn write_data_sheet(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
    date_format: &Format,
) -> Result<(), XlsxError> {
    for (index, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string_with_format(0, col, &column.name, header_format)?;

        for (row_index, value) in column.values.iter().enumerate() {
            let row = u32::try_from(row_index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            match value {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    // Non-finite numbers have no Excel representation; leave them blank.
                    if n.is_finite() {
                        worksheet.write_number(row, col, *n)?;
                    }
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(row, col, *serial, date_format)?;
                }
            }
        }
    }
    Ok(())
}

fn write_stats_sheet(
    worksheet: &mut Worksheet,
    summary: &StatisticsSummary,
    header_format: &Format,
) -> Result<(), XlsxError> {
    for (col, title) in STATS_HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, header_format)?;
    }

    for (index, (statistic, value)) in summary.rows().iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, statistic.label())?;
        match value {
            StatValue::Number(n) if n.is_finite() => {
                worksheet.write_number(row, 1, *n)?;
            }
            // Undefined statistics stay blank.
            StatValue::Number(_) => {}
            StatValue::Absent => {
                worksheet.write_string(row, 1, NO_MODE)?;
            }
        }
    }
    Ok(())
}

/// Reads both sheets of a report produced by `write_report`.
pub fn read_report(bytes: &[u8]) -> Result<ReportContents, ReportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ReportError::InvalidReport(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names != [DATA_SHEET_NAME, STATS_SHEET_NAME] {
        return Err(ReportError::InvalidReport(format!(
            "unexpected sheets: {}",
            sheet_names.join(", ")
        )));
    }

    let data_range = workbook
        .worksheet_range(DATA_SHEET_NAME)
        .map_err(|e| ReportError::InvalidReport(e.to_string()))?;
    let data = range_to_table(&data_range).map_err(|e| ReportError::InvalidReport(e.to_string()))?;

    let stats_range = workbook
        .worksheet_range(STATS_SHEET_NAME)
        .map_err(|e| ReportError::InvalidReport(e.to_string()))?;

    let mut statistics = Vec::with_capacity(Statistic::ALL.len());
    for row in stats_range.rows().skip(1) {
        let label = match row.first() {
            Some(Data::String(s)) => s.as_str(),
            _ => return Err(ReportError::InvalidReport("statistic row without a name".to_string())),
        };
        let statistic = Statistic::from_label(label)
            .ok_or_else(|| ReportError::InvalidReport(format!("unknown statistic: {}", label)))?;

        let value = match row.get(1) {
            Some(Data::Float(f)) => StatValue::Number(*f),
            Some(Data::Int(i)) => StatValue::Number(*i as f64),
            Some(Data::String(s)) if s == NO_MODE => StatValue::Absent,
            None | Some(Data::Empty) => StatValue::Number(f64::NAN),
            Some(other) => {
                return Err(ReportError::InvalidReport(format!(
                    "unexpected value for {}: {:?}",
                    label, other
                )))
            }
        };
        statistics.push((statistic, value));
    }

    Ok(ReportContents { data, statistics })
}
