//! FILENAME: tests/common/mod.rs
//! Fixture workbooks for loader and report integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tempfile::TempDir;

/// A cell written into a fixture sheet.
pub enum Fixture {
    Num(f64),
    Text(&'static str),
    Bool(bool),
    Date(f64),
    Blank,
}

/// Temporary directory holding fixture workbooks for one test.
pub struct FixtureDir {
    pub dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        FixtureDir {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a single-sheet workbook with the given header and rows.
    pub fn workbook(&self, name: &str, header: &[&str], rows: &[Vec<Fixture>]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, workbook_bytes(header, rows)).unwrap();
        path
    }

    /// Writes a workbook with a single numeric column.
    pub fn numeric_column(&self, name: &str, column: &str, values: &[f64]) -> PathBuf {
        let rows: Vec<Vec<Fixture>> = values.iter().map(|v| vec![Fixture::Num(*v)]).collect();
        self.workbook(name, &[column], &rows)
    }
}

/// Serializes a single-sheet workbook to bytes.
pub fn workbook_bytes(header: &[&str], rows: &[Vec<Fixture>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();

    for (col, title) in header.iter().enumerate() {
        if !title.is_empty() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
    }

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Fixture::Num(n) => {
                    sheet.write_number(r, c, *n).unwrap();
                }
                Fixture::Text(s) => {
                    sheet.write_string(r, c, *s).unwrap();
                }
                Fixture::Bool(b) => {
                    sheet.write_boolean(r, c, *b).unwrap();
                }
                Fixture::Date(serial) => {
                    sheet.write_number_with_format(r, c, *serial, &date_format).unwrap();
                }
                Fixture::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// A mixed sheet: text, numeric with a gap, boolean and date columns.
pub fn sales_rows() -> (Vec<&'static str>, Vec<Vec<Fixture>>) {
    let header = vec!["region", "ventas", "activo", "fecha", "unidades"];
    let rows = vec![
        vec![Fixture::Text("Norte"), Fixture::Num(120.5), Fixture::Bool(true), Fixture::Date(45292.0), Fixture::Num(3.0)],
        vec![Fixture::Text("Sur"), Fixture::Num(98.0), Fixture::Bool(false), Fixture::Date(45293.0), Fixture::Blank],
        vec![Fixture::Text("Este"), Fixture::Num(120.5), Fixture::Bool(true), Fixture::Date(45294.0), Fixture::Num(7.0)],
        vec![Fixture::Text("Oeste"), Fixture::Num(140.25), Fixture::Bool(false), Fixture::Date(45295.0), Fixture::Num(7.0)],
    ];
    (header, rows)
}
