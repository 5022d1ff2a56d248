//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the shell integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use app_lib::{router, ServerState, SharedState};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// A cell written into a fixture sheet.
pub enum Cell {
    Num(f64),
    Text(&'static str),
    Blank,
}

/// Test harness holding the server state and a scratch directory.
pub struct TestHarness {
    pub state: SharedState,
    pub dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            state: Arc::new(ServerState::default()),
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a fixture workbook into the scratch directory.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Serves the router on an ephemeral port and returns its base URL.
    pub async fn spawn_server(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(self.state.clone(), 1024 * 1024);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

/// Single-sheet workbook bytes.
pub fn workbook_bytes(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32 + 1, c as u16);
            match cell {
                Cell::Num(n) => {
                    sheet.write_number(r, c, *n).unwrap();
                }
                Cell::Text(s) => {
                    sheet.write_string(r, c, *s).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// One numeric column.
pub fn numeric_workbook(column: &str, values: &[f64]) -> Vec<u8> {
    let rows: Vec<Vec<Cell>> = values.iter().map(|v| vec![Cell::Num(*v)]).collect();
    workbook_bytes(&[column], &rows)
}

/// Scenario A data next to a text column and a second numeric column.
pub fn scenario_a_workbook() -> Vec<u8> {
    let labels = ["a", "b", "c", "d", "e"];
    let rows: Vec<Vec<Cell>> = (0..5)
        .map(|i| {
            vec![
                Cell::Text(labels[i]),
                Cell::Num((i + 1) as f64),
                Cell::Num(10.0 * (i + 1) as f64),
            ]
        })
        .collect();
    workbook_bytes(&["nombre", "x", "y"], &rows)
}

/// Only text columns.
pub fn text_only_workbook() -> Vec<u8> {
    workbook_bytes(
        &["region", "codigo"],
        &[
            vec![Cell::Text("Norte"), Cell::Text("N1")],
            vec![Cell::Text("Sur"), Cell::Blank],
        ],
    )
}
