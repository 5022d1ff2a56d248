//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The in-memory Table: an ordered list of named, typed columns.
//! CONTEXT: A Table is built fresh from every upload. Columns are stored
//! densely (one value per row) because uploaded sheets are rectangular and
//! every consumer walks whole columns.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cell::CellValue;

/// The inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-missing value is a number. A column whose rows are all
    /// blank is also numeric.
    Numeric,
    /// At least one text, boolean or date/time value, or no rows at all.
    Text,
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for a fully numeric column.
    pub fn numeric(name: impl Into<String>, values: &[f64]) -> Self {
        Column::new(name, values.iter().map(|n| CellValue::Number(*n)).collect())
    }

    /// Infers the column type from its values.
    pub fn kind(&self) -> ColumnKind {
        if self.values.is_empty() {
            return ColumnKind::Text;
        }

        let all_numbers = self
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .all(|v| matches!(v, CellValue::Number(_)));

        if all_numbers {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    /// Non-missing numeric values, in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_number).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The Table struct holds one loaded sheet.
/// All columns have the same length (`row_count`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Creates a new, empty Table.
    pub fn new() -> Self {
        Table {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Builds a Table from a header row and data rows.
    /// Header names are made unique (see `normalize_header_names`); rows
    /// shorter than the header are padded with `Empty`, longer rows are cut.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let names = normalize_header_names(&header);
        let row_count = rows.len();

        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().unwrap_or_default());
            }
        }

        Table { columns, row_count }
    }

    /// Builds a Table from columns. Shorter columns are padded with `Empty`.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column);
        }
        table
    }

    /// Appends a column, padding either side so all columns stay the same length.
    pub fn push_column(&mut self, mut column: Column) {
        if column.len() > self.row_count {
            self.row_count = column.len();
            for existing in &mut self.columns {
                existing.values.resize(self.row_count, CellValue::Empty);
            }
        }
        column.values.resize(self.row_count, CellValue::Empty);
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of numeric columns, in source order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns one row as references into each column.
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }
}

/// Makes raw header cells usable as column names.
/// - A blank header becomes `Unnamed: <index>`.
/// - A repeated header gets a numeric suffix: `x`, `x.1`, `x.2`, ...
pub fn normalize_header_names(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for (index, header) in raw.iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header.clone()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}
