//! FILENAME: core/stats-engine/src/selector.rs
//! PURPOSE: Column Selector - which columns of a Table can be analysed.
//! CONTEXT: The choice list only ever offers numeric columns. The same guard
//! is reused by every consumer of a selection, because a selection made
//! against one upload can outlive it.

use engine::{Column, Table};

use crate::error::AnalysisError;

/// Ordered list of numeric column names. Empty when there is no table.
pub fn column_choices(table: Option<&Table>) -> Vec<String> {
    match table {
        Some(table) => table
            .numeric_column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Resolves a selection to its column, failing if the column is gone or
/// is not numeric in this table.
pub fn numeric_column<'a>(table: &'a Table, name: &str) -> Result<&'a Column, AnalysisError> {
    let column = table
        .column(name)
        .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))?;

    if !column.is_numeric() {
        return Err(AnalysisError::NotNumeric(name.to_string()));
    }

    Ok(column)
}

/// Checks a selection against an optional table.
pub fn validate_selection(table: Option<&Table>, name: &str) -> Result<(), AnalysisError> {
    let table = table.ok_or(AnalysisError::NoTable)?;
    numeric_column(table, name).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::CellValue;

    fn mixed_table() -> Table {
        Table::from_columns(vec![
            Column::new("city", vec!["Lima".into(), "Quito".into()]),
            Column::numeric("sales", &[10.0, 12.0]),
            Column::new("ok", vec![true.into(), false.into()]),
            Column::new("units", vec![3.0.into(), CellValue::Empty]),
        ])
    }

    #[test]
    fn no_table_means_no_choices() {
        assert!(column_choices(None).is_empty());
    }

    #[test]
    fn choices_skip_non_numeric_columns() {
        let table = mixed_table();
        assert_eq!(column_choices(Some(&table)), vec!["sales", "units"]);
        // Non-numeric columns remain in the table itself.
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn text_only_table_has_no_choices() {
        let table = Table::from_columns(vec![Column::new("name", vec!["a".into()])]);
        assert!(column_choices(Some(&table)).is_empty());
    }

    #[test]
    fn stale_and_mismatched_selections_fail() {
        let table = mixed_table();
        assert_eq!(
            validate_selection(Some(&table), "revenue"),
            Err(AnalysisError::ColumnNotFound("revenue".to_string()))
        );
        assert_eq!(
            validate_selection(Some(&table), "city"),
            Err(AnalysisError::NotNumeric("city".to_string()))
        );
        assert_eq!(validate_selection(None, "sales"), Err(AnalysisError::NoTable));
        assert!(validate_selection(Some(&table), "sales").is_ok());
    }
}
