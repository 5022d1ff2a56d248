//! FILENAME: tests/test_report.rs
//! Integration tests for the two-sheet statistics report.

mod common;

use approx::assert_relative_eq;
use common::{sales_rows, FixtureDir};
use persistence::{load_table, read_report, save_report, write_report, ReportError};
use stats_engine::{describe, StatValue, Statistic};

#[test]
fn test_data_sheet_round_trips() {
    let fixtures = FixtureDir::new();
    let (header, rows) = sales_rows();
    let table = load_table(&fixtures.workbook("ventas.xlsx", &header, &rows)).unwrap();

    let bytes = write_report(Some(&table), Some("ventas")).unwrap();
    let report = read_report(&bytes).unwrap();

    assert_eq!(report.data, table);
    assert_eq!(report.data.column_names(), header);
}

#[test]
fn test_trailing_missing_row_round_trips() {
    use common::Fixture::{Num, Text};

    let fixtures = FixtureDir::new();
    let path = fixtures.workbook(
        "faltantes.xlsx",
        &["x", "y"],
        &[
            vec![Num(1.0), Num(2.0)],
            vec![Num(3.0), Text("NA")],
            vec![Text("NA"), Text("NA")],
        ],
    );
    let table = load_table(&path).unwrap();
    assert_eq!(table.row_count(), 2);

    let report = read_report(&write_report(Some(&table), Some("x")).unwrap()).unwrap();
    assert_eq!(report.data, table);
}

#[test]
fn test_statistics_sheet_matches_calculator() {
    let fixtures = FixtureDir::new();
    let (header, rows) = sales_rows();
    let table = load_table(&fixtures.workbook("ventas.xlsx", &header, &rows)).unwrap();

    let expected = describe(&table, "ventas").unwrap();
    let report = read_report(&write_report(Some(&table), Some("ventas")).unwrap()).unwrap();

    assert_eq!(report.statistics.len(), 5);
    for ((statistic, read_back), (expected_stat, expected_value)) in
        report.statistics.iter().zip(expected.rows().iter())
    {
        assert_eq!(statistic, expected_stat);
        match (read_back, expected_value) {
            (StatValue::Number(a), StatValue::Number(b)) => assert_relative_eq!(*a, *b, max_relative = 1e-12),
            (a, b) => assert_eq!(a, b),
        }
    }
}

#[test]
fn test_scenario_five_values() {
    let fixtures = FixtureDir::new();
    let table = load_table(&fixtures.numeric_column("x.xlsx", "x", &[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
    let report = read_report(&write_report(Some(&table), Some("x")).unwrap()).unwrap();

    let value = |s: Statistic| {
        report
            .statistics
            .iter()
            .find(|(stat, _)| *stat == s)
            .and_then(|(_, v)| v.as_number())
            .unwrap()
    };
    assert_relative_eq!(value(Statistic::Mean), 3.0);
    assert_relative_eq!(value(Statistic::Median), 3.0);
    assert_relative_eq!(value(Statistic::Mode), 1.0);
    assert_relative_eq!(value(Statistic::Variance), 2.5, max_relative = 1e-12);
    assert_relative_eq!(value(Statistic::StandardDeviation), 1.5811388, max_relative = 1e-6);
}

#[test]
fn test_blank_column_reports_no_mode() {
    let fixtures = FixtureDir::new();
    let path = fixtures.workbook(
        "blank.xlsx",
        &["label", "x"],
        &[
            vec![common::Fixture::Text("a"), common::Fixture::Blank],
            vec![common::Fixture::Text("b"), common::Fixture::Blank],
        ],
    );
    let table = load_table(&path).unwrap();
    assert_eq!(table.numeric_column_names(), vec!["x"]);

    let report = read_report(&write_report(Some(&table), Some("x")).unwrap()).unwrap();
    assert_eq!(report.statistics[2], (Statistic::Mode, StatValue::Absent));
}

#[test]
fn test_save_report_to_disk() {
    let fixtures = FixtureDir::new();
    let table = load_table(&fixtures.numeric_column("x.xlsx", "x", &[2.0, 2.0, 3.0, 4.0])).unwrap();
    let out = fixtures.path("informe.xlsx");

    save_report(Some(&table), Some("x"), &out).unwrap();
    let report = read_report(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(report.statistics[2].1, StatValue::Number(2.0));
}

#[test]
fn test_stale_selection_fails_instead_of_writing() {
    let fixtures = FixtureDir::new();
    let table = load_table(&fixtures.numeric_column("x.xlsx", "x", &[1.0])).unwrap();
    let out = fixtures.path("informe.xlsx");

    let result = save_report(Some(&table), Some("columna_anterior"), &out);
    assert!(matches!(result, Err(ReportError::Analysis(_))));
    assert!(!out.exists());
}
