//! FILENAME: core/stats-engine/src/statistics.rs
//! Statistics Calculator - five descriptive statistics of one column.
//!
//! Missing values are dropped before anything is computed. Values that
//! cannot be computed (mean of nothing, variance of one value) are NaN;
//! the mode of nothing is `None` and is shown through `NO_MODE`.

use serde::{Deserialize, Serialize};

use engine::Table;

use crate::accumulator::MomentAccumulator;
use crate::error::AnalysisError;
use crate::selector::numeric_column;

/// Shown in place of the mode when the column has no values.
pub const NO_MODE: &str = "Sin moda";

/// The five reported statistics, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Mean,
    Median,
    Mode,
    Variance,
    StandardDeviation,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Mode,
        Statistic::Variance,
        Statistic::StandardDeviation,
    ];

    /// Name used in the report's statistics sheet.
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Mean => "Media",
            Statistic::Median => "Mediana",
            Statistic::Mode => "Moda",
            Statistic::Variance => "Varianza",
            Statistic::StandardDeviation => "Desviación Estándar",
        }
    }

    /// Name used in the on-screen statistics block.
    pub fn display_label(self) -> &'static str {
        match self {
            Statistic::StandardDeviation => "Desviación estándar",
            other => other.label(),
        }
    }

    pub fn from_label(label: &str) -> Option<Statistic> {
        Statistic::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// A single statistic value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    /// May be NaN when the statistic is undefined for the data.
    Number(f64),
    /// No mode exists.
    Absent,
}

impl StatValue {
    pub fn as_number(self) -> Option<f64> {
        match self {
            StatValue::Number(n) if !n.is_nan() => Some(n),
            _ => None,
        }
    }
}

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Option<f64>,
    pub variance: f64,
    pub std_dev: f64,
}

impl StatisticsSummary {
    pub fn value(&self, statistic: Statistic) -> StatValue {
        match statistic {
            Statistic::Mean => StatValue::Number(self.mean),
            Statistic::Median => StatValue::Number(self.median),
            Statistic::Mode => self.mode.map_or(StatValue::Absent, StatValue::Number),
            Statistic::Variance => StatValue::Number(self.variance),
            Statistic::StandardDeviation => StatValue::Number(self.std_dev),
        }
    }

    /// The five statistics in report order.
    pub fn rows(&self) -> [(Statistic, StatValue); 5] {
        Statistic::ALL.map(|s| (s, self.value(s)))
    }
}

/// Computes the statistics of `column_name` in `table`.
pub fn describe(table: &Table, column_name: &str) -> Result<StatisticsSummary, AnalysisError> {
    let column = numeric_column(table, column_name)?;
    let mut values = column.numbers();
    values.sort_by(f64::total_cmp);

    let moments = MomentAccumulator::from_values(&values);

    log::debug!(
        target: "STATS",
        "describe column={} count={} missing={}",
        column_name,
        values.len(),
        column.len() - values.len()
    );

    Ok(StatisticsSummary {
        column: column_name.to_string(),
        count: values.len(),
        mean: moments.mean(),
        median: median_of_sorted(&values),
        mode: mode_of_sorted(&values),
        variance: moments.sample_variance(),
        std_dev: moments.sample_std_dev(),
    })
}

/// Median of ascending values, averaging the middle pair for even counts.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Most frequent of ascending values. Ties go to the smallest value.
pub fn mode_of_sorted(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;

    while i < sorted.len() {
        let value = sorted[i];
        let mut run = 1;
        while i + run < sorted.len() && sorted[i + run] == value {
            run += 1;
        }

        // Strictly greater keeps the earlier, smaller value on ties.
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        i += run;
    }

    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use engine::{CellValue, Column};

    fn single(values: &[f64]) -> Table {
        Table::from_columns(vec![Column::numeric("x", values)])
    }

    #[test]
    fn five_distinct_values() {
        let stats = describe(&single(&[1.0, 2.0, 3.0, 4.0, 5.0]), "x").unwrap();
        assert_abs_diff_eq!(stats.mean, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.median, 3.0, epsilon = 1e-12);
        assert_eq!(stats.mode, Some(1.0));
        assert_abs_diff_eq!(stats.variance, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std_dev, 1.5811, epsilon = 1e-4);
    }

    #[test]
    fn repeated_value_wins_mode() {
        let stats = describe(&single(&[2.0, 2.0, 3.0, 4.0]), "x").unwrap();
        assert_abs_diff_eq!(stats.mean, 2.75, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.median, 2.5);
        assert_eq!(stats.mode, Some(2.0));
        assert_abs_diff_eq!(stats.variance, 0.9167, epsilon = 1e-4);
        assert_abs_diff_eq!(stats.std_dev, 0.9574, epsilon = 1e-4);
    }

    #[test]
    fn mode_tie_goes_to_smallest() {
        assert_eq!(mode_of_sorted(&[1.0, 1.0, 3.0, 5.0, 5.0]), Some(1.0));
        let stats = describe(&single(&[9.0, 4.0, 9.0, 4.0, 6.0]), "x").unwrap();
        assert_eq!(stats.mode, Some(4.0));
    }

    #[test]
    fn single_value_column() {
        let stats = describe(&single(&[7.0]), "x").unwrap();
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.mode, Some(7.0));
        assert!(stats.variance.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn blank_column_has_no_mode() {
        let table = Table::from_columns(vec![Column::new(
            "x",
            vec![CellValue::Empty, CellValue::Empty],
        )]);
        let stats = describe(&table, "x").unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert_eq!(stats.mode, None);
        assert_eq!(stats.value(Statistic::Mode), StatValue::Absent);
    }

    #[test]
    fn missing_values_are_skipped() {
        let table = Table::from_columns(vec![Column::new(
            "x",
            vec![1.0.into(), CellValue::Empty, 3.0.into(), CellValue::Number(f64::NAN)],
        )]);
        let stats = describe(&table, "x").unwrap();
        assert_eq!(stats.count, 2);
        assert_abs_diff_eq!(stats.mean, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.variance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn rows_follow_report_order() {
        let stats = describe(&single(&[1.0, 2.0]), "x").unwrap();
        let labels: Vec<&str> = stats.rows().iter().map(|(s, _)| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Media", "Mediana", "Moda", "Varianza", "Desviación Estándar"]
        );
        assert_eq!(Statistic::from_label("Moda"), Some(Statistic::Mode));
        assert_eq!(Statistic::StandardDeviation.display_label(), "Desviación estándar");
    }

    #[test]
    fn unknown_or_text_column_is_rejected() {
        let table = Table::from_columns(vec![
            Column::numeric("x", &[1.0]),
            Column::new("name", vec!["a".into()]),
        ]);
        assert_eq!(
            describe(&table, "y"),
            Err(AnalysisError::ColumnNotFound("y".to_string()))
        );
        assert_eq!(
            describe(&table, "name"),
            Err(AnalysisError::NotNumeric("name".to_string()))
        );
    }
}
