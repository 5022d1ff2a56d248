//! FILENAME: core/stats-engine/src/histogram.rs
//! Equal-width binning of one numeric column.

use serde::{Deserialize, Serialize};

use engine::Table;

use crate::accumulator::MomentAccumulator;
use crate::error::AnalysisError;
use crate::selector::numeric_column;

/// Number of bins the histogram view uses.
pub const DEFAULT_BINS: usize = 10;

/// Counts of a column's non-missing values per bin.
///
/// `edges` has `counts.len() + 1` entries. Bin `i` covers
/// `[edges[i], edges[i + 1])`, except the last bin which is closed so the
/// maximum is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// Midpoint of each bin, used as the bar position.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Bins `column_name` of `table` into `bins` equal-width bins spanning the
/// observed minimum to maximum.
pub fn histogram(table: &Table, column_name: &str, bins: usize) -> Result<Histogram, AnalysisError> {
    let column = numeric_column(table, column_name)?;
    let values = column.numbers();
    let bins = bins.max(1);

    let moments = MomentAccumulator::from_values(&values);
    let (lo, hi) = match (moments.min, moments.max) {
        (Some(min), Some(max)) if min < max => (min, max),
        // A single distinct value gets a unit-wide span centred on it.
        (Some(min), Some(_)) => (min - 0.5, min + 0.5),
        _ => (0.0, 1.0),
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0u64; bins];
    for value in &values {
        let index = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    log::debug!(
        target: "HISTOGRAM",
        "column={} values={} range=[{}, {}] bins={}",
        column_name,
        values.len(),
        lo,
        hi,
        bins
    );

    Ok(Histogram {
        column: column_name.to_string(),
        edges,
        counts,
    })
}
