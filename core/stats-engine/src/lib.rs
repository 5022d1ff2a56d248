//! FILENAME: core/stats-engine/src/lib.rs
//! Column analysis for loaded tables.
//!
//! Depends on `engine` only for the Table model. Every entry point takes the
//! table and the column name explicitly and keeps no state between calls.
//!
//! Layers:
//! - `selector`: which columns can be analysed (the choice list)
//! - `statistics`: mean, median, mode, variance, standard deviation
//! - `histogram`: equal-width binning
//! - `chart`: embeddable markup for a binned column

mod accumulator;
pub mod chart;
pub mod error;
pub mod histogram;
pub mod selector;
pub mod statistics;

pub use chart::{chart_title, histogram_plot, render_histogram, CHART_ELEMENT_ID, PLOTLY_SCRIPT_URL};
pub use error::AnalysisError;
pub use histogram::{histogram, Histogram, DEFAULT_BINS};
pub use selector::{column_choices, numeric_column, validate_selection};
pub use statistics::{describe, StatValue, Statistic, StatisticsSummary, NO_MODE};
