//! FILENAME: core/stats-engine/src/chart.rs
//! Histogram Renderer - turns a binned column into embeddable chart markup.
//!
//! The markup is an inline HTML fragment (a `<div>` plus the script that
//! draws it) meant to be dropped into a page that already loads plotly.js.

use plotly::common::Title;
use plotly::layout::{Axis, Layout};
use plotly::{Bar, Plot};

use crate::histogram::Histogram;

/// Element id of the rendered chart. Fixed so the same histogram always
/// renders to the same markup.
pub const CHART_ELEMENT_ID: &str = "histogram";

/// Script tag that loads plotly.js for pages embedding the chart.
pub const PLOTLY_SCRIPT_URL: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

pub fn chart_title(column: &str) -> String {
    format!("Distribución de {}", column)
}

/// Builds the plot: one bar per bin at the bin midpoint, no gaps, so it
/// reads as a histogram over the column's range.
pub fn histogram_plot(histogram: &Histogram) -> Plot {
    let trace = Bar::new(histogram.centers(), histogram.counts.clone()).name(&histogram.column);

    let layout = Layout::new()
        .title(Title::with_text(chart_title(&histogram.column)))
        .x_axis(Axis::new().title(Title::with_text(histogram.column.as_str())))
        .y_axis(Axis::new().title(Title::with_text("count")))
        .bar_gap(0.0);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Renders the histogram as an inline HTML fragment.
pub fn render_histogram(histogram: &Histogram) -> String {
    histogram_plot(histogram).to_inline_html(Some(CHART_ELEMENT_ID))
}
