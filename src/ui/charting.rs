use itertools::{Itertools, MinMaxResult};

use crate::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (WPM) bounds for the results chart.
pub fn compute_chart_params(series: &[TimeSeriesPoint], time_limit_secs: f64) -> (f64, f64) {
    let highest_wpm = match series.iter().map(|p| p.wpm).minmax() {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(w) => w,
        MinMaxResult::MinMax(_, max) => max,
    };

    let overall_duration = series.last().map_or(time_limit_secs, |p| p.t).max(1.0);

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
