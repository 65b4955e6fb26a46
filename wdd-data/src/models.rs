//! Chart data model structs.
//!
//! All structs derive `Serialize` so a charting front end can consume them as
//! JSON. The page charts plot raw measurements; the clipped reservoir value
//! feeds their metrics instead.

use chrono::NaiveDate;
use serde::Serialize;

/// A (series, date, value) triple for daily line charts.
///
/// Each point names the measurement it belongs to, so a single vector can
/// draw one line per measurement on the same chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesDateValue {
    /// Column name as it appears in the source file, e.g. "GW Level".
    pub series: &'static str,
    pub date: NaiveDate,
    pub value: f64,
}

/// Five-number summary of one calendar month, for box plots.
///
/// Quartiles use linear interpolation between order statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyBoxStats {
    pub month_number: u32,
    pub month_label: &'static str,
    /// Number of rows in the month.
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Mean value for one (day-of-month, month) cell of a seasonal heatmap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapCell {
    /// Day of the month (1-31).
    pub day: u32,
    pub month_number: u32,
    pub month_label: &'static str,
    pub value: f64,
}
