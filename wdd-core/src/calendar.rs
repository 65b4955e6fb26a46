//! Calendar helpers: month labels, quarters and date formatting.

use crate::constants::{DATE_FORMAT, DAY_LABEL_FORMAT, MONTH_LABELS};
use chrono::{Datelike, NaiveDate};

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Label used by the day-of-year selector, e.g. "Mar 07".
pub fn day_label(date: &NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

/// Three-letter label for a month number (1 = "Jan").
pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LABELS.get(index).copied()
}

/// Month number (1-12) for a three-letter label. Matching is exact.
pub fn month_number(label: &str) -> Option<u32> {
    MONTH_LABELS
        .iter()
        .position(|m| *m == label)
        .map(|i| i as u32 + 1)
}

/// Calendar quarter (1-4) of a month number: `ceil(month / 3)`.
pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

/// Ordinal day within the year, 1 = January 1st.
pub fn day_of_year(date: &NaiveDate) -> u32 {
    date.ordinal()
}
