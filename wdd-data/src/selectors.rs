//! Values offered by each page's range selector.

use serde::Serialize;
use std::collections::BTreeMap;
use wdd_core::calendar::day_label;
use wdd_core::constants::{MONTH_LABELS, QUARTERS};
use wdd_core::derived::DerivedTable;

/// One stop on the day-of-year slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOfYearOption {
    pub day_of_year: u32,
    /// "Mon DD" of the first row (in table order) with this day of year
    pub label: String,
}

/// Everything the presentation layer needs to draw the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOptions {
    /// Observed days of year, ascending
    pub day_of_year: Vec<DayOfYearOption>,
    /// The twelve month labels, Jan to Dec
    pub months: Vec<&'static str>,
    pub quarters: Vec<u32>,
}

impl SelectorOptions {
    pub fn from_table(table: &DerivedTable) -> Self {
        let mut days: BTreeMap<u32, String> = BTreeMap::new();
        for row in table {
            days.entry(row.day_of_year)
                .or_insert_with(|| day_label(&row.record.date));
        }
        Self {
            day_of_year: days
                .into_iter()
                .map(|(day_of_year, label)| DayOfYearOption { day_of_year, label })
                .collect(),
            months: MONTH_LABELS.to_vec(),
            quarters: QUARTERS.to_vec(),
        }
    }

    /// Display label for a day of year, "Day N" when it was never observed.
    pub fn day_label(&self, day_of_year: u32) -> String {
        self.day_of_year
            .binary_search_by_key(&day_of_year, |o| o.day_of_year)
            .map(|i| self.day_of_year[i].label.clone())
            .unwrap_or_else(|_| format!("Day {}", day_of_year))
    }
}
