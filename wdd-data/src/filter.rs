//! Range filters over a [`DerivedTable`].
//!
//! Each dashboard page owns one selection kind:
//!
//! - day-of-year span (overview): `start <= day_of_year <= end`, both ends
//!   taken from the days observed in the data
//! - month set (reservoir): month label in the chosen subset
//! - quarter set (rainfall): quarter in the chosen subset of 1-4
//! - month span (groundwater): `start <= month_number <= end`
//!
//! The month span compares month numbers only. On data covering several
//! years, "Jan".."Mar" keeps January through March of every year present.
//!
//! Filtering always yields a new table; rows keep their original order.

use crate::error::SelectionError;
use crate::selectors::SelectorOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use wdd_core::calendar::month_number;
use wdd_core::constants::{MONTH_LABELS, QUARTERS};
use wdd_core::derived::{DerivedRecord, DerivedTable};

/// Which family of filter a selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    DayOfYearSpan,
    MonthSet,
    QuarterSet,
    MonthSpan,
}

impl SelectionKind {
    /// Noun for one selectable unit, used in prompts.
    pub fn unit_name(&self) -> &'static str {
        match self {
            SelectionKind::DayOfYearSpan => "day",
            SelectionKind::MonthSet | SelectionKind::MonthSpan => "month",
            SelectionKind::QuarterSet => "quarter",
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionKind::DayOfYearSpan => "day-of-year span",
            SelectionKind::MonthSet => "month set",
            SelectionKind::QuarterSet => "quarter set",
            SelectionKind::MonthSpan => "month span",
        };
        f.write_str(name)
    }
}

/// One user selection, exactly as the selector widgets report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeSelection {
    DayOfYearSpan { start: u32, end: u32 },
    MonthSet { months: Vec<String> },
    QuarterSet { quarters: Vec<u32> },
    MonthSpan { start: String, end: String },
}

/// Selection resolved to month/quarter numbers. Unknown labels and
/// out-of-range quarters are dropped here; [`RangeSelection::validate`]
/// is what reports them.
enum Predicate {
    Days(u32, u32),
    Months(BTreeSet<u32>),
    Quarters(BTreeSet<u32>),
    MonthSpan(Option<u32>, Option<u32>),
}

impl Predicate {
    fn accepts(&self, row: &DerivedRecord) -> bool {
        match self {
            Predicate::Days(start, end) => *start <= row.day_of_year && row.day_of_year <= *end,
            Predicate::Months(months) => months.contains(&row.month_number),
            Predicate::Quarters(quarters) => quarters.contains(&row.quarter),
            Predicate::MonthSpan(Some(start), Some(end)) => {
                *start <= row.month_number && row.month_number <= *end
            }
            Predicate::MonthSpan(_, _) => false,
        }
    }
}

impl RangeSelection {
    pub fn kind(&self) -> SelectionKind {
        match self {
            RangeSelection::DayOfYearSpan { .. } => SelectionKind::DayOfYearSpan,
            RangeSelection::MonthSet { .. } => SelectionKind::MonthSet,
            RangeSelection::QuarterSet { .. } => SelectionKind::QuarterSet,
            RangeSelection::MonthSpan { .. } => SelectionKind::MonthSpan,
        }
    }

    /// The widest selection of `kind`: every observed day, every month,
    /// every quarter. None for a day span over a table with no rows.
    pub fn full(kind: SelectionKind, options: &SelectorOptions) -> Option<Self> {
        let all_months = || MONTH_LABELS.iter().map(|m| m.to_string());
        match kind {
            SelectionKind::DayOfYearSpan => {
                let start = options.day_of_year.first()?.day_of_year;
                let end = options.day_of_year.last()?.day_of_year;
                Some(RangeSelection::DayOfYearSpan { start, end })
            }
            SelectionKind::MonthSet => Some(RangeSelection::MonthSet {
                months: all_months().collect(),
            }),
            SelectionKind::QuarterSet => Some(RangeSelection::QuarterSet {
                quarters: QUARTERS.to_vec(),
            }),
            SelectionKind::MonthSpan => Some(RangeSelection::MonthSpan {
                start: MONTH_LABELS[0].to_string(),
                end: MONTH_LABELS[MONTH_LABELS.len() - 1].to_string(),
            }),
        }
    }

    fn predicate(&self) -> Predicate {
        match self {
            RangeSelection::DayOfYearSpan { start, end } => Predicate::Days(*start, *end),
            RangeSelection::MonthSet { months } => {
                Predicate::Months(months.iter().filter_map(|m| month_number(m)).collect())
            }
            RangeSelection::QuarterSet { quarters } => Predicate::Quarters(
                quarters
                    .iter()
                    .copied()
                    .filter(|q| QUARTERS.contains(q))
                    .collect(),
            ),
            RangeSelection::MonthSpan { start, end } => {
                Predicate::MonthSpan(month_number(start), month_number(end))
            }
        }
    }

    /// Whether a single row falls inside the selection. An empty month or
    /// quarter set matches nothing.
    pub fn matches(&self, row: &DerivedRecord) -> bool {
        self.predicate().accepts(row)
    }

    /// Keep the matching rows without validating the selection first.
    /// An empty month or quarter set gives an empty table.
    pub fn filter_rows(&self, table: &DerivedTable) -> DerivedTable {
        let predicate = self.predicate();
        table.retain_matching(|row| predicate.accepts(row))
    }

    /// Check that the selection is meaningful for `table`.
    pub fn validate(&self, table: &DerivedTable) -> Result<(), SelectionError> {
        match self {
            RangeSelection::DayOfYearSpan { start, end } => {
                if start > end {
                    return Err(SelectionError::ReversedSpan {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                let observed: BTreeSet<u32> = table.iter().map(|r| r.day_of_year).collect();
                for day in [start, end] {
                    if !observed.contains(day) {
                        return Err(SelectionError::UnobservedDay(*day));
                    }
                }
                Ok(())
            }
            RangeSelection::MonthSet { months } => {
                if months.is_empty() {
                    return Err(SelectionError::EmptySet(SelectionKind::MonthSet));
                }
                match months.iter().find(|m| month_number(m).is_none()) {
                    Some(unknown) => Err(SelectionError::UnknownMonth(unknown.clone())),
                    None => Ok(()),
                }
            }
            RangeSelection::QuarterSet { quarters } => {
                if quarters.is_empty() {
                    return Err(SelectionError::EmptySet(SelectionKind::QuarterSet));
                }
                match quarters.iter().find(|q| !QUARTERS.contains(*q)) {
                    Some(q) => Err(SelectionError::QuarterOutOfRange(*q)),
                    None => Ok(()),
                }
            }
            RangeSelection::MonthSpan { start, end } => {
                let lo = month_number(start)
                    .ok_or_else(|| SelectionError::UnknownMonth(start.clone()))?;
                let hi =
                    month_number(end).ok_or_else(|| SelectionError::UnknownMonth(end.clone()))?;
                if lo > hi {
                    return Err(SelectionError::ReversedSpan {
                        start: start.clone(),
                        end: end.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Validate, then filter. The source table is never modified.
    pub fn apply(&self, table: &DerivedTable) -> Result<DerivedTable, SelectionError> {
        self.validate(table)?;
        let filtered = self.filter_rows(table);
        log::debug!(
            "[WDD Debug] filter: {} kept {} of {} rows",
            self.kind(),
            filtered.len(),
            table.len()
        );
        Ok(filtered)
    }
}
