//! Calendar fields and the clipped reservoir value derived from each record.
//!
//! Derivation is pure: it reads only `date` and `reservoir`, never touches the
//! source [`Table`], and re-deriving an already derived table yields the same
//! values.

use crate::calendar::{day_of_year, month_label, quarter_of};
use crate::constants::{DEAD_STORAGE_THRESHOLD, MONTH_LABELS};
use crate::record::{Record, Table};
use chrono::Datelike;
use serde::Serialize;

/// Clamp a reservoir percentage up to the dead storage floor.
pub fn clip_reservoir(value: f64) -> f64 {
    if value < DEAD_STORAGE_THRESHOLD {
        DEAD_STORAGE_THRESHOLD
    } else {
        value
    }
}

/// A record together with the fields every page filters and groups on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRecord {
    #[serde(flatten)]
    pub record: Record,
    /// 1-366
    pub day_of_year: u32,
    /// 1-12
    pub month_number: u32,
    /// "Jan" .. "Dec"
    pub month_label: &'static str,
    /// 1-4
    pub quarter: u32,
    /// `max(reservoir, DEAD_STORAGE_THRESHOLD)`; for metrics only
    pub reservoir_clipped: f64,
}

impl From<Record> for DerivedRecord {
    fn from(record: Record) -> Self {
        let month_number = record.date.month();
        DerivedRecord {
            record,
            day_of_year: day_of_year(&record.date),
            month_number,
            // chrono months are always 1-12
            month_label: month_label(month_number).unwrap_or(MONTH_LABELS[0]),
            quarter: quarter_of(month_number),
            reservoir_clipped: clip_reservoir(record.reservoir),
        }
    }
}

/// A table whose rows carry derived fields. Filtering produces new
/// `DerivedTable`s; none of them alias each other.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedTable {
    rows: Vec<DerivedRecord>,
}

impl DerivedTable {
    pub fn from_table(table: &Table) -> Self {
        Self {
            rows: table.iter().copied().map(DerivedRecord::from).collect(),
        }
    }

    /// Recompute every derived field from the underlying records.
    pub fn rederive(&self) -> Self {
        Self::from_table(&self.to_table())
    }

    /// The plain records, in row order.
    pub fn to_table(&self) -> Table {
        Table::from_records(self.rows.iter().map(|r| r.record).collect())
    }

    /// New table holding the rows that satisfy `keep`, in their original order.
    pub fn retain_matching<F>(&self, keep: F) -> Self
    where
        F: Fn(&DerivedRecord) -> bool,
    {
        Self {
            rows: self.rows.iter().filter(|r| keep(r)).copied().collect(),
        }
    }

    /// Copy of this table ordered by date. Ties keep their row order.
    pub fn sorted_by_date(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.record.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[DerivedRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivedRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<DerivedRecord> for DerivedTable {
    fn from_iter<I: IntoIterator<Item = DerivedRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DerivedTable {
    type Item = &'a DerivedRecord;
    type IntoIter = std::slice::Iter<'a, DerivedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
