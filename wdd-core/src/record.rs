//! Daily records and the CSV loader that produces them.
//!
//! # CSV Format
//!
//! Header row required; columns are located by name so their order does not
//! matter and extra columns are ignored:
//!
//! ```text
//! date,Reservoir,GW Level,Rainfall
//! 2023-01-01,0.42,-3.25,0.0
//! ```

use crate::calendar::parse_date;
use crate::constants::{DATE_COLUMN, GROUNDWATER_COLUMN, RAINFALL_COLUMN, RESERVOIR_COLUMN};
use crate::date_range::DateRange;
use crate::error::{LoadError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One day of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    /// Reservoir storage in percent. May sit below the dead storage floor.
    pub reservoir: f64,
    /// Groundwater level in meters (signed)
    pub groundwater_level: f64,
    /// Rainfall in millimeters
    pub rainfall: f64,
}

/// Ordered, immutable sequence of records as read from the source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    records: Vec<Record>,
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    reservoir: usize,
    groundwater: usize,
    rainfall: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            date: find(DATE_COLUMN)?,
            reservoir: find(RESERVOIR_COLUMN)?,
            groundwater: find(GROUNDWATER_COLUMN)?,
            rainfall: find(RAINFALL_COLUMN)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<Record> {
        let raw_date = row.get(self.date).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;
        Ok(Record {
            date,
            reservoir: parse_real(row, self.reservoir, RESERVOIR_COLUMN, line)?,
            groundwater_level: parse_real(row, self.groundwater, GROUNDWATER_COLUMN, line)?,
            rainfall: parse_real(row, self.rainfall, RAINFALL_COLUMN, line)?,
        })
    }
}

fn parse_real(row: &StringRecord, index: usize, column: &'static str, line: u64) -> Result<f64> {
    let raw = row.get(index).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::InvalidNumber {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

impl Table {
    /// Build a table from records already in memory. Order is kept as given.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Read and parse the dataset at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_csv_str(&contents)?;
        log::info!(
            "[WDD Debug] loader: Loaded {} records from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse the dataset from a CSV string.
    ///
    /// Rows must all have the header's column count. Every row needs a
    /// `YYYY-MM-DD` date and finite reals in the numeric columns.
    pub fn from_csv_str(csv_data: &str) -> Result<Self> {
        if csv_data.trim().is_empty() {
            return Err(LoadError::Empty);
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_data.as_bytes());

        let columns = ColumnIndex::from_headers(rdr.headers()?)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            records.push(columns.parse_row(&row, line)?);
        }
        if records.is_empty() {
            return Err(LoadError::NoRecords);
        }

        let table = Self::from_records(records);
        table.log_irregularities();
        Ok(table)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest dates present, regardless of row order.
    pub fn date_span(&self) -> Option<DateRange> {
        DateRange::covering(self.records.iter().map(|r| &r.date))
    }

    fn unique_dates(&self) -> BTreeSet<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Calendar days inside [`Self::date_span`] with no record. Gaps are
    /// reported only; they are never interpolated.
    ///
    /// The result grows with the width of the gaps, not the row count; use
    /// [`Self::missing_day_count`] when only the number is needed.
    pub fn missing_dates(&self) -> Vec<NaiveDate> {
        let present = self.unique_dates();
        present
            .iter()
            .zip(present.iter().skip(1))
            .flat_map(|(prev, next)| {
                let next = *next;
                DateRange(*prev, next).skip(1).take_while(move |d| *d < next)
            })
            .collect()
    }

    /// Number of calendar days inside [`Self::date_span`] with no record.
    /// Walks the distinct dates only.
    pub fn missing_day_count(&self) -> i64 {
        let present = self.unique_dates();
        present
            .iter()
            .zip(present.iter().skip(1))
            .map(|(prev, next)| next.signed_duration_since(*prev).num_days() - 1)
            .sum()
    }

    /// Dates that occur on more than one row, in calendar order.
    pub fn duplicate_dates(&self) -> Vec<NaiveDate> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for record in &self.records {
            if !seen.insert(record.date) {
                duplicates.insert(record.date);
            }
        }
        duplicates.into_iter().collect()
    }

    fn log_irregularities(&self) {
        let duplicates = self.duplicate_dates();
        if !duplicates.is_empty() {
            log::warn!(
                "[WDD Debug] loader: {} dates appear more than once (first: {})",
                duplicates.len(),
                duplicates[0]
            );
        }
        if log::log_enabled!(log::Level::Debug) {
            let missing = self.missing_day_count();
            if missing > 0 {
                log::debug!(
                    "[WDD Debug] loader: {} calendar days absent between first and last record",
                    missing
                );
            }
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "date,Reservoir,GW Level,Rainfall\n";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_basic_csv() {
        let csv = "\
date,Reservoir,GW Level,Rainfall
2023-01-01,0.42,-3.25,0.0
2023-01-02,0.41,-3.30,12.5
";
        let table = Table::from_csv_str(csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].date, ymd(2023, 1, 1));
        assert!((table.records()[1].rainfall - 12.5).abs() < 1e-9);
        assert!((table.records()[0].groundwater_level - (-3.25)).abs() < 1e-9);
    }

    #[test]
    fn columns_located_by_name_and_extras_ignored() {
        let csv = "\
Rainfall,note,GW Level,date,Reservoir
3.0,wet,-1.0,2023-05-01,0.5
";
        let table = Table::from_csv_str(csv).unwrap();
        let record = table.records()[0];
        assert_eq!(record.date, ymd(2023, 5, 1));
        assert!((record.reservoir - 0.5).abs() < 1e-9);
        assert!((record.rainfall - 3.0).abs() < 1e-9);
    }

    #[test]
    fn file_order_is_preserved() {
        let csv = format!("{HEADER}2023-01-03,0.1,1,1\n2023-01-01,0.2,2,2\n2023-01-02,0.3,3,3\n");
        let table = Table::from_csv_str(&csv).unwrap();
        let dates: Vec<NaiveDate> = table.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2023, 1, 3), ymd(2023, 1, 1), ymd(2023, 1, 2)]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Table::from_csv_str(""), Err(LoadError::Empty)));
        assert!(matches!(Table::from_csv_str("  \n"), Err(LoadError::Empty)));
    }

    #[test]
    fn header_only_is_rejected() {
        assert!(matches!(Table::from_csv_str(HEADER), Err(LoadError::NoRecords)));
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "date,Reservoir,Rainfall\n2023-01-01,0.4,1.0\n";
        match Table::from_csv_str(csv) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, GROUNDWATER_COLUMN),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn inconsistent_column_count_is_rejected() {
        let csv = format!("{HEADER}2023-01-01,0.4,-2.0,1.0\n2023-01-02,0.4,-2.0\n");
        match Table::from_csv_str(&csv) {
            Err(LoadError::InconsistentColumns { expected, found, .. }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected InconsistentColumns, got {:?}", other),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let csv = format!("{HEADER}01/02/2023,0.4,-2.0,1.0\n");
        match Table::from_csv_str(&csv) {
            Err(LoadError::InvalidDate { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "01/02/2023");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn bad_number_is_rejected() {
        let csv = format!("{HEADER}2023-01-01,0.4,abc,1.0\n");
        match Table::from_csv_str(&csv) {
            Err(LoadError::InvalidNumber { column, value, .. }) => {
                assert_eq!(column, GROUNDWATER_COLUMN);
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
        let nan = format!("{HEADER}2023-01-01,NaN,-1.0,1.0\n");
        assert!(matches!(
            Table::from_csv_str(&nan),
            Err(LoadError::InvalidNumber { column: RESERVOIR_COLUMN, .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Table::load("/nonexistent/wdd/Data.csv").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("wdd-core-load-{}.csv", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            write!(file, "{HEADER}2023-02-01,0.3,-1.5,4.0\n").unwrap();
        }
        let table = Table::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].date, ymd(2023, 2, 1));
    }

    #[test]
    fn gaps_and_duplicates_are_reported_not_fixed() {
        let csv = format!(
            "{HEADER}2023-01-01,0.1,1,1\n2023-01-04,0.1,1,1\n2023-01-04,0.2,1,1\n"
        );
        let table = Table::from_csv_str(&csv).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.duplicate_dates(), vec![ymd(2023, 1, 4)]);
        assert_eq!(table.missing_dates(), vec![ymd(2023, 1, 2), ymd(2023, 1, 3)]);
        assert_eq!(table.missing_day_count(), 2);
    }

    #[test]
    fn far_apart_dates_load_without_walking_the_span() {
        let csv = format!("{HEADER}0001-01-01,0.1,1,1\n9999-12-31,0.1,1,1\n");
        let started = std::time::Instant::now();
        let table = Table::from_csv_str(&csv).unwrap();
        let expected = ymd(9999, 12, 31).signed_duration_since(ymd(1, 1, 1)).num_days() - 1;
        assert_eq!(table.missing_day_count(), expected);
        assert!(started.elapsed() < std::time::Duration::from_millis(200));
        assert_eq!(table.len(), 2);
    }
}
