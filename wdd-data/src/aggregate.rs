//! Summary statistics over a filtered table.
//!
//! Every statistic refuses an empty table with [`EmptyRangeError`]: there is
//! no mean of zero rows and no extremum to look up. Extrema report the date
//! of the first row, in table order, that attains them.

use crate::error::EmptyRangeError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use wdd_core::calendar::month_label;
use wdd_core::derived::{DerivedRecord, DerivedTable};

/// A numeric column of the derived table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Reservoir,
    ReservoirClipped,
    GroundwaterLevel,
    Rainfall,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Reservoir => "reservoir",
            Field::ReservoirClipped => "reservoir_clipped",
            Field::GroundwaterLevel => "groundwater_level",
            Field::Rainfall => "rainfall",
        }
    }

    /// Unit suffix shown next to values of this field.
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Reservoir | Field::ReservoirClipped => "%",
            Field::GroundwaterLevel => "m",
            Field::Rainfall => "mm",
        }
    }

    pub fn value(&self, row: &DerivedRecord) -> f64 {
        match self {
            Field::Reservoir => row.record.reservoir,
            Field::ReservoirClipped => row.reservoir_clipped,
            Field::GroundwaterLevel => row.record.groundwater_level,
            Field::Rainfall => row.record.rainfall,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How rows in one month partition collapse to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    Sum,
    Mean,
}

/// An extreme value and the date it was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub value: f64,
    pub date: NaiveDate,
}

/// One calendar month's reduced value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyValue {
    pub month_number: u32,
    pub month_label: &'static str,
    pub value: f64,
}

fn non_empty(table: &DerivedTable) -> Result<&[DerivedRecord], EmptyRangeError> {
    if table.is_empty() {
        Err(EmptyRangeError)
    } else {
        Ok(table.rows())
    }
}

pub fn sum(table: &DerivedTable, field: Field) -> Result<f64, EmptyRangeError> {
    let rows = non_empty(table)?;
    Ok(rows.iter().map(|r| field.value(r)).sum())
}

pub fn mean(table: &DerivedTable, field: Field) -> Result<f64, EmptyRangeError> {
    let rows = non_empty(table)?;
    Ok(sum(table, field)? / rows.len() as f64)
}

/// Scan in row order; a later row replaces the best only when strictly
/// better, so ties keep the earliest row.
fn extremum<F>(table: &DerivedTable, field: Field, better: F) -> Result<Extremum, EmptyRangeError>
where
    F: Fn(f64, f64) -> bool,
{
    let rows = non_empty(table)?;
    let first = &rows[0];
    let mut best = Extremum {
        value: field.value(first),
        date: first.record.date,
    };
    for row in &rows[1..] {
        let value = field.value(row);
        if better(value, best.value) {
            best = Extremum {
                value,
                date: row.record.date,
            };
        }
    }
    Ok(best)
}

pub fn min(table: &DerivedTable, field: Field) -> Result<Extremum, EmptyRangeError> {
    extremum(table, field, |candidate, best| candidate < best)
}

pub fn max(table: &DerivedTable, field: Field) -> Result<Extremum, EmptyRangeError> {
    extremum(table, field, |candidate, best| candidate > best)
}

/// Partition rows by month number and reduce each partition. The result
/// holds only months that have rows, ordered January to December.
pub fn group_by_month(
    table: &DerivedTable,
    field: Field,
    reducer: Reducer,
) -> Result<Vec<MonthlyValue>, EmptyRangeError> {
    let rows = non_empty(table)?;
    let mut totals = [(0.0f64, 0usize); 12];
    for row in rows {
        let slot = &mut totals[(row.month_number as usize - 1) % 12];
        slot.0 += field.value(row);
        slot.1 += 1;
    }
    Ok(totals
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(i, (total, count))| {
            let month_number = i as u32 + 1;
            let value = match reducer {
                Reducer::Sum => *total,
                Reducer::Mean => *total / *count as f64,
            };
            MonthlyValue {
                month_number,
                month_label: month_label(month_number).unwrap_or_default(),
                value,
            }
        })
        .collect())
}

/// Month with the largest value; the earliest month wins a tie.
pub fn highest_month(monthly: &[MonthlyValue]) -> Result<MonthlyValue, EmptyRangeError> {
    pick_month(monthly, |candidate, best| candidate > best)
}

/// Month with the smallest value; the earliest month wins a tie.
pub fn lowest_month(monthly: &[MonthlyValue]) -> Result<MonthlyValue, EmptyRangeError> {
    pick_month(monthly, |candidate, best| candidate < best)
}

fn pick_month<F>(monthly: &[MonthlyValue], better: F) -> Result<MonthlyValue, EmptyRangeError>
where
    F: Fn(f64, f64) -> bool,
{
    let (first, rest) = monthly.split_first().ok_or(EmptyRangeError)?;
    Ok(rest
        .iter()
        .fold(*first, |best, m| if better(m.value, best.value) { *m } else { best }))
}

/// A statistic a page can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "field", rename_all = "snake_case")]
pub enum Statistic {
    Mean(Field),
    Min(Field),
    Max(Field),
    Sum(Field),
}

impl Statistic {
    /// Key of this statistic in an [`AggregateResult`], e.g. "min_rainfall".
    pub fn name(&self) -> String {
        let (op, field) = match self {
            Statistic::Mean(f) => ("mean", f),
            Statistic::Min(f) => ("min", f),
            Statistic::Max(f) => ("max", f),
            Statistic::Sum(f) => ("sum", f),
        };
        format!("{}_{}", op, field.name())
    }

    pub fn field(&self) -> Field {
        match self {
            Statistic::Mean(f) | Statistic::Min(f) | Statistic::Max(f) | Statistic::Sum(f) => *f,
        }
    }

    pub fn compute(&self, table: &DerivedTable) -> Result<StatValue, EmptyRangeError> {
        Ok(match self {
            Statistic::Mean(f) => StatValue::plain(mean(table, *f)?),
            Statistic::Sum(f) => StatValue::plain(sum(table, *f)?),
            Statistic::Min(f) => min(table, *f)?.into(),
            Statistic::Max(f) => max(table, *f)?.into(),
        })
    }
}

/// A computed value, with the date for extrema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatValue {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl StatValue {
    fn plain(value: f64) -> Self {
        Self { value, date: None }
    }
}

impl From<Extremum> for StatValue {
    fn from(e: Extremum) -> Self {
        Self {
            value: e.value,
            date: Some(e.date),
        }
    }
}

/// Statistic name to value, computed fresh for one selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AggregateResult {
    values: BTreeMap<String, StatValue>,
}

impl AggregateResult {
    pub fn get(&self, statistic: &Statistic) -> Option<&StatValue> {
        self.values.get(&statistic.name())
    }

    pub fn get_named(&self, name: &str) -> Option<&StatValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compute every requested statistic. An empty table fails as a whole,
/// even when no statistic is requested.
pub fn aggregate(
    table: &DerivedTable,
    statistics: &[Statistic],
) -> Result<AggregateResult, EmptyRangeError> {
    non_empty(table)?;
    let mut values = BTreeMap::new();
    for statistic in statistics {
        values.insert(statistic.name(), statistic.compute(table)?);
    }
    Ok(AggregateResult { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdd_core::record::{Record, Table};

    const EPS: f64 = 1e-9;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    fn table(rows: &[(u32, u32, f64, f64, f64)]) -> DerivedTable {
        let records = rows
            .iter()
            .map(|&(m, d, reservoir, groundwater_level, rainfall)| Record {
                date: date(m, d),
                reservoir,
                groundwater_level,
                rainfall,
            })
            .collect();
        DerivedTable::from_table(&Table::from_records(records))
    }

    #[test]
    fn mean_of_clipped_reservoir() {
        let t = table(&[(1, 1, 0.02, 0.0, 0.0), (1, 2, 0.10, 0.0, 0.0)]);
        assert!((mean(&t, Field::ReservoirClipped).unwrap() - 0.075).abs() < EPS);
        assert!((mean(&t, Field::Reservoir).unwrap() - 0.06).abs() < EPS);
    }

    #[test]
    fn extrema_break_ties_by_first_occurrence() {
        let t = table(&[
            (3, 1, 0.0, -2.0, 0.0),
            (1, 1, 0.0, -5.0, 0.0),
            (2, 1, 0.0, 4.0, 0.0),
            (4, 1, 0.0, -5.0, 0.0),
            (5, 1, 0.0, 4.0, 0.0),
        ]);
        let lo = min(&t, Field::GroundwaterLevel).unwrap();
        assert_eq!(lo.value, -5.0);
        assert_eq!(lo.date, date(1, 1));
        let hi = max(&t, Field::GroundwaterLevel).unwrap();
        assert_eq!(hi.value, 4.0);
        assert_eq!(hi.date, date(2, 1));
    }

    #[test]
    fn every_statistic_rejects_an_empty_table() {
        let empty = DerivedTable::default();
        assert_eq!(mean(&empty, Field::Rainfall), Err(EmptyRangeError));
        assert_eq!(sum(&empty, Field::Rainfall), Err(EmptyRangeError));
        assert_eq!(min(&empty, Field::Rainfall), Err(EmptyRangeError));
        assert_eq!(max(&empty, Field::Rainfall), Err(EmptyRangeError));
        assert_eq!(
            group_by_month(&empty, Field::Rainfall, Reducer::Sum),
            Err(EmptyRangeError)
        );
        assert_eq!(aggregate(&empty, &[]), Err(EmptyRangeError));
        assert_eq!(highest_month(&[]), Err(EmptyRangeError));
        assert_eq!(lowest_month(&[]), Err(EmptyRangeError));
    }

    #[test]
    fn group_by_month_is_calendar_ordered() {
        let t = table(&[
            (11, 2, 0.0, 0.0, 1.0),
            (3, 5, 0.0, 0.0, 20.0),
            (1, 9, 0.0, 0.0, 4.0),
            (11, 1, 0.0, 0.0, 3.0),
            (1, 3, 0.0, 0.0, 6.0),
        ]);
        let sums = group_by_month(&t, Field::Rainfall, Reducer::Sum).unwrap();
        let labels: Vec<&str> = sums.iter().map(|m| m.month_label).collect();
        assert_eq!(labels, vec!["Jan", "Mar", "Nov"]);
        assert!((sums[0].value - 10.0).abs() < EPS);
        assert!((sums[2].value - 4.0).abs() < EPS);

        let means = group_by_month(&t, Field::Rainfall, Reducer::Mean).unwrap();
        assert!((means[0].value - 5.0).abs() < EPS);
        assert!((means[2].value - 2.0).abs() < EPS);
        assert!(means.len() <= 12);
    }

    #[test]
    fn wettest_and_driest_months() {
        let t = table(&[
            (1, 10, 0.0, 0.0, 10.0),
            (2, 10, 0.0, 0.0, 5.0),
            (3, 10, 0.0, 0.0, 20.0),
        ]);
        let monthly = group_by_month(&t, Field::Rainfall, Reducer::Sum).unwrap();
        let wettest = highest_month(&monthly).unwrap();
        let driest = lowest_month(&monthly).unwrap();
        assert_eq!(wettest.month_label, "Mar");
        assert!((wettest.value - 20.0).abs() < EPS);
        assert_eq!(driest.month_label, "Feb");
        assert!((driest.value - 5.0).abs() < EPS);
        assert!((sum(&t, Field::Rainfall).unwrap() - 35.0).abs() < EPS);
    }

    #[test]
    fn month_ties_go_to_the_earlier_month() {
        let t = table(&[(4, 1, 0.0, 0.0, 7.0), (2, 1, 0.0, 0.0, 7.0)]);
        let monthly = group_by_month(&t, Field::Rainfall, Reducer::Sum).unwrap();
        assert_eq!(highest_month(&monthly).unwrap().month_label, "Feb");
        assert_eq!(lowest_month(&monthly).unwrap().month_label, "Feb");
    }

    #[test]
    fn aggregate_names_and_dates() {
        let t = table(&[(1, 1, 0.02, -1.0, 2.0), (1, 2, 0.4, -3.0, 0.0)]);
        let result = aggregate(
            &t,
            &[
                Statistic::Mean(Field::ReservoirClipped),
                Statistic::Min(Field::GroundwaterLevel),
                Statistic::Sum(Field::Rainfall),
            ],
        )
        .unwrap();
        assert_eq!(result.len(), 3);
        let lowest = result.get_named("min_groundwater_level").unwrap();
        assert_eq!(lowest.value, -3.0);
        assert_eq!(lowest.date, Some(date(1, 2)));
        let total = result.get(&Statistic::Sum(Field::Rainfall)).unwrap();
        assert!((total.value - 2.0).abs() < EPS);
        assert_eq!(total.date, None);
        assert!((result.get_named("mean_reservoir_clipped").unwrap().value - 0.225).abs() < EPS);
    }

    #[test]
    fn aggregate_serializes_as_a_map() {
        let t = table(&[(6, 1, 0.5, -1.0, 2.0)]);
        let result = aggregate(&t, &[Statistic::Max(Field::Rainfall)]).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"max_rainfall":{"value":2.0,"date":"2023-06-01"}}"#);
    }
}
