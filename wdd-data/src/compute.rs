//! The filter-then-aggregate step every page runs on each interaction.

use crate::aggregate::{aggregate, AggregateResult, Statistic};
use crate::error::ComputeError;
use crate::filter::RangeSelection;
use serde::Serialize;
use wdd_core::derived::DerivedTable;

/// Output of one [`compute`] call. Owns its filtered rows outright.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub aggregates: AggregateResult,
    pub filtered: DerivedTable,
}

/// Filter `table` by `selection`, then compute `statistics` over the rows
/// that remain.
///
/// Fails with [`ComputeError::InvalidSelection`] before any filtering when the
/// selection is unusable, and with [`ComputeError::EmptyRange`] when it keeps
/// no rows.
pub fn compute(
    table: &DerivedTable,
    selection: &RangeSelection,
    statistics: &[Statistic],
) -> Result<Computation, ComputeError> {
    let filtered = selection.apply(table)?;
    let aggregates = aggregate(&filtered, statistics)?;
    Ok(Computation {
        aggregates,
        filtered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Field;
    use crate::error::{EmptyRangeError, SelectionError};
    use crate::filter::SelectionKind;
    use chrono::NaiveDate;
    use wdd_core::record::{Record, Table};

    fn sample() -> DerivedTable {
        let records = [(1, 4.0), (2, 0.0), (7, 12.5)]
            .iter()
            .map(|&(m, rainfall)| Record {
                date: NaiveDate::from_ymd_opt(2023, m, 10).unwrap(),
                reservoir: 0.2,
                groundwater_level: -4.0,
                rainfall,
            })
            .collect();
        DerivedTable::from_table(&Table::from_records(records))
    }

    #[test]
    fn compute_filters_then_aggregates() {
        let table = sample();
        let selection = RangeSelection::QuarterSet { quarters: vec![1] };
        let result = compute(&table, &selection, &[Statistic::Sum(Field::Rainfall)]).unwrap();
        assert_eq!(result.filtered.len(), 2);
        assert!((result.aggregates.get_named("sum_rainfall").unwrap().value - 4.0).abs() < 1e-9);
        // source untouched
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn invalid_selection_is_reported_before_aggregation() {
        let table = sample();
        let selection = RangeSelection::QuarterSet { quarters: vec![] };
        assert_eq!(
            compute(&table, &selection, &[Statistic::Sum(Field::Rainfall)]),
            Err(ComputeError::InvalidSelection(SelectionError::EmptySet(
                SelectionKind::QuarterSet
            )))
        );
    }

    #[test]
    fn selection_without_rows_is_an_empty_range() {
        let table = sample();
        let selection = RangeSelection::QuarterSet { quarters: vec![4] };
        assert_eq!(
            compute(&table, &selection, &[Statistic::Mean(Field::Rainfall)]),
            Err(ComputeError::EmptyRange(EmptyRangeError))
        );
    }
}
