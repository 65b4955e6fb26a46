//! Builders that turn a derived table into chart data.

use crate::aggregate::Field;
use crate::models::{HeatmapCell, MonthlyBoxStats, SeriesDateValue};
use chrono::Datelike;
use std::collections::BTreeMap;
use wdd_core::calendar::month_label;
use wdd_core::constants::{GROUNDWATER_COLUMN, RAINFALL_COLUMN, RESERVOIR_COLUMN};
use wdd_core::derived::DerivedTable;

/// Column header a field is charted under.
pub fn series_name(field: Field) -> &'static str {
    match field {
        Field::Reservoir => RESERVOIR_COLUMN,
        Field::ReservoirClipped => "Reservoir (clipped)",
        Field::GroundwaterLevel => GROUNDWATER_COLUMN,
        Field::Rainfall => RAINFALL_COLUMN,
    }
}

/// Daily points for each field, field by field, rows in table order.
pub fn daily_series(table: &DerivedTable, fields: &[Field]) -> Vec<SeriesDateValue> {
    fields
        .iter()
        .flat_map(|field| {
            table.iter().map(move |row| SeriesDateValue {
                series: series_name(*field),
                date: row.record.date,
                value: field.value(row),
            })
        })
        .collect()
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Per-month distribution of `field`, months without rows omitted.
pub fn monthly_box_stats(table: &DerivedTable, field: Field) -> Vec<MonthlyBoxStats> {
    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for row in table {
        by_month.entry(row.month_number).or_default().push(field.value(row));
    }
    by_month
        .into_iter()
        .map(|(month_number, mut values)| {
            values.sort_by(|a, b| a.total_cmp(b));
            MonthlyBoxStats {
                month_number,
                month_label: month_label(month_number).unwrap_or_default(),
                count: values.len(),
                min: values[0],
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// Mean of `field` for every (day-of-month, month) pair present, ordered by
/// month then day. Years are pooled.
pub fn seasonal_heatmap(table: &DerivedTable, field: Field) -> Vec<HeatmapCell> {
    let mut cells: BTreeMap<(u32, u32), (f64, usize)> = BTreeMap::new();
    for row in table {
        let cell = cells
            .entry((row.month_number, row.record.date.day()))
            .or_insert((0.0, 0));
        cell.0 += field.value(row);
        cell.1 += 1;
    }
    cells
        .into_iter()
        .map(|((month_number, day), (total, count))| HeatmapCell {
            day,
            month_number,
            month_label: month_label(month_number).unwrap_or_default(),
            value: total / count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wdd_core::record::{Record, Table};

    const EPS: f64 = 1e-9;

    fn table(rows: &[(i32, u32, u32, f64)]) -> DerivedTable {
        let records = rows
            .iter()
            .map(|&(y, m, d, gw)| Record {
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                reservoir: 0.01,
                groundwater_level: gw,
                rainfall: 1.0,
            })
            .collect();
        DerivedTable::from_table(&Table::from_records(records))
    }

    #[test]
    fn daily_series_uses_raw_values() {
        let t = table(&[(2023, 1, 1, -2.0), (2023, 1, 2, -3.0)]);
        let points = daily_series(&t, &[Field::Reservoir, Field::GroundwaterLevel]);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].series, "Reservoir");
        // charts never see the clipped value
        assert_eq!(points[0].value, 0.01);
        assert_eq!(points[3].series, "GW Level");
        assert_eq!(points[3].value, -3.0);
    }

    #[test]
    fn box_stats_interpolate_quartiles() {
        let t = table(&[
            (2023, 2, 4, 4.0),
            (2023, 2, 1, 1.0),
            (2023, 2, 3, 3.0),
            (2023, 2, 2, 2.0),
            (2023, 1, 1, 7.0),
        ]);
        let stats = monthly_box_stats(&t, Field::GroundwaterLevel);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].month_label, "Jan");
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[0].median, 7.0);

        let feb = &stats[1];
        assert_eq!(feb.count, 4);
        assert_eq!(feb.min, 1.0);
        assert_eq!(feb.max, 4.0);
        assert!((feb.q1 - 1.75).abs() < EPS);
        assert!((feb.median - 2.5).abs() < EPS);
        assert!((feb.q3 - 3.25).abs() < EPS);
    }

    #[test]
    fn heatmap_pools_years_and_orders_by_month() {
        let t = table(&[
            (2023, 3, 5, -1.0),
            (2022, 3, 5, -3.0),
            (2023, 1, 20, -6.0),
        ]);
        let cells = seasonal_heatmap(&t, Field::GroundwaterLevel);
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].month_label, cells[0].day), ("Jan", 20));
        assert_eq!((cells[1].month_label, cells[1].day), ("Mar", 5));
        assert!((cells[1].value - (-2.0)).abs() < EPS);
    }
}
