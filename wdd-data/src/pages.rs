//! Per-page computations.
//!
//! Each page pairs one selection kind with a fixed set of metrics and charts.
//! [`compute_page`] is the single entry point a presentation layer calls on
//! every interaction: one selection in, one [`PageReport`] out.
//!
//! | page        | selection        | metrics                                   |
//! |-------------|------------------|-------------------------------------------|
//! | Overview    | day-of-year span | mean clipped reservoir, groundwater, rain |
//! | Reservoir   | month set        | mean/min/max clipped reservoir            |
//! | Rainfall    | quarter set      | total, wettest month, driest month        |
//! | Groundwater | month span       | mean/min/max groundwater                  |

use crate::aggregate::{
    group_by_month, highest_month, lowest_month, AggregateResult, Field, MonthlyValue, Reducer,
    Statistic,
};
use crate::compute::compute;
use crate::error::{ComputeError, SelectionError};
use crate::filter::{RangeSelection, SelectionKind};
use crate::models::{HeatmapCell, MonthlyBoxStats, SeriesDateValue};
use crate::series::{daily_series, monthly_box_stats, seasonal_heatmap};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use wdd_core::derived::DerivedTable;

/// The four dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Overview,
    Reservoir,
    Rainfall,
    Groundwater,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Overview, Page::Reservoir, Page::Rainfall, Page::Groundwater];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Water Demand Forecasting Dashboard",
            Page::Reservoir => "Reservoir Levels Overview",
            Page::Rainfall => "Rainfall Patterns Overview",
            Page::Groundwater => "Groundwater Insights",
        }
    }

    pub fn selection_kind(&self) -> SelectionKind {
        match self {
            Page::Overview => SelectionKind::DayOfYearSpan,
            Page::Reservoir => SelectionKind::MonthSet,
            Page::Rainfall => SelectionKind::QuarterSet,
            Page::Groundwater => SelectionKind::MonthSpan,
        }
    }

    /// Statistics behind the page's metric row.
    pub fn statistics(&self) -> Vec<Statistic> {
        match self {
            Page::Overview => vec![
                Statistic::Mean(Field::ReservoirClipped),
                Statistic::Mean(Field::GroundwaterLevel),
                Statistic::Mean(Field::Rainfall),
            ],
            Page::Reservoir => vec![
                Statistic::Mean(Field::ReservoirClipped),
                Statistic::Min(Field::ReservoirClipped),
                Statistic::Max(Field::ReservoirClipped),
            ],
            Page::Rainfall => vec![Statistic::Sum(Field::Rainfall)],
            Page::Groundwater => vec![
                Statistic::Mean(Field::GroundwaterLevel),
                Statistic::Min(Field::GroundwaterLevel),
                Statistic::Max(Field::GroundwaterLevel),
            ],
        }
    }

    /// Labels of the metric row, in display order.
    pub fn metric_labels(&self) -> [&'static str; 3] {
        match self {
            Page::Overview => [
                "Avg Reservoir Level (%)",
                "Avg Groundwater Level (m)",
                "Avg Rainfall (mm)",
            ],
            Page::Reservoir => ["Average Storage (%)", "Lowest Level (%)", "Highest Level (%)"],
            Page::Rainfall => ["Total Rainfall (mm)", "Wettest Month", "Driest Month"],
            Page::Groundwater => [
                "Average GW Level (m)",
                "Lowest Level (m)",
                "Highest Level (m)",
            ],
        }
    }

    /// What to show the user instead of metrics and charts.
    pub fn message_for(&self, err: &ComputeError) -> String {
        match (self, err) {
            (Page::Rainfall, ComputeError::EmptyRange(_))
            | (Page::Rainfall, ComputeError::InvalidSelection(SelectionError::EmptySet(_))) => {
                "Select at least one quarter!".to_string()
            }
            (Page::Overview, ComputeError::EmptyRange(_)) => {
                "No data available for the selected month-day range.".to_string()
            }
            (Page::Reservoir, ComputeError::EmptyRange(_))
            | (Page::Reservoir, ComputeError::InvalidSelection(SelectionError::EmptySet(_))) => {
                "No data available for the selected month(s).".to_string()
            }
            (Page::Groundwater, ComputeError::EmptyRange(_)) => {
                "No data available for the selected month range.".to_string()
            }
            (_, ComputeError::InvalidSelection(e)) => format!("{}.", e),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Overview => "overview",
            Page::Reservoir => "reservoir",
            Page::Rainfall => "rainfall",
            Page::Groundwater => "groundwater",
        };
        f.write_str(name)
    }
}

/// One metric tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    #[serde(flatten)]
    pub value: MetricValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricValue {
    /// A single number, e.g. an average or total
    Number { value: f64, unit: &'static str },
    /// An extreme value with the date it occurred
    Dated {
        value: f64,
        unit: &'static str,
        date: NaiveDate,
    },
    /// A month picked out by its reduced value
    Month {
        month: &'static str,
        value: f64,
        unit: &'static str,
    },
}

/// Chart payloads, tagged by the kind of chart they feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    Line(Vec<SeriesDateValue>),
    Bar(Vec<MonthlyValue>),
    Box(Vec<MonthlyBoxStats>),
    Area(Vec<MonthlyValue>),
    Heatmap(Vec<HeatmapCell>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub data: ChartData,
}

/// Everything one page shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub page: Page,
    pub title: &'static str,
    pub selection: RangeSelection,
    pub row_count: usize,
    pub metrics: Vec<Metric>,
    pub aggregates: AggregateResult,
    pub charts: Vec<Chart>,
    #[serde(skip)]
    pub filtered: DerivedTable,
}

fn stat_metric(
    label: &'static str,
    aggregates: &AggregateResult,
    statistic: Statistic,
) -> Result<Metric, ComputeError> {
    let unit = statistic.field().unit();
    // every statistic was computed above; a miss means an empty range
    let stat = aggregates.get(&statistic).ok_or(crate::error::EmptyRangeError)?;
    let value = match stat.date {
        Some(date) => MetricValue::Dated {
            value: stat.value,
            unit,
            date,
        },
        None => MetricValue::Number {
            value: stat.value,
            unit,
        },
    };
    Ok(Metric { label, value })
}

fn month_metric(label: &'static str, month: MonthlyValue, field: Field) -> Metric {
    Metric {
        label,
        value: MetricValue::Month {
            month: month.month_label,
            value: month.value,
            unit: field.unit(),
        },
    }
}

/// Run one page for one selection.
///
/// `table` is the full derived table; the page filters it itself. The
/// groundwater heatmap deliberately covers the whole table, not the selection.
pub fn compute_page(
    page: Page,
    table: &DerivedTable,
    selection: &RangeSelection,
) -> Result<PageReport, ComputeError> {
    if selection.kind() != page.selection_kind() {
        return Err(SelectionError::WrongKind {
            expected: page.selection_kind(),
            found: selection.kind(),
        }
        .into());
    }

    let statistics = page.statistics();
    let computation = compute(table, selection, &statistics)?;
    let filtered = computation.filtered;
    let aggregates = computation.aggregates;
    let labels = page.metric_labels();

    let (metrics, charts) = match page {
        Page::Overview | Page::Reservoir | Page::Groundwater => {
            let metrics = labels
                .iter()
                .zip(statistics.iter())
                .map(|(label, statistic)| stat_metric(*label, &aggregates, *statistic))
                .collect::<Result<Vec<_>, _>>()?;
            (metrics, charts_for(page, table, &filtered)?)
        }
        Page::Rainfall => {
            let monthly = group_by_month(&filtered, Field::Rainfall, Reducer::Sum)?;
            let metrics = vec![
                stat_metric(labels[0], &aggregates, Statistic::Sum(Field::Rainfall))?,
                month_metric(labels[1], highest_month(&monthly)?, Field::Rainfall),
                month_metric(labels[2], lowest_month(&monthly)?, Field::Rainfall),
            ];
            let charts = vec![
                Chart {
                    title: "Daily Rainfall",
                    data: ChartData::Line(daily_series(&filtered, &[Field::Rainfall])),
                },
                Chart {
                    title: "Rainfall by Month",
                    data: ChartData::Area(monthly),
                },
            ];
            (metrics, charts)
        }
    };

    log::debug!(
        "[WDD Debug] pages: {} computed over {} rows",
        page,
        filtered.len()
    );

    Ok(PageReport {
        page,
        title: page.title(),
        selection: selection.clone(),
        row_count: filtered.len(),
        metrics,
        aggregates,
        charts,
        filtered,
    })
}

fn charts_for(
    page: Page,
    table: &DerivedTable,
    filtered: &DerivedTable,
) -> Result<Vec<Chart>, ComputeError> {
    Ok(match page {
        Page::Overview => vec![Chart {
            title: "Water Data Overview",
            data: ChartData::Line(daily_series(
                filtered,
                &[Field::Reservoir, Field::GroundwaterLevel, Field::Rainfall],
            )),
        }],
        Page::Reservoir => vec![
            Chart {
                title: "Daily Reservoir Storage Trends",
                data: ChartData::Line(daily_series(filtered, &[Field::Reservoir])),
            },
            Chart {
                title: "Monthly Average Reservoir Storage",
                data: ChartData::Bar(group_by_month(filtered, Field::Reservoir, Reducer::Mean)?),
            },
            Chart {
                title: "Reservoir Level Distribution by Month",
                data: ChartData::Box(monthly_box_stats(filtered, Field::Reservoir)),
            },
        ],
        Page::Groundwater => vec![
            Chart {
                title: "Daily Groundwater Fluctuations",
                data: ChartData::Line(daily_series(
                    &filtered.sorted_by_date(),
                    &[Field::GroundwaterLevel],
                )),
            },
            Chart {
                title: "Seasonal Groundwater Variability",
                data: ChartData::Heatmap(seasonal_heatmap(table, Field::GroundwaterLevel)),
            },
        ],
        Page::Rainfall => Vec::new(),
    })
}
