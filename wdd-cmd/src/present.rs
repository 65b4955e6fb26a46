//! Text and JSON views of command results.

use serde::Serialize;
use std::fmt;
use wdd_core::calendar::format_date;
use wdd_data::pages::{Chart, ChartData, Metric, MetricValue, Page, PageReport};
use wdd_data::{RangeSelection, SelectorOptions};

/// Footer shown under every page.
pub const DISCLAIMER: &str =
    "Disclaimer: This data is based on 2023 records and may not reflect real-time changes.\n\
     Author: Nagomi Jayamani (2025)";

const DIVIDER: &str = "----------------------------------------";

/// Render a static text block under a divider.
pub fn footer(text: &str) -> String {
    format!("{}\n{}\n", DIVIDER, text)
}

/// Placeholder shown in metric tiles when there is nothing to compute.
fn placeholder(page: Page) -> &'static str {
    match page {
        Page::Overview => "No data",
        Page::Reservoir | Page::Rainfall | Page::Groundwater => "N/A",
    }
}

/// Result of one page command.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    Ready {
        report: Box<PageReport>,
        #[serde(skip)]
        selectors: SelectorOptions,
    },
    NoData {
        page: Page,
        title: &'static str,
        message: String,
    },
}

impl PageOutcome {
    pub fn no_data(page: Page, message: String) -> Self {
        PageOutcome::NoData {
            page,
            title: page.title(),
            message,
        }
    }
}

fn underline(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(title.chars().count()))
}

fn write_metric(f: &mut fmt::Formatter<'_>, metric: &Metric) -> fmt::Result {
    match &metric.value {
        MetricValue::Number { value, .. } => writeln!(f, "{:<28}{:.2}", metric.label, value),
        MetricValue::Dated { value, date, .. } => writeln!(
            f,
            "{:<28}{:.2}  ({})",
            metric.label,
            value,
            format_date(date)
        ),
        MetricValue::Month { month, value, unit } => {
            writeln!(f, "{:<28}{}  ({:.2} {})", metric.label, month, value, unit)
        }
    }
}

fn describe_selection(selection: &RangeSelection, selectors: &SelectorOptions) -> String {
    match selection {
        RangeSelection::DayOfYearSpan { start, end } => format!(
            "{} to {}",
            selectors.day_label(*start),
            selectors.day_label(*end)
        ),
        RangeSelection::MonthSet { months } => months.join(", "),
        RangeSelection::QuarterSet { quarters } => quarters
            .iter()
            .map(|q| format!("Q{}", q))
            .collect::<Vec<_>>()
            .join(", "),
        RangeSelection::MonthSpan { start, end } => format!("{} to {}", start, end),
    }
}

fn describe_chart(chart: &Chart) -> String {
    let (kind, count, unit) = match &chart.data {
        ChartData::Line(points) => ("line", points.len(), "points"),
        ChartData::Bar(months) => ("bar", months.len(), "months"),
        ChartData::Box(months) => ("box", months.len(), "months"),
        ChartData::Area(months) => ("area", months.len(), "months"),
        ChartData::Heatmap(cells) => ("heatmap", cells.len(), "cells"),
    };
    format!("{} ({}, {} {})", chart.title, kind, count, unit)
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOutcome::Ready { report, selectors } => {
                underline(f, report.title)?;
                writeln!(
                    f,
                    "Selection: {} ({} days)",
                    describe_selection(&report.selection, selectors),
                    report.row_count
                )?;
                writeln!(f)?;
                for metric in &report.metrics {
                    write_metric(f, metric)?;
                }
                writeln!(f)?;
                writeln!(f, "Charts:")?;
                for chart in &report.charts {
                    writeln!(f, "  {}", describe_chart(chart))?;
                }
            }
            PageOutcome::NoData {
                page,
                title,
                message,
            } => {
                underline(f, title)?;
                // the rainfall page shows only its prompt
                if *page != Page::Rainfall {
                    for label in page.metric_labels() {
                        writeln!(f, "{:<28}{}", label, placeholder(*page))?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "Warning: {}", message)?;
            }
        }
        writeln!(f)?;
        f.write_str(&footer(DISCLAIMER))
    }
}

/// Result of the `selectors` command.
#[derive(Debug, Serialize)]
#[serde(tag = "status", content = "options", rename_all = "snake_case")]
pub enum SelectorsView {
    Ready(SelectorOptions),
    NoData(String),
}

impl fmt::Display for SelectorsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorsView::Ready(options) => {
                match (options.day_of_year.first(), options.day_of_year.last()) {
                    (Some(first), Some(last)) => writeln!(
                        f,
                        "Days of year: {} observed, {} ({}) to {} ({})",
                        options.day_of_year.len(),
                        first.day_of_year,
                        first.label,
                        last.day_of_year,
                        last.label
                    )?,
                    _ => writeln!(f, "Days of year: none observed")?,
                }
                writeln!(f, "Months: {}", options.months.join(" "))?;
                let quarters: Vec<String> =
                    options.quarters.iter().map(|q| format!("Q{}", q)).collect();
                writeln!(f, "Quarters: {}", quarters.join(" "))
            }
            SelectorsView::NoData(reason) => writeln!(f, "No data: {}", reason),
        }
    }
}
