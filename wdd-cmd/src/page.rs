//! Page and selector commands.

use crate::present::{PageOutcome, SelectorsView};
use crate::{Command, Options, OutputFormat};
use wdd_core::constants::MONTH_LABELS;
use wdd_core::{DerivedTable, Table};
use wdd_data::pages::{compute_page, Page};
use wdd_data::{RangeSelection, SelectorOptions};

/// Page a command renders, or None for the non-page commands.
pub fn page_of(command: &Command) -> Option<Page> {
    match command {
        Command::Overview { .. } => Some(Page::Overview),
        Command::Reservoir { .. } => Some(Page::Reservoir),
        Command::Rainfall { .. } => Some(Page::Rainfall),
        Command::Groundwater { .. } => Some(Page::Groundwater),
        Command::Selectors | Command::Feedback { .. } => None,
    }
}

/// Turn a page command's arguments into a selection. Omitted arguments
/// fall back to the widest range.
pub fn selection_for(command: &Command, options: &SelectorOptions) -> Option<RangeSelection> {
    let selection = match command {
        Command::Overview { start, end } => {
            let first = options.day_of_year.first().map(|o| o.day_of_year);
            let last = options.day_of_year.last().map(|o| o.day_of_year);
            RangeSelection::DayOfYearSpan {
                start: start.or(first)?,
                end: end.or(last)?,
            }
        }
        Command::Reservoir { months, none } => RangeSelection::MonthSet {
            months: if *none {
                Vec::new()
            } else if months.is_empty() {
                MONTH_LABELS.iter().map(|m| m.to_string()).collect()
            } else {
                months.clone()
            },
        },
        Command::Rainfall { quarters, none } => RangeSelection::QuarterSet {
            quarters: if *none {
                Vec::new()
            } else if quarters.is_empty() {
                options.quarters.clone()
            } else {
                quarters.clone()
            },
        },
        Command::Groundwater { from, to } => RangeSelection::MonthSpan {
            start: from.clone().unwrap_or_else(|| MONTH_LABELS[0].to_string()),
            end: to
                .clone()
                .unwrap_or_else(|| MONTH_LABELS[MONTH_LABELS.len() - 1].to_string()),
        },
        Command::Selectors | Command::Feedback { .. } => return None,
    };
    Some(selection)
}

/// Load the dataset, logging instead of failing when it cannot be read.
fn load_derived(options: &Options) -> Result<DerivedTable, String> {
    match Table::load(&options.data) {
        Ok(table) => Ok(DerivedTable::from_table(&table)),
        Err(e) => {
            log::error!("Failed to load {}: {}", options.data.display(), e);
            Err(e.to_string())
        }
    }
}

/// Compute one page. Load failures and empty or invalid selections become
/// a rendered "no data" page rather than an error.
pub fn outcome_for(
    page: Page,
    table: Result<&DerivedTable, &str>,
    command: &Command,
) -> PageOutcome {
    let table = match table {
        Ok(table) => table,
        Err(reason) => return PageOutcome::no_data(page, format!("No data: {}", reason)),
    };
    let options = SelectorOptions::from_table(table);
    let Some(selection) = selection_for(command, &options) else {
        return PageOutcome::no_data(page, "No data available.".to_string());
    };
    match compute_page(page, table, &selection) {
        Ok(report) => PageOutcome::Ready {
            report: Box::new(report),
            selectors: options,
        },
        Err(e) => {
            log::info!("{} page: {}", page, e);
            PageOutcome::no_data(page, page.message_for(&e))
        }
    }
}

pub fn run_page(options: &Options, command: &Command) -> anyhow::Result<String> {
    let page = page_of(command).ok_or_else(|| anyhow::anyhow!("not a page command"))?;
    let table = load_derived(options);
    let outcome = outcome_for(page, table.as_ref().map_err(|e| e.as_str()), command);
    render(&outcome, options.format)
}

pub fn run_selectors(options: &Options) -> anyhow::Result<String> {
    let view = match load_derived(options) {
        Ok(table) => SelectorsView::Ready(SelectorOptions::from_table(&table)),
        Err(reason) => SelectorsView::NoData(reason),
    };
    render(&view, options.format)
}

fn render<T>(value: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: serde::Serialize + std::fmt::Display,
{
    Ok(match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
    })
}
