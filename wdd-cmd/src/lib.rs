//! Command implementations for the water dashboard CLI.
//!
//! Each page of the dashboard is a subcommand. A command loads the dataset,
//! turns its range arguments into one selection, computes the page and
//! prints the result as text or JSON.

use clap::{Args, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use wdd_core::constants::DEFAULT_DATA_PATH;

pub mod feedback;
pub mod page;
pub mod present;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Options {
    /// Path to the measurements CSV
    #[arg(short = 'd', long, global = true, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Averages of all three measurements over a day-of-year span
    Overview {
        /// First day of year to include (defaults to the earliest observed)
        #[arg(long)]
        start: Option<u32>,

        /// Last day of year to include (defaults to the latest observed)
        #[arg(long)]
        end: Option<u32>,
    },

    /// Reservoir storage for a set of months
    Reservoir {
        /// Month to include, e.g. "Jan" (repeatable; defaults to all twelve)
        #[arg(short = 'm', long = "month")]
        months: Vec<String>,

        /// Select no months at all
        #[arg(long, conflicts_with = "months")]
        none: bool,
    },

    /// Rainfall totals for a set of quarters
    Rainfall {
        /// Quarter to include, 1-4 (repeatable; defaults to all four)
        #[arg(short = 'q', long = "quarter")]
        quarters: Vec<u32>,

        /// Select no quarters at all
        #[arg(long, conflicts_with = "quarters")]
        none: bool,
    },

    /// Groundwater levels over a span of months
    Groundwater {
        /// First month of the span (defaults to "Jan")
        #[arg(long)]
        from: Option<String>,

        /// Last month of the span (defaults to "Dec")
        #[arg(long)]
        to: Option<String>,
    },

    /// List the values each page's selector offers
    Selectors,

    /// Rate the dashboard
    Feedback {
        /// Rating from 1 to 5
        #[arg(long)]
        stars: u8,
    },
}

pub fn run(options: &Options, command: Command) -> anyhow::Result<()> {
    let rendered = match command {
        Command::Feedback { stars } => feedback::run(stars, options.format)?,
        Command::Selectors => page::run_selectors(options)?,
        page_command => page::run_page(options, &page_command)?,
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
