//! Core types for the water dashboard dataset.
//!
//! A dataset is a single CSV of daily measurements (reservoir level,
//! groundwater level, rainfall). This crate loads it into an immutable
//! [`record::Table`] and derives the calendar fields every dashboard page
//! filters on ([`derived::DerivedTable`]).
//!
//! ```rust
//! use wdd_core::derived::DerivedTable;
//! use wdd_core::record::Table;
//!
//! let csv = "date,Reservoir,GW Level,Rainfall\n2023-01-01,0.02,-3.5,0.0\n";
//! let table = Table::from_csv_str(csv).unwrap();
//! let derived = DerivedTable::from_table(&table);
//! assert_eq!(derived.rows()[0].reservoir_clipped, 0.05);
//! ```

pub mod calendar;
pub mod constants;
pub mod date_range;
pub mod derived;
pub mod error;
pub mod record;

pub use derived::{DerivedRecord, DerivedTable};
pub use error::LoadError;
pub use record::{Record, Table};
