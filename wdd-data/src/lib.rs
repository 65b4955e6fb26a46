//! Filtering, aggregation and page computations for the water dashboard.
//!
//! This crate turns a [`wdd_core::DerivedTable`] plus one user selection into
//! the numbers and chart data a dashboard page shows. Everything here is a
//! pure function of its inputs: nothing is cached between calls and the
//! source table is never modified.
//!
//! ```rust
//! use wdd_core::{DerivedTable, Table};
//! use wdd_data::filter::RangeSelection;
//! use wdd_data::pages::{compute_page, Page};
//!
//! let csv = "date,Reservoir,GW Level,Rainfall\n\
//!            2023-01-01,0.3,-2.0,10.0\n\
//!            2023-04-01,0.4,-2.5,3.0\n";
//! let table = DerivedTable::from_table(&Table::from_csv_str(csv).unwrap());
//! let selection = RangeSelection::QuarterSet { quarters: vec![1] };
//! let report = compute_page(Page::Rainfall, &table, &selection).unwrap();
//! assert_eq!(report.row_count, 1);
//! ```

pub mod aggregate;
pub mod compute;
pub mod error;
pub mod filter;
pub mod models;
pub mod pages;
pub mod selectors;
pub mod series;

pub use compute::{compute, Computation};
pub use error::{ComputeError, EmptyRangeError, SelectionError};
pub use filter::{RangeSelection, SelectionKind};
pub use pages::{compute_page, Page, PageReport};
pub use selectors::SelectorOptions;
