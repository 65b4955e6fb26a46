/// Error types for filtering and aggregation
use crate::filter::SelectionKind;
use thiserror::Error;

/// The selector state cannot be turned into a filter. Surfaced to the user
/// as a prompt; never silently widened to "all rows".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A month or quarter set with nothing in it
    #[error("Select at least one {}", .0.unit_name())]
    EmptySet(SelectionKind),

    /// A month label outside the twelve-entry table
    #[error("Unknown month: {0:?}")]
    UnknownMonth(String),

    /// A quarter outside 1-4
    #[error("Quarter out of range (expected 1-4): {0}")]
    QuarterOutOfRange(u32),

    /// A day-of-year span endpoint that no record carries
    #[error("Day of year {0} does not occur in the data")]
    UnobservedDay(u32),

    /// Span whose start comes after its end
    #[error("Range start {start} is after range end {end}")]
    ReversedSpan { start: String, end: String },

    /// A selection of the wrong kind for the page it was given to
    #[error("Expected a {expected} selection, found {found}")]
    WrongKind {
        expected: SelectionKind,
        found: SelectionKind,
    },
}

/// The filtered table has no rows, so no statistic can be computed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No data for this selection")]
pub struct EmptyRangeError;

/// Anything that stops a page computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),

    #[error(transparent)]
    EmptyRange(#[from] EmptyRangeError),
}
