//! Crate error type.
//!
//! Fatal conditions only. Recoverable oddities (unmatched half-staff name,
//! excluded date outside the calendar) are logged and skipped, and input
//! integrity problems are reported in bulk by `validation`.

use thiserror::Error;

/// Errors that abort a scheduling run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// The term start month does not map to a known semester.
    ///
    /// Holiday point rules depend on the semester, so the run cannot
    /// proceed. Terms start in January, May, or August.
    #[error("no semester starts in month {0}; terms begin in January, May, or August")]
    UnknownSemester(u32),

    /// The calendar range is empty (end precedes start).
    #[error("calendar end {end} precedes start {start}")]
    EmptyCalendar {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// The roster has no people to assign.
    #[error("cannot schedule an empty roster")]
    EmptyRoster,

    /// The solver proved no assignment satisfies the hard constraints.
    #[error("no feasible duty assignment exists for this roster and calendar")]
    Infeasible,

    /// The solver gave up without a verdict (time or resource budget hit).
    #[error("solver returned no verdict: {0}")]
    SolverUnknown(String),
}
