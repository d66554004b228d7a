//! Fair on-call duty roster generation for residential staff.
//!
//! Builds a duty calendar for an academic term, revises shift point values
//! for holidays and breaks, formulates the staff-to-shift assignment as a
//! 0/1 integer program with hard eligibility constraints and a seniority
//! weighted preference objective, and assembles the solved assignment into
//! a day-by-day schedule with per-person point tallies.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `DutyCalendar`, `DutyDay`, `HolidayCalendar`,
//!   `Person`, `DutySchedule`, `ShiftConfig`, `Semester`
//! - **`solver`**: The solver seam — `AssignmentModel`, `AssignmentSolver`,
//!   and the bundled `IlpSolver` backend
//! - **`cp`**: Constraint formulation — `RosterCpBuilder`, `AvailabilityIndex`
//! - **`scheduler`**: End-to-end pipeline — `DutyScheduler`
//! - **`validation`**: Roster integrity checks (duplicate names, dead inputs)
//!
//! # Architecture
//!
//! Every step is a sequential, pure transformation over in-memory data; the
//! only blocking call is the solve itself, which sits behind the
//! `AssignmentSolver` trait so any conforming constraint/ILP engine can be
//! substituted without touching the model construction.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Wolsey (2020), "Integer Programming", Ch. 1 (assignment formulations)

pub mod cp;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use error::RosterError;
