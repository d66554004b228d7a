//! Duty roster domain models.
//!
//! Core data types for one scheduling run: the duty calendar and its
//! per-day shift metadata, the holiday/break calendar that revises point
//! values, the people being scheduled, and the assembled schedule.
//!
//! # Lifecycle
//!
//! A `DutyCalendar` and `HolidayCalendar` are built once per run from
//! caller-supplied ranges; `Person` entities are mutated only while the
//! solved assignment is assembled; everything is discarded once the
//! `DutySchedule` is handed to the rendering collaborator.

mod calendar;
mod holiday;
mod person;
mod schedule;

pub use calendar::{DutyCalendar, DutyDay, Semester, ShiftConfig};
pub use holiday::{revise_for_holidays, HolidayCalendar};
pub use person::{apply_half_staff, Distribution, Person};
pub use schedule::{DutySchedule, ScheduleDay};
