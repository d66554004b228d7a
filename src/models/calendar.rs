//! Duty calendar model.
//!
//! Builds the ordered sequence of duty days between a term start and end
//! date. Each day carries a shift capacity (how many people work it) and a
//! base point value, both determined by whether its weekday belongs to the
//! configured long-shift pair.
//!
//! # Point Model
//! Long-shift ("weekend-class") days are worth 2 base points, the remaining
//! five weekdays 1. Holiday revision (`models::holiday`) may add to these;
//! nothing else touches them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Base point value of a long-shift day.
const LONG_SHIFT_POINTS: u32 = 2;
/// Base point value of a regular day.
const REGULAR_SHIFT_POINTS: u32 = 1;

/// Per-weekday-class shift configuration.
///
/// The long-shift pair is an institutional convention (shifts anchored to
/// an evening start run long into Friday and Saturday), not the calendar
/// weekend — hence an explicit configuration value rather than a hardcoded
/// `Sat`/`Sun` check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftConfig {
    /// The two weekdays whose shifts run long.
    pub long_shift_days: [Weekday; 2],
    /// People on duty on a regular day.
    pub regular_capacity: u32,
    /// People on duty on a long-shift day.
    pub long_capacity: u32,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            long_shift_days: [Weekday::Fri, Weekday::Sat],
            regular_capacity: 1,
            long_capacity: 2,
        }
    }
}

impl ShiftConfig {
    /// Whether shifts on this weekday run long.
    #[inline]
    pub fn is_long_shift(&self, weekday: Weekday) -> bool {
        self.long_shift_days.contains(&weekday)
    }

    /// Shift capacity for a weekday.
    #[inline]
    pub fn capacity_for(&self, weekday: Weekday) -> u32 {
        if self.is_long_shift(weekday) {
            self.long_capacity
        } else {
            self.regular_capacity
        }
    }

    /// Base point value for a weekday.
    #[inline]
    pub fn points_for(&self, weekday: Weekday) -> u32 {
        if self.is_long_shift(weekday) {
            LONG_SHIFT_POINTS
        } else {
            REGULAR_SHIFT_POINTS
        }
    }
}

/// Term classification by start month.
///
/// Selects which holiday point rules apply. Any other start month is a
/// fatal input error — the run cannot proceed without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    /// Term starting in August.
    Fall,
    /// Term starting in January.
    Spring,
    /// Term starting in May.
    Summer,
}

impl Semester {
    /// Classifies a term by its start month.
    pub fn from_start_month(month: u32) -> Result<Self, RosterError> {
        match month {
            1 => Ok(Self::Spring),
            5 => Ok(Self::Summer),
            8 => Ok(Self::Fall),
            other => Err(RosterError::UnknownSemester(other)),
        }
    }
}

/// One duty day.
///
/// Capacity and points are fixed by the weekday class at construction;
/// only holiday revision produces days with different values (and it
/// returns a new calendar rather than mutating this one).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DutyDay {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// How many people work this shift (≥ 1).
    pub capacity: u32,
    /// Point value of this shift (≥ 1).
    pub points: u32,
    /// Whether a following double-length holiday credited this day.
    pub doubled: bool,
}

/// The ordered duty calendar for one term.
///
/// Covers every date from start to end inclusive. `grand_total` is the
/// point budget distributed across the roster: Σ capacity × points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyCalendar {
    /// Term classification derived from the start month.
    pub semester: Semester,
    /// Shift configuration the calendar was built with.
    pub config: ShiftConfig,
    /// Duty days in chronological order.
    pub days: Vec<DutyDay>,
    /// Days per calendar month, in order, for downstream rendering.
    pub month_days: Vec<(String, u32)>,
    /// Total point budget: Σ capacity × points over all days.
    pub grand_total: u32,
}

impl DutyCalendar {
    /// Builds the calendar for `[start, end]` inclusive.
    ///
    /// Classifies each date by weekday, assigns capacity and base points
    /// from `config`, and accumulates the grand total and per-month day
    /// counts. Fails if the range is empty or the start month does not
    /// map to a semester.
    pub fn build(
        start: NaiveDate,
        end: NaiveDate,
        config: ShiftConfig,
    ) -> Result<Self, RosterError> {
        if end < start {
            return Err(RosterError::EmptyCalendar { start, end });
        }
        let semester = Semester::from_start_month(start.month())?;

        let mut days = Vec::with_capacity((end - start).num_days() as usize + 1);
        let mut month_days: Vec<(String, u32)> = Vec::new();
        let mut grand_total = 0u32;

        for date in start.iter_days().take_while(|d| *d <= end) {
            let weekday = date.weekday();
            let capacity = config.capacity_for(weekday);
            let points = config.points_for(weekday);
            grand_total += capacity * points;

            let month = date.format("%B").to_string();
            match month_days.last_mut() {
                Some((name, count)) if *name == month => *count += 1,
                _ => month_days.push((month, 1)),
            }

            days.push(DutyDay {
                date,
                weekday,
                capacity,
                points,
                doubled: false,
            });
        }

        Ok(Self {
            semester,
            config,
            days,
            month_days,
            grand_total,
        })
    }

    /// Number of duty days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the calendar has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Chronological index of a date, if it falls in the calendar.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        let first = self.days.first()?.date;
        let offset = (date - first).num_days();
        if offset < 0 || offset as usize >= self.days.len() {
            None
        } else {
            Some(offset as usize)
        }
    }

    /// The day record for a date, if it falls in the calendar.
    pub fn day(&self, date: NaiveDate) -> Option<&DutyDay> {
        self.day_index(date).map(|i| &self.days[i])
    }
}
