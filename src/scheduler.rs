//! End-to-end scheduling pipeline.
//!
//! `DutyScheduler` runs one scheduling request from calendar parameters
//! to an assembled schedule: build the duty calendar, revise it for
//! holidays, formulate the constraint model, solve, assemble. Each step
//! consumes the previous step's complete output, so the pipeline is
//! inherently sequential.

use chrono::NaiveDate;
use tracing::info;

use crate::cp::RosterCpBuilder;
use crate::error::RosterError;
use crate::models::{
    revise_for_holidays, DutyCalendar, DutySchedule, HolidayCalendar, Person, ShiftConfig,
};
use crate::solver::{AssignmentSolver, SolverConfig};

/// One scheduling request: term range, shift configuration, holidays.
#[derive(Debug, Clone)]
pub struct DutyScheduler {
    start: NaiveDate,
    end: NaiveDate,
    config: ShiftConfig,
    holidays: HolidayCalendar,
}

impl DutyScheduler {
    /// Creates a scheduler for `[start, end]` with the default shift
    /// configuration and no holidays.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            config: ShiftConfig::default(),
            holidays: HolidayCalendar::none(),
        }
    }

    /// Sets the shift configuration.
    pub fn with_config(mut self, config: ShiftConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the holiday calendar.
    pub fn with_holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = holidays;
        self
    }

    /// Builds and revises the duty calendar for this request.
    pub fn build_calendar(&self) -> Result<DutyCalendar, RosterError> {
        let calendar = DutyCalendar::build(self.start, self.end, self.config)?;
        Ok(revise_for_holidays(&calendar, &self.holidays))
    }

    /// Runs the full pipeline and returns the assembled schedule.
    ///
    /// Fails before any model is built if the roster is empty or the
    /// term range is invalid; fails after the solve if no satisfying
    /// assignment exists.
    pub fn create_schedule<S: AssignmentSolver>(
        &self,
        roster: &[Person],
        solver: &S,
        solver_config: &SolverConfig,
    ) -> Result<DutySchedule, RosterError> {
        if roster.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        let calendar = self.build_calendar()?;
        info!(
            days = calendar.len(),
            people = roster.len(),
            budget = calendar.grand_total,
            semester = ?calendar.semester,
            "scheduling term"
        );

        let builder = RosterCpBuilder::new(&calendar, roster, &self.holidays);
        let schedule = builder.solve(solver, solver_config)?;
        info!(days = schedule.len(), "schedule assembled");
        Ok(schedule)
    }
}
