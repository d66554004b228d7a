//! Roster constraint formulation.
//!
//! Translates the revised duty calendar, the roster, and the holiday
//! calendar into the boolean assignment model handed to the solving
//! oracle, then decodes the solved assignment back into a
//! [`DutySchedule`].
//!
//! # Hard Constraints
//!
//! - every slot of every day is filled by exactly one person;
//! - nobody works two slots of the same day;
//! - per-person point totals stay inside the fairness window derived
//!   from the revised grand total;
//! - nobody serves on or before their move-in date, on an excluded date
//!   or weekday, inside their onboarding shadow window, or on a break
//!   date unless half-staff.
//!
//! The objective only biases which fairness-equivalent assignment wins.
//!
//! # Reference
//! - Wolsey (2020), "Integer Programming", Ch. 1 (assignment formulations)

use std::collections::HashMap;

use chrono::Weekday;
use tracing::{debug, warn};

use crate::error::RosterError;
use crate::models::{Distribution, DutyCalendar, DutySchedule, HolidayCalendar, Person, ScheduleDay};
use crate::solver::{
    AssignmentModel, AssignmentSolver, RosterConstraint, SolverConfig, VariableArena,
};

/// Length of the onboarding shadow window, in calendar days.
const SHADOW_DAYS: usize = 21;
/// Shadow days served by returners who are new to this community.
const COMMUNITY_SHADOW_DAYS: usize = 12;

/// Per-weekday index of people excluded on that weekday.
///
/// Built once from the roster so per-day exclusion lookup does not
/// rescan every person for every day of the calendar.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    excluded: HashMap<Weekday, Vec<usize>>,
}

impl AvailabilityIndex {
    /// Indexes the roster's excluded weekdays.
    pub fn build(roster: &[Person]) -> Self {
        let mut excluded: HashMap<Weekday, Vec<usize>> = HashMap::new();
        for (idx, person) in roster.iter().enumerate() {
            for &weekday in &person.excluded_weekdays {
                excluded.entry(weekday).or_default().push(idx);
            }
        }
        Self { excluded }
    }

    /// Roster indices of people excluded on a weekday.
    pub fn excluded_on(&self, weekday: Weekday) -> &[usize] {
        self.excluded.get(&weekday).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds the assignment model and decodes solved assignments.
///
/// The calendar must already be holiday-revised: the fairness window is
/// taken from its grand total.
pub struct RosterCpBuilder<'a> {
    calendar: &'a DutyCalendar,
    roster: &'a [Person],
    holidays: &'a HolidayCalendar,
}

impl<'a> RosterCpBuilder<'a> {
    /// Creates a builder over a revised calendar, roster, and holidays.
    pub fn new(
        calendar: &'a DutyCalendar,
        roster: &'a [Person],
        holidays: &'a HolidayCalendar,
    ) -> Self {
        Self {
            calendar,
            roster,
            holidays,
        }
    }

    /// The fairness window `[min, max]` on per-person point totals.
    ///
    /// `min` is the grand total divided evenly across the roster; `max`
    /// allows one extra point when the division leaves a remainder.
    /// An empty roster has an empty window of `(0, 0)`.
    pub fn fairness_window(&self) -> (i64, i64) {
        if self.roster.is_empty() {
            return (0, 0);
        }
        let total = self.calendar.grand_total as i64;
        let n = self.roster.len() as i64;
        let min = total / n;
        let max = if total % n == 0 { min } else { min + 1 };
        (min, max)
    }

    /// Formulates the full model: variables, hard constraints, objective.
    pub fn build(&self) -> AssignmentModel {
        let capacities: Vec<u32> = self.calendar.days.iter().map(|d| d.capacity).collect();
        let arena = VariableArena::new(self.roster.len(), &capacities);
        let mut model = AssignmentModel::new(arena);

        self.add_coverage(&mut model);
        self.add_fairness(&mut model);
        self.add_eligibility(&mut model);
        self.add_objective(&mut model);

        debug!(
            variables = model.var_count(),
            constraints = model.constraint_count(),
            "assignment model built"
        );
        model
    }

    /// Submits the model to a solver and assembles the schedule.
    ///
    /// Any solved verdict (optimal or feasible) is assembled; infeasible
    /// and unknown verdicts produce an error and no schedule.
    pub fn solve<S: AssignmentSolver>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<DutySchedule, RosterError> {
        if self.roster.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        let model = self.build();
        let outcome = solver.solve(&model, config);
        debug!(status = ?outcome.status, "solver returned");

        if !outcome.is_solution_found() {
            return match outcome.status {
                crate::solver::SolveStatus::Infeasible => Err(RosterError::Infeasible),
                _ => Err(RosterError::SolverUnknown(
                    outcome.detail.unwrap_or_else(|| "no detail".to_string()),
                )),
            };
        }

        Ok(self.assemble(&model, &outcome))
    }

    /// Each slot is filled by exactly one person, and nobody fills two
    /// slots of the same day.
    fn add_coverage(&self, model: &mut AssignmentModel) {
        let arena = model.arena().clone();
        for day in 0..arena.days() {
            let capacity = arena.capacity(day) as usize;
            for slot in 0..capacity {
                let vars = (0..self.roster.len())
                    .map(|p| arena.var(p, day, slot))
                    .collect();
                model.add(RosterConstraint::ExactlyOne { vars });
            }
            if capacity > 1 {
                for p in 0..self.roster.len() {
                    let vars = (0..capacity).map(|s| arena.var(p, day, s)).collect();
                    model.add(RosterConstraint::AtMostOne { vars });
                }
            }
        }
    }

    /// Point-weighted totals per person stay inside the fairness window.
    fn add_fairness(&self, model: &mut AssignmentModel) {
        let (min, max) = self.fairness_window();
        let arena = model.arena().clone();
        for p in 0..self.roster.len() {
            let mut terms = Vec::new();
            for (day, record) in self.calendar.days.iter().enumerate() {
                for slot in 0..record.capacity as usize {
                    terms.push((arena.var(p, day, slot), record.points as i64));
                }
            }
            model.add(RosterConstraint::WeightedSumInRange { terms, min, max });
        }
    }

    /// Forbids every (person, day) pair ruled out by move-in dates,
    /// exclusions, shadow windows, or breaks.
    fn add_eligibility(&self, model: &mut AssignmentModel) {
        let days = self.calendar.days.len();
        let mut banned = vec![false; self.roster.len() * days];
        let mut ban = |p: usize, d: usize| banned[p * days + d] = true;

        // Move-in: no duty on or before the move-in date.
        for (p, person) in self.roster.iter().enumerate() {
            for (d, day) in self.calendar.days.iter().enumerate() {
                if day.date <= person.move_in {
                    ban(p, d);
                }
            }
        }

        // Individually excluded dates; dates outside the calendar are
        // ignored, not an error.
        for (p, person) in self.roster.iter().enumerate() {
            for &date in &person.excluded_dates {
                match self.calendar.day_index(date) {
                    Some(d) => ban(p, d),
                    None => {
                        debug!(name = %person.name, %date, "excluded date outside calendar; ignored")
                    }
                }
            }
        }

        // Excluded weekdays, via the per-weekday index.
        let index = AvailabilityIndex::build(self.roster);
        for (d, day) in self.calendar.days.iter().enumerate() {
            for &p in index.excluded_on(day.weekday) {
                ban(p, d);
            }
        }

        // Onboarding shadow: new staff sit out the first 21 days;
        // returners new to this community sit out the first 12.
        for (p, person) in self.roster.iter().enumerate() {
            let shadow = if !person.returner {
                SHADOW_DAYS
            } else if !person.community_returner {
                COMMUNITY_SHADOW_DAYS
            } else {
                0
            };
            for d in 0..shadow.min(days) {
                ban(p, d);
            }
        }

        // Breaks: only half-staff may serve.
        for &brk in &self.holidays.breaks {
            let Some(d) = self.calendar.day_index(brk) else {
                warn!(date = %brk, "break date outside calendar; ignored");
                continue;
            };
            for (p, person) in self.roster.iter().enumerate() {
                if !person.half_staff {
                    ban(p, d);
                }
            }
        }

        let arena = model.arena().clone();
        for p in 0..self.roster.len() {
            for d in 0..days {
                if banned[p * days + d] {
                    for slot in 0..arena.capacity(d) as usize {
                        model.forbid(arena.var(p, d, slot));
                    }
                }
            }
        }
    }

    /// Preferred-half shifts carry the person's seniority weight; all
    /// other variables keep their default coefficient of 1.
    fn add_objective(&self, model: &mut AssignmentModel) {
        let arena = model.arena().clone();
        let days = arena.days();
        for (p, person) in self.roster.iter().enumerate() {
            let weight = person.seniority_weight();
            for d in 0..days {
                let preferred = match person.distribution {
                    Distribution::FrontLoad => 2 * d < days,
                    Distribution::BackLoad => 2 * d >= days,
                    Distribution::None => false,
                };
                if preferred {
                    for slot in 0..arena.capacity(d) as usize {
                        model.set_coefficient(arena.var(p, d, slot), weight);
                    }
                }
            }
        }
    }

    /// Decodes the solved assignment into a chronological schedule and
    /// accumulates each person's point total.
    fn assemble(&self, model: &AssignmentModel, outcome: &crate::solver::SolverOutcome) -> DutySchedule {
        let arena = model.arena();
        let mut roster: Vec<Person> = self.roster.to_vec();
        for person in &mut roster {
            person.points = 0;
        }

        let mut days = Vec::with_capacity(self.calendar.days.len());
        for (d, record) in self.calendar.days.iter().enumerate() {
            let mut assigned = Vec::with_capacity(record.capacity as usize);
            for slot in 0..record.capacity as usize {
                // Unique by the coverage constraint.
                let on_duty = (0..roster.len()).find(|&p| outcome.is_set(arena.var(p, d, slot)));
                if let Some(p) = on_duty {
                    roster[p].points += record.points;
                    assigned.push(roster[p].name.clone());
                }
            }
            days.push(ScheduleDay {
                date: record.date,
                weekday: record.weekday,
                points: record.points,
                doubled: record.doubled,
                assigned,
            });
        }

        DutySchedule { days, roster }
    }
}
