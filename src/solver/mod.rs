//! The solving oracle seam.
//!
//! Defines the boolean assignment model handed to a solver — a variable
//! arena, hard constraints, and a maximize objective — plus the narrow
//! `AssignmentSolver` trait any conforming constraint/ILP engine can
//! implement. The bundled backend is [`IlpSolver`].
//!
//! # Variable Addressing
//!
//! One boolean per (person, day, slot) triple, slot ranging over the
//! day's capacity. Variables live in a flat arena addressed by integer
//! indices, so neither object identity nor map ordering carries meaning.
//!
//! # Reference
//! - Wolsey (2020), "Integer Programming", Ch. 1 (assignment formulations)

mod ilp;

pub use ilp::IlpSolver;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Index of one boolean decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Flat arena of (person, day, slot) booleans.
#[derive(Debug, Clone)]
pub struct VariableArena {
    people: usize,
    /// Prefix sums of day capacities; `offsets[d]..offsets[d + 1]` are
    /// day `d`'s slots within one person's block.
    offsets: Vec<usize>,
}

impl VariableArena {
    /// Creates an arena for `people` staff over days with the given
    /// capacities.
    pub fn new(people: usize, capacities: &[u32]) -> Self {
        let mut offsets = Vec::with_capacity(capacities.len() + 1);
        let mut total = 0usize;
        offsets.push(0);
        for &capacity in capacities {
            total += capacity as usize;
            offsets.push(total);
        }
        Self { people, offsets }
    }

    /// The variable for (person, day, slot).
    #[inline]
    pub fn var(&self, person: usize, day: usize, slot: usize) -> VarId {
        debug_assert!(person < self.people);
        debug_assert!(slot < self.capacity(day) as usize);
        VarId(person * self.slots_per_person() + self.offsets[day] + slot)
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.people * self.slots_per_person()
    }

    /// Whether the arena holds no variables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of people.
    pub fn people(&self) -> usize {
        self.people
    }

    /// Number of days.
    pub fn days(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Capacity of a day.
    #[inline]
    pub fn capacity(&self, day: usize) -> u32 {
        (self.offsets[day + 1] - self.offsets[day]) as u32
    }

    fn slots_per_person(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }
}

/// A hard constraint over assignment variables.
#[derive(Debug, Clone)]
pub enum RosterConstraint {
    /// Exactly one of the variables is true (slot coverage).
    ExactlyOne { vars: Vec<VarId> },
    /// At most one of the variables is true (one shift per person-day).
    AtMostOne { vars: Vec<VarId> },
    /// The weighted sum of the variables lies in `[min, max]`
    /// (per-person fairness window).
    WeightedSumInRange {
        terms: Vec<(VarId, i64)>,
        min: i64,
        max: i64,
    },
    /// The variable is false (eligibility exclusion).
    Forbidden(VarId),
}

/// The (variables, constraints, objective) triple submitted to a solver.
///
/// The objective is maximized; every variable starts with coefficient 1,
/// so preference weights only bias which fairness-equivalent assignment
/// wins — they never relax a hard constraint.
#[derive(Debug, Clone)]
pub struct AssignmentModel {
    arena: VariableArena,
    constraints: Vec<RosterConstraint>,
    objective: Vec<i64>,
}

impl AssignmentModel {
    /// Creates a model over the arena with all objective coefficients 1.
    pub fn new(arena: VariableArena) -> Self {
        let objective = vec![1; arena.len()];
        Self {
            arena,
            constraints: Vec::new(),
            objective,
        }
    }

    /// The variable arena.
    pub fn arena(&self) -> &VariableArena {
        &self.arena
    }

    /// Adds a hard constraint.
    pub fn add(&mut self, constraint: RosterConstraint) {
        self.constraints.push(constraint);
    }

    /// Forbids a variable from being set.
    pub fn forbid(&mut self, var: VarId) {
        self.constraints.push(RosterConstraint::Forbidden(var));
    }

    /// Sets a variable's objective coefficient.
    pub fn set_coefficient(&mut self, var: VarId, weight: i64) {
        self.objective[var.0] = weight;
    }

    /// A variable's objective coefficient.
    pub fn coefficient(&self, var: VarId) -> i64 {
        self.objective[var.0]
    }

    /// All hard constraints.
    pub fn constraints(&self) -> &[RosterConstraint] {
        &self.constraints
    }

    /// Number of hard constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.arena.len()
    }
}

/// Verdict returned by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A provably optimal assignment was found.
    Optimal,
    /// A satisfying assignment was found, optimality unproven.
    Feasible,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// The solver gave up without a verdict.
    Unknown,
}

impl SolveStatus {
    /// Whether this status carries a usable assignment.
    pub fn is_solved(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

/// A solver's verdict plus the assignment, when one exists.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    /// The verdict.
    pub status: SolveStatus,
    /// Truth value per variable; empty unless `status.is_solved()`.
    pub values: Vec<bool>,
    /// Diagnostic detail for Unknown verdicts.
    pub detail: Option<String>,
}

impl SolverOutcome {
    /// An outcome carrying a satisfying assignment.
    pub fn solved(status: SolveStatus, values: Vec<bool>) -> Self {
        debug_assert!(status.is_solved());
        Self {
            status,
            values,
            detail: None,
        }
    }

    /// An outcome with no assignment.
    pub fn unsolved(status: SolveStatus, detail: Option<String>) -> Self {
        Self {
            status,
            values: Vec::new(),
            detail,
        }
    }

    /// Whether a usable assignment is present.
    pub fn is_solution_found(&self) -> bool {
        self.status.is_solved()
    }

    /// Whether a variable is true in the assignment.
    #[inline]
    pub fn is_set(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }
}

/// Resource budget for one solve call.
///
/// The solve is the only blocking step of a scheduling run, so the
/// caller supplies the budget up front; backends honor it as far as
/// their engine allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    /// Wall-clock budget for the solve. `None` = unbounded.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Unbounded configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// A constraint/integer-optimization engine.
///
/// Consumes the model as a single atomic, synchronous call with no
/// partial results; returns an assignment or an
/// infeasibility/unknown verdict.
pub trait AssignmentSolver {
    /// Solves the model within the configured budget.
    fn solve(&self, model: &AssignmentModel, config: &SolverConfig) -> SolverOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_addressing() {
        // 2 people over 3 days with capacities 1, 2, 1.
        let arena = VariableArena::new(2, &[1, 2, 1]);
        assert_eq!(arena.len(), 8);
        assert_eq!(arena.days(), 3);
        assert_eq!(arena.capacity(1), 2);

        assert_eq!(arena.var(0, 0, 0), VarId(0));
        assert_eq!(arena.var(0, 1, 0), VarId(1));
        assert_eq!(arena.var(0, 1, 1), VarId(2));
        assert_eq!(arena.var(0, 2, 0), VarId(3));
        assert_eq!(arena.var(1, 0, 0), VarId(4));
        assert_eq!(arena.var(1, 2, 0), VarId(7));
    }

    #[test]
    fn test_arena_ids_unique() {
        let arena = VariableArena::new(3, &[2, 1, 2]);
        let mut seen = std::collections::HashSet::new();
        for p in 0..3 {
            for d in 0..3 {
                for s in 0..arena.capacity(d) as usize {
                    assert!(seen.insert(arena.var(p, d, s)));
                }
            }
        }
        assert_eq!(seen.len(), arena.len());
    }

    #[test]
    fn test_model_defaults_and_coefficients() {
        let arena = VariableArena::new(2, &[1, 1]);
        let mut model = AssignmentModel::new(arena);
        let v = model.arena().var(1, 0, 0);
        assert_eq!(model.coefficient(v), 1);
        model.set_coefficient(v, 6);
        assert_eq!(model.coefficient(v), 6);
        assert_eq!(model.var_count(), 4);
    }

    #[test]
    fn test_outcome_lookup() {
        let outcome = SolverOutcome::solved(SolveStatus::Optimal, vec![true, false]);
        assert!(outcome.is_solution_found());
        assert!(outcome.is_set(VarId(0)));
        assert!(!outcome.is_set(VarId(1)));
        assert!(!outcome.is_set(VarId(9)));

        let failed = SolverOutcome::unsolved(SolveStatus::Infeasible, None);
        assert!(!failed.is_solution_found());
    }

    #[test]
    fn test_status_classification() {
        assert!(SolveStatus::Optimal.is_solved());
        assert!(SolveStatus::Feasible.is_solved());
        assert!(!SolveStatus::Infeasible.is_solved());
        assert!(!SolveStatus::Unknown.is_solved());
    }
}
