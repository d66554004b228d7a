//! ILP solver backend.
//!
//! Maps the assignment model onto a 0/1 integer program via `good_lp`
//! and the pure-Rust `microlp` engine. Every hard constraint translates
//! to one or two linear rows; the objective is maximized as-is.

use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

use super::{
    AssignmentModel, AssignmentSolver, RosterConstraint, SolveStatus, SolverConfig, SolverOutcome,
};

/// The bundled ILP backend.
///
/// Solves to proven optimality, so a successful solve always reports
/// `SolveStatus::Optimal`. The engine exposes no interruption hook;
/// a configured time budget is logged but not enforced here.
#[derive(Debug, Clone, Copy, Default)]
pub struct IlpSolver;

impl IlpSolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentSolver for IlpSolver {
    fn solve(&self, model: &AssignmentModel, config: &SolverConfig) -> SolverOutcome {
        if let Some(limit) = config.time_limit {
            debug!(?limit, "time budget set; this backend cannot interrupt mid-solve");
        }

        let mut vars = variables!();
        let lp_vars: Vec<Variable> = (0..model.var_count())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = lp_vars.iter().enumerate().fold(
            Expression::from(0.0),
            |acc, (i, &v)| acc + model.coefficient(super::VarId(i)) as f64 * v,
        );

        let mut problem = vars.maximise(objective).using(default_solver);

        for c in model.constraints() {
            match c {
                RosterConstraint::ExactlyOne { vars } => {
                    let sum = vars
                        .iter()
                        .fold(Expression::from(0.0), |acc, v| acc + lp_vars[v.0]);
                    problem = problem.with(constraint!(sum == 1.0));
                }
                RosterConstraint::AtMostOne { vars } => {
                    let sum = vars
                        .iter()
                        .fold(Expression::from(0.0), |acc, v| acc + lp_vars[v.0]);
                    problem = problem.with(constraint!(sum <= 1.0));
                }
                RosterConstraint::WeightedSumInRange { terms, min, max } => {
                    let sum = terms.iter().fold(Expression::from(0.0), |acc, (v, w)| {
                        acc + *w as f64 * lp_vars[v.0]
                    });
                    problem = problem.with(constraint!(sum.clone() >= *min as f64));
                    problem = problem.with(constraint!(sum <= *max as f64));
                }
                RosterConstraint::Forbidden(v) => {
                    problem = problem.with(constraint!(lp_vars[v.0] <= 0.0));
                }
            }
        }

        match problem.solve() {
            Ok(solution) => {
                let values = lp_vars.iter().map(|&v| solution.value(v) > 0.5).collect();
                SolverOutcome::solved(SolveStatus::Optimal, values)
            }
            Err(ResolutionError::Infeasible) => {
                SolverOutcome::unsolved(SolveStatus::Infeasible, None)
            }
            Err(other) => SolverOutcome::unsolved(SolveStatus::Unknown, Some(other.to_string())),
        }
    }
}
