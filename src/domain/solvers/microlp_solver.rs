use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::domain::error::AllocationError;
use crate::domain::program::{Direction, LinearProgram, LpSolution, Relation};
use crate::domain::solver::Solver;

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

/// Pure-Rust simplex backend
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        MicrolpSolver
    }

    fn convert_error(error: microlp::Error) -> AllocationError {
        match error {
            microlp::Error::Infeasible => {
                AllocationError::Infeasible("microlp found no feasible point".to_string())
            }
            other => AllocationError::Solver(other.to_string()),
        }
    }
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        MicrolpSolver::new()
    }
}

impl Solver for MicrolpSolver {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, AllocationError> {
        let direction = match program.direction {
            Direction::Maximize => OptimizationDirection::Maximize,
            Direction::Minimize => OptimizationDirection::Minimize,
        };
        let mut problem = Problem::new(direction);

        let vars: Vec<microlp::Variable> = program
            .variables
            .iter()
            .map(|var| {
                let lower = var.lower.unwrap_or(f64::NEG_INFINITY);
                let upper = var.upper.unwrap_or(f64::INFINITY);
                problem.add_var(var.objective, (lower, upper))
            })
            .collect();

        for (row, constraint) in program.constraints.iter().enumerate() {
            let mut expr = LinearExpr::empty();
            for &(index, coeff) in &constraint.terms {
                let var = vars.get(index).copied().ok_or_else(|| {
                    AllocationError::Solver(format!(
                        "Constraint {} references unknown variable {}",
                        row, index,
                    ))
                })?;
                expr.add(var, coeff);
            }

            let op = match constraint.relation {
                Relation::Equal => ComparisonOp::Eq,
                Relation::GreaterOrEqual => ComparisonOp::Ge,
                Relation::LessOrEqual => ComparisonOp::Le,
            };
            problem.add_constraint(expr, op, constraint.rhs);
        }

        // microlp asserts on numerically degenerate input instead of returning an error
        let solution = catch_unwind(AssertUnwindSafe(|| problem.solve()))
            .map_err(|panic| {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                AllocationError::Solver(format!("microlp aborted: {}", message))
            })?
            .map_err(Self::convert_error)?;

        Ok(LpSolution {
            values: vars.iter().map(|&var| solution[var]).collect(),
            objective: solution.objective(),
        })
    }

    fn name(&self) -> &str {
        "microlp"
    }
}
