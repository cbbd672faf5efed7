use std::time::Duration;

use crate::domain::error::AllocationError;
use crate::domain::program::{Direction, LinearProgram, LpSolution, Relation};
use crate::domain::solver::Solver;

use ::highs::{ColProblem, HighsModelStatus, Row, Sense};

/// HiGHS solver implementation
pub struct HighsSolver {
    time_limit: Option<Duration>,
}

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver { time_limit: None }
    }

    /// Stop the solve once `limit` has elapsed. The run then ends with a
    /// non-optimal status and is reported as a solver error.
    pub fn with_time_limit(limit: Duration) -> Self {
        HighsSolver {
            time_limit: Some(limit),
        }
    }

    /// Convert HiGHS status to an allocation error, `None` meaning optimal
    fn convert_status(model_status: HighsModelStatus) -> Option<AllocationError> {
        match model_status {
            HighsModelStatus::Optimal => None,
            HighsModelStatus::Infeasible => Some(AllocationError::Infeasible(
                "HiGHS found no feasible point".to_string(),
            )),
            other => Some(AllocationError::Solver(format!(
                "HiGHS stopped with status {:?}",
                other
            ))),
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        HighsSolver::new()
    }
}

impl Solver for HighsSolver {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, AllocationError> {
        let sense = match program.direction {
            Direction::Maximize => Sense::Maximise,
            Direction::Minimize => Sense::Minimise,
        };

        let mut problem = ColProblem::new();

        // First, add all constraint rows
        let rows: Vec<Row> = program
            .constraints
            .iter()
            .map(|constraint| match constraint.relation {
                Relation::Equal => problem.add_row(constraint.rhs..=constraint.rhs),
                Relation::GreaterOrEqual => problem.add_row(constraint.rhs..),
                Relation::LessOrEqual => problem.add_row(..=constraint.rhs),
            })
            .collect();

        // Build sparse matrix data: for each column, collect its row entries
        let n_cols = program.variables.len();
        let mut col_data: Vec<Vec<(Row, f64)>> = vec![Vec::new(); n_cols];
        for (row_idx, constraint) in program.constraints.iter().enumerate() {
            for &(col, val) in &constraint.terms {
                let entries = col_data.get_mut(col).ok_or_else(|| {
                    AllocationError::Solver(format!(
                        "Constraint {} references unknown variable {}",
                        row_idx, col,
                    ))
                })?;
                entries.push((rows[row_idx], val));
            }
        }

        // Add variables (columns) with their constraint coefficients
        for (var, row_factors) in program.variables.iter().zip(&col_data) {
            let lower = var.lower.unwrap_or(f64::NEG_INFINITY);
            let upper = var.upper.unwrap_or(f64::INFINITY);
            problem.add_column(var.objective, lower..=upper, row_factors);
        }

        let mut model = problem.optimise(sense);
        model.set_option("output_flag", false);
        if let Some(limit) = self.time_limit {
            model.set_option("time_limit", limit.as_secs_f64());
        }

        let solved = model.try_solve().map_err(|status| {
            AllocationError::Solver(format!("HiGHS failed to run: {:?}", status))
        })?;

        if let Some(error) = Self::convert_status(solved.status()) {
            return Err(error);
        }

        let values = solved.get_solution().columns().to_vec();
        if values.len() != n_cols {
            return Err(AllocationError::Solver(format!(
                "HiGHS returned {} column values for {} variables",
                values.len(),
                n_cols,
            )));
        }

        // Calculate objective value
        let objective = program
            .variables
            .iter()
            .zip(&values)
            .map(|(var, value)| var.objective * value)
            .sum();

        Ok(LpSolution { values, objective })
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
