use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::solver::Solver;
use crate::domain::solvers::MicrolpSolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    #[default]
    Microlp,
    #[cfg(feature = "highs-solver")]
    Highs,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "microlp" => Some(SolverType::Microlp),
            #[cfg(feature = "highs-solver")]
            "highs" => Some(SolverType::Highs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SolverType::Microlp => "microlp",
            #[cfg(feature = "highs-solver")]
            SolverType::Highs => "highs",
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverType::from_name(s).ok_or_else(|| format!("Unknown solver {}", s.trim()))
    }
}

/// Create a solver instance based on the specified type.
///
/// `time_limit` is forwarded to backends that can stop themselves; callers
/// that need a hard budget for every backend enforce it around the call.
#[cfg_attr(not(feature = "highs-solver"), allow(unused_variables))]
pub fn create_solver(solver_type: SolverType, time_limit: Option<Duration>) -> Box<dyn Solver> {
    match solver_type {
        // microlp has no time limit option
        SolverType::Microlp => Box::new(MicrolpSolver::new()),
        #[cfg(feature = "highs-solver")]
        SolverType::Highs => match time_limit {
            Some(limit) => Box::new(HighsSolver::with_time_limit(limit)),
            None => Box::new(HighsSolver::new()),
        },
    }
}
