use crate::domain::error::AllocationError;
use crate::domain::program::{LinearProgram, LpSolution};

/// Common interface for LP solver backends
pub trait Solver: Send + Sync {
    /// Solve a linear program to optimality
    ///
    /// # Arguments
    /// * `program` - Variables, constraints and direction of the problem
    ///
    /// # Returns
    /// One value per program variable, in program order, plus the objective value.
    /// Anything short of a proven optimum is an error.
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, AllocationError>;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
