pub mod allocation;
pub mod error;
pub mod program;
pub mod solve;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod validate;

pub use allocation::{Allocation, ValuationMatrix};
pub use error::AllocationError;
pub use solve::{compute_egalitarian_allocation, solve_allocation};
pub use solver::Solver;
pub use solver_factory::{create_solver, SolverType};
