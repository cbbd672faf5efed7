pub mod microlp_solver;

#[cfg(feature = "highs-solver")]
pub mod highs_solver;

pub use microlp_solver::MicrolpSolver;

#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;
