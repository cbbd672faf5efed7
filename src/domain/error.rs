use thiserror::Error;

/// Result type for allocation operations
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Errors that can occur while computing an allocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The valuation matrix is malformed. No solve was attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend reported the constraint set as unsatisfiable.
    #[error("Infeasible program: {0}")]
    Infeasible(String),

    /// The backend stopped without a conclusive optimal status.
    #[error("Solver error: {0}")]
    Solver(String),
}

impl AllocationError {
    /// Stable tag for the failure category, used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            AllocationError::InvalidInput(_) => "invalid_input",
            AllocationError::Infeasible(_) => "infeasible",
            AllocationError::Solver(_) => "solver",
        }
    }
}
