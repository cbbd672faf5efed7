use crate::domain::{Allocation, AllocationError, SolverType};
use crate::models::{ApiAllocation, ApiError};
use crate::report::{StylePreset, TableStyle};

impl ApiAllocation {
    pub fn new(allocation: Allocation, solver: SolverType) -> Self {
        let (allocation, utilities, min_utility) = allocation.into_parts();
        ApiAllocation {
            allocation,
            utilities,
            min_utility,
            solver: solver.name().to_string(),
        }
    }
}

impl From<&AllocationError> for ApiError {
    fn from(error: &AllocationError) -> Self {
        ApiError {
            error: error.to_string(),
            kind: error.kind().to_string(),
        }
    }
}

impl From<StylePreset> for TableStyle {
    fn from(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Agents => TableStyle::agents(),
            StylePreset::Participants => TableStyle::participants(),
        }
    }
}
