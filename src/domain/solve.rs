use log::{debug, info, warn};

use crate::domain::allocation::{Allocation, ValuationMatrix};
use crate::domain::error::AllocationError;
use crate::domain::program::{build_max_min_program, LpSolution, MaxMinLayout};
use crate::domain::solver::Solver;
use crate::domain::solver_factory::{create_solver, SolverType};

/// Absolute tolerance on share values and column sums coming back from a backend
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Validate `rows` and solve them with the default backend.
pub fn compute_egalitarian_allocation(rows: &[Vec<f64>]) -> Result<Allocation, AllocationError> {
    let valuations = ValuationMatrix::from_rows(rows.to_vec()).map_err(|error| {
        warn!("Rejected valuation matrix: {}", error);
        error
    })?;
    let solver = create_solver(SolverType::default(), None);
    solve_allocation(&valuations, solver.as_ref())
}

/// Compute the allocation maximizing the minimum agent utility, with every
/// resource fully allocated.
pub fn solve_allocation(
    valuations: &ValuationMatrix,
    solver: &dyn Solver,
) -> Result<Allocation, AllocationError> {
    let layout = MaxMinLayout::of(valuations);
    debug!(
        "Solving max-min program for {} agents and {} resources with {}",
        layout.num_agents,
        layout.num_resources,
        solver.name(),
    );

    let program = build_max_min_program(valuations);
    let solution = solver.solve(&program).map_err(|error| {
        warn!("{} failed on max-min program: {}", solver.name(), error);
        error
    })?;

    let shares = extract_shares(&solution, &layout)?;
    let allocation = Allocation::from_shares(valuations, shares);
    if !allocation.min_utility().is_finite()
        || allocation.utilities().iter().any(|utility| !utility.is_finite())
    {
        return Err(AllocationError::Solver(
            "Utilities of the returned allocation are not finite".to_string(),
        ));
    }

    let reported = solution.values[layout.min_utility_index()];
    if (reported - allocation.min_utility()).abs() > SHARE_TOLERANCE {
        debug!(
            "{} reported floor {} but the returned shares give {}",
            solver.name(),
            reported,
            allocation.min_utility(),
        );
    }

    info!(
        "Egalitarian allocation computed with minimum utility value: {:.8}",
        allocation.min_utility()
    );
    Ok(allocation)
}

/// Read the share matrix out of a backend solution.
///
/// Noise below zero is clamped and every column renormalized to sum to one.
/// Anything beyond `SHARE_TOLERANCE` is a bad backend result.
fn extract_shares(
    solution: &LpSolution,
    layout: &MaxMinLayout,
) -> Result<Vec<Vec<f64>>, AllocationError> {
    if solution.values.len() != layout.num_variables() {
        return Err(AllocationError::Solver(format!(
            "Expected {} variable values, got {}",
            layout.num_variables(),
            solution.values.len(),
        )));
    }

    let mut shares = vec![vec![0.0; layout.num_resources]; layout.num_agents];
    for (agent, row) in shares.iter_mut().enumerate() {
        for (resource, share) in row.iter_mut().enumerate() {
            let value = solution.values[layout.share_index(agent, resource)];
            if !value.is_finite() || value < -SHARE_TOLERANCE {
                return Err(AllocationError::Solver(format!(
                    "Share of agent {} in resource {} is out of range ({})",
                    agent, resource, value,
                )));
            }
            *share = if value > 0.0 { value } else { 0.0 };
        }
    }

    for resource in 0..layout.num_resources {
        let total: f64 = shares.iter().map(|row| row[resource]).sum();
        if (total - 1.0).abs() > SHARE_TOLERANCE {
            return Err(AllocationError::Solver(format!(
                "Resource {} is allocated {} times instead of once",
                resource, total,
            )));
        }
        for row in shares.iter_mut() {
            row[resource] /= total;
        }
    }

    Ok(shares)
}
