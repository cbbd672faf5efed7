use serde::Serialize;

use crate::domain::error::AllocationError;
use crate::domain::validate::validate_valuations;

/// Agents' valuations for resources. Rows are agents, columns are resources,
/// both indexed from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationMatrix {
    rows: Vec<Vec<f64>>,
}

impl ValuationMatrix {
    /// Build a matrix from raw rows, rejecting empty, ragged, negative or
    /// non-finite input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AllocationError> {
        validate_valuations(&rows)?;
        Ok(ValuationMatrix { rows })
    }

    pub fn num_agents(&self) -> usize {
        self.rows.len()
    }

    pub fn num_resources(&self) -> usize {
        self.rows[0].len()
    }

    /// Value agent `agent` assigns to one full unit of resource `resource`
    pub fn value(&self, agent: usize, resource: usize) -> f64 {
        self.rows[agent][resource]
    }

    pub fn row(&self, agent: usize) -> &[f64] {
        &self.rows[agent]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl TryFrom<Vec<Vec<f64>>> for ValuationMatrix {
    type Error = AllocationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        ValuationMatrix::from_rows(rows)
    }
}

/// Result of an egalitarian solve.
///
/// `allocation[i][j]` is the fraction of resource `j` held by agent `i`.
/// Utilities and the minimum are always derived from `allocation`, never
/// copied from solver state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    allocation: Vec<Vec<f64>>,
    utilities: Vec<f64>,
    min_utility: f64,
}

impl Allocation {
    /// Derive utilities and the minimum utility from a matrix of shares.
    ///
    /// `shares` must have the shape of `valuations`; debug builds assert it.
    pub fn from_shares(valuations: &ValuationMatrix, shares: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(shares.len(), valuations.num_agents(), "share rows per agent");
        debug_assert!(
            shares
                .iter()
                .all(|row| row.len() == valuations.num_resources()),
            "shares per resource"
        );

        let utilities: Vec<f64> = shares
            .iter()
            .zip(valuations.rows())
            .map(|(share_row, value_row)| {
                share_row
                    .iter()
                    .zip(value_row)
                    .map(|(share, value)| share * value)
                    .sum()
            })
            .collect();

        let min_utility = utilities.iter().copied().fold(f64::INFINITY, f64::min);

        Allocation {
            allocation: shares,
            utilities,
            min_utility,
        }
    }

    pub fn num_agents(&self) -> usize {
        self.allocation.len()
    }

    pub fn num_resources(&self) -> usize {
        self.allocation.first().map_or(0, Vec::len)
    }

    /// Fraction of `resource` given to `agent`
    pub fn share(&self, agent: usize, resource: usize) -> f64 {
        self.allocation[agent][resource]
    }

    pub fn shares_of(&self, agent: usize) -> &[f64] {
        &self.allocation[agent]
    }

    pub fn shares(&self) -> &[Vec<f64>] {
        &self.allocation
    }

    pub fn utility(&self, agent: usize) -> f64 {
        self.utilities[agent]
    }

    pub fn utilities(&self) -> &[f64] {
        &self.utilities
    }

    pub fn min_utility(&self) -> f64 {
        self.min_utility
    }

    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>, f64) {
        (self.allocation, self.utilities, self.min_utility)
    }
}
