#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use egalitarian_allocation::domain::Allocation;

pub const TOLERANCE: f64 = 1e-6;

pub fn two_agents() -> Vec<Vec<f64>> {
    vec![vec![81.0, 19.0, 1.0], vec![70.0, 1.0, 29.0]]
}

pub fn four_agents() -> Vec<Vec<f64>> {
    vec![
        vec![10.0, 20.0, 15.0],
        vec![20.0, 10.0, 15.0],
        vec![15.0, 20.0, 10.0],
        vec![5.0, 10.0, 25.0],
    ]
}

pub fn three_agents() -> Vec<Vec<f64>> {
    vec![
        vec![12.0, 15.0, 10.0],
        vec![9.0, 25.0, 20.0],
        vec![10.0, 10.0, 30.0],
    ]
}

/// Every resource fully allocated, no negative shares, utilities and the
/// floor consistent with the returned shares.
pub fn assert_allocation_invariants(valuations: &[Vec<f64>], allocation: &Allocation) {
    assert_eq!(allocation.num_agents(), valuations.len());
    assert_eq!(allocation.num_resources(), valuations[0].len());

    for resource in 0..allocation.num_resources() {
        let total: f64 = (0..allocation.num_agents())
            .map(|agent| allocation.share(agent, resource))
            .sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = TOLERANCE);
    }

    for agent in 0..allocation.num_agents() {
        for resource in 0..allocation.num_resources() {
            assert!(allocation.share(agent, resource) >= -1e-9);
        }
        let expected: f64 = valuations[agent]
            .iter()
            .zip(allocation.shares_of(agent))
            .map(|(value, share)| value * share)
            .sum();
        assert_abs_diff_eq!(allocation.utility(agent), expected, epsilon = TOLERANCE);
    }

    let floor = allocation
        .utilities()
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    assert_abs_diff_eq!(allocation.min_utility(), floor, epsilon = TOLERANCE);
}
