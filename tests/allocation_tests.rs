mod common;

use approx::assert_abs_diff_eq;
use egalitarian_allocation::domain::{
    compute_egalitarian_allocation, create_solver, solve_allocation, AllocationError, SolverType,
    ValuationMatrix,
};

use common::{assert_allocation_invariants, four_agents, three_agents, two_agents, TOLERANCE};

#[test]
fn test_two_agents_should_equalize_utilities() {
    let valuations = two_agents();
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    assert_abs_diff_eq!(allocation.utility(0), allocation.utility(1), epsilon = TOLERANCE);
    assert_abs_diff_eq!(allocation.utility(0), allocation.min_utility(), epsilon = TOLERANCE);
    assert_abs_diff_eq!(allocation.min_utility(), 9349.0 / 151.0, epsilon = TOLERANCE);
}

#[test]
fn test_two_agents_should_give_each_their_favourite_minor_resource() {
    let allocation = compute_egalitarian_allocation(&two_agents()).unwrap();

    assert_abs_diff_eq!(allocation.share(0, 1), 1.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(allocation.share(1, 2), 1.0, epsilon = TOLERANCE);
    assert_abs_diff_eq!(allocation.share(0, 0), 80.0 / 151.0, epsilon = TOLERANCE);
}

#[test]
fn test_four_agents_should_reach_known_optimum() {
    let valuations = four_agents();
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    assert_abs_diff_eq!(allocation.min_utility(), 1000.0 / 67.0, epsilon = TOLERANCE);
}

#[test]
fn test_three_agents_should_reach_known_optimum() {
    let valuations = three_agents();
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    assert_abs_diff_eq!(allocation.min_utility(), 19.5, epsilon = TOLERANCE);
}

#[test]
fn test_single_agent_should_receive_everything() {
    let valuations = vec![vec![3.0, 0.0, 7.5, 2.25]];
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    for resource in 0..4 {
        assert_abs_diff_eq!(allocation.share(0, resource), 1.0, epsilon = TOLERANCE);
    }
    assert_abs_diff_eq!(allocation.utility(0), 12.75, epsilon = TOLERANCE);
    assert_abs_diff_eq!(allocation.min_utility(), 12.75, epsilon = TOLERANCE);
}

#[test]
fn test_identical_rows_should_split_total_value_evenly() {
    let row = vec![6.0, 1.0, 4.0, 9.0];
    for num_agents in 2..=5 {
        let valuations = vec![row.clone(); num_agents];
        let allocation = compute_egalitarian_allocation(&valuations).unwrap();

        assert_allocation_invariants(&valuations, &allocation);
        assert_abs_diff_eq!(
            allocation.min_utility(),
            20.0 / num_agents as f64,
            epsilon = TOLERANCE
        );
    }
}

#[test]
fn test_agent_valuing_nothing_should_pin_floor_at_zero() {
    let valuations = vec![vec![5.0, 5.0], vec![0.0, 0.0]];
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    assert_abs_diff_eq!(allocation.min_utility(), 0.0, epsilon = TOLERANCE);
}

#[test]
fn test_more_agents_than_resources() {
    let valuations = vec![vec![1.0], vec![2.0], vec![4.0]];
    let allocation = compute_egalitarian_allocation(&valuations).unwrap();

    assert_allocation_invariants(&valuations, &allocation);
    // s0 = 2 s1 = 4 s2 and s0 + s1 + s2 = 1
    assert_abs_diff_eq!(allocation.min_utility(), 4.0 / 7.0, epsilon = TOLERANCE);
}

#[test]
fn test_floor_is_at_least_the_equal_split_floor() {
    for valuations in [two_agents(), four_agents(), three_agents()] {
        let allocation = compute_egalitarian_allocation(&valuations).unwrap();
        let equal_split_floor = valuations
            .iter()
            .map(|row| row.iter().sum::<f64>() / valuations.len() as f64)
            .fold(f64::INFINITY, f64::min);

        assert!(allocation.min_utility() >= equal_split_floor - TOLERANCE);
    }
}

#[test]
fn test_invalid_inputs_should_be_rejected() {
    let cases: Vec<Vec<Vec<f64>>> = vec![
        vec![],
        vec![vec![]],
        vec![vec![1.0, -2.0], vec![3.0, 4.0]],
        vec![vec![1.0, f64::NAN]],
        vec![vec![f64::INFINITY, 1.0]],
        vec![vec![1.0, 2.0], vec![3.0]],
    ];

    for rows in cases {
        let result = compute_egalitarian_allocation(&rows);
        assert!(
            matches!(result, Err(AllocationError::InvalidInput(_))),
            "expected invalid input for {:?}, got {:?}",
            rows,
            result
        );
    }
}

#[test]
fn test_solves_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| compute_egalitarian_allocation(&four_agents())))
        .collect();

    for handle in handles {
        let allocation = handle.join().unwrap().unwrap();
        assert_abs_diff_eq!(allocation.min_utility(), 1000.0 / 67.0, epsilon = TOLERANCE);
    }
}

#[test]
fn test_solve_allocation_with_explicit_backend() {
    let valuations = ValuationMatrix::from_rows(three_agents()).unwrap();
    let solver = create_solver(SolverType::Microlp, None);

    let allocation = solve_allocation(&valuations, solver.as_ref()).unwrap();

    assert_allocation_invariants(valuations.rows(), &allocation);
    assert_abs_diff_eq!(allocation.min_utility(), 19.5, epsilon = TOLERANCE);
}

#[cfg(feature = "highs-solver")]
#[test]
fn test_highs_backend_reaches_same_optimum() {
    let valuations = ValuationMatrix::from_rows(four_agents()).unwrap();
    let solver = create_solver(SolverType::Highs, None);

    let allocation = solve_allocation(&valuations, solver.as_ref()).unwrap();

    assert_allocation_invariants(valuations.rows(), &allocation);
    assert_abs_diff_eq!(allocation.min_utility(), 1000.0 / 67.0, epsilon = TOLERANCE);
}
