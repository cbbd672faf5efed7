use crate::domain::error::AllocationError;

/// Check that `rows` is a non-empty rectangular matrix of finite,
/// non-negative valuations.
pub fn validate_valuations(rows: &[Vec<f64>]) -> Result<(), AllocationError> {
    let first = rows.first().ok_or_else(|| {
        AllocationError::InvalidInput("Valuation matrix has no agents".to_string())
    })?;

    let num_resources = first.len();
    if num_resources == 0 {
        return Err(AllocationError::InvalidInput(
            "Valuation matrix has no resources".to_string(),
        ));
    }

    for (agent, row) in rows.iter().enumerate() {
        if row.len() != num_resources {
            return Err(AllocationError::InvalidInput(format!(
                "Agent {} has {} valuations, expected {}",
                agent,
                row.len(),
                num_resources,
            )));
        }

        for (resource, &value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(AllocationError::InvalidInput(format!(
                    "Valuation of agent {} for resource {} is not finite ({})",
                    agent, resource, value,
                )));
            }
            if value < 0.0 {
                return Err(AllocationError::InvalidInput(format!(
                    "Valuation of agent {} for resource {} is negative ({})",
                    agent, resource, value,
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valuations_given_valid_matrix_should_return_ok() {
        let rows = vec![vec![81.0, 19.0, 1.0], vec![70.0, 1.0, 29.0]];
        assert!(validate_valuations(&rows).is_ok());
    }

    #[test]
    fn test_validate_valuations_given_zeros_should_return_ok() {
        let rows = vec![vec![0.0, 0.0], vec![0.0, 3.5]];
        assert!(validate_valuations(&rows).is_ok());
    }

    #[test]
    fn test_validate_valuations_given_no_rows_should_return_error() {
        let rows: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            validate_valuations(&rows),
            Err(AllocationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_valuations_given_empty_rows_should_return_error() {
        let rows = vec![vec![], vec![]];
        assert!(matches!(
            validate_valuations(&rows),
            Err(AllocationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_valuations_given_ragged_rows_should_return_error() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let error = validate_valuations(&rows).unwrap_err();
        assert_eq!(
            error,
            AllocationError::InvalidInput("Agent 1 has 1 valuations, expected 2".to_string())
        );
    }

    #[test]
    fn test_validate_valuations_given_negative_entry_should_name_position() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, -0.5]];
        let error = validate_valuations(&rows).unwrap_err();
        assert!(error.to_string().contains("agent 1 for resource 1"));
    }

    #[test]
    fn test_validate_valuations_given_non_finite_entry_should_return_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let rows = vec![vec![1.0, bad]];
            assert!(matches!(
                validate_valuations(&rows),
                Err(AllocationError::InvalidInput(_))
            ));
        }
    }
}
