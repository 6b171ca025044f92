/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::Estimator;
use crate::est::error::EstimatorError;

///
/// Commits every input value and writes the estimate after each one into the matching output slot.
/// Returns the number of ready estimates written.
///
pub fn apply<E>(estimator: &mut E, input: &[f64], output: &mut [f64]) -> Result<usize, EstimatorError>
where
    E: Estimator<Output = f64>,
{
    if input.len() != output.len() {
        return Err(EstimatorError::InvalidArgument(
            format!(
                "input length({}) does not match output length({})",
                input.len(),
                output.len()
            )
            .into(),
        ));
    }

    let mut ready = 0;
    for (value, slot) in input.iter().zip(output.iter_mut()) {
        if estimator.commit(*value).is_ready() {
            ready += 1;
        }
        *slot = estimator.get();
    }

    Ok(ready)
}

pub fn collect<E>(estimator: &mut E, input: &[f64]) -> Vec<f64>
where
    E: Estimator<Output = f64>,
{
    input
        .iter()
        .map(|value| {
            estimator.commit(*value);
            estimator.get()
        })
        .collect()
}
