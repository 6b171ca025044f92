/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::error::EstimatorError;
use crate::est::mode::{Mode, Status};

pub mod exponential_moving_average;
pub mod min_max;
pub mod moments;
pub mod simple_moving_average;
pub mod standard_deviation;
pub mod sum;

///
/// Incremental statistic over a scalar series.
///
/// `get` and `is_ready` describe the outstanding preview if there is one, the committed state
/// otherwise. Every `f64` lane of the output is `NaN` until the estimator is ready.
///
pub trait Estimator {
    type Output: Copy;

    fn update(&mut self, value: f64, mode: Mode) -> Status;

    fn get(&self) -> Self::Output;

    fn is_ready(&self) -> bool;

    fn reset(&mut self);

    fn commit(&mut self, value: f64) -> Status {
        self.update(value, Mode::Committed)
    }

    fn preview(&mut self, value: f64) -> Status {
        self.update(value, Mode::Speculative)
    }

    fn try_get(&self) -> Result<Self::Output, EstimatorError> {
        if self.is_ready() {
            Ok(self.get())
        } else {
            Err(EstimatorError::NotReady)
        }
    }
}

///
/// Single lane average usable as a pluggable stage of composite indicators
///
pub trait MovingAverage: Estimator<Output = f64> + Clone + Sized {
    fn with_period(period: usize) -> Result<Self, EstimatorError>;

    fn period(&self) -> usize;

    /// Nothing committed since construction or the last reset
    fn is_empty(&self) -> bool;
}
