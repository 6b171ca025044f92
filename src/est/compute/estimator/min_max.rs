/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::collections::sliding_extremum::{Extrema, SlidingExtremum};
use crate::est::compute::estimator::Estimator;
use crate::est::error::{check_delay, check_period, EstimatorError};
use crate::est::mode::{Mode, Status};
use crate::est::selector::output_selector;

output_selector!(ExtremumOutputSelector, "MinMax", {
    Max => "max",
    Min => "min",
});

///
/// Highest and lowest value of the last `window` samples, optionally of the window that ended `shift` samples ago
///
#[derive(Debug, Clone)]
pub struct MinMax {
    extremum: SlidingExtremum<f64>,
}

impl MinMax {
    pub fn new(window: usize) -> Result<Self, EstimatorError> {
        Self::with_shift(window, 0)
    }

    pub fn with_shift(window: usize, shift: usize) -> Result<Self, EstimatorError> {
        check_period(window, "MinMax")?;
        check_delay(shift, "MinMax")?;

        Ok(Self {
            extremum: SlidingExtremum::with_shift(window, shift),
        })
    }

    pub fn window(&self) -> usize {
        self.extremum.window()
    }

    pub fn shift(&self) -> usize {
        self.extremum.shift()
    }

    pub fn is_previewing(&self) -> bool {
        self.extremum.is_previewing()
    }

    pub fn output(&self, selector: ExtremumOutputSelector) -> f64 {
        let extrema = self.get();
        match selector {
            ExtremumOutputSelector::Max => extrema.max,
            ExtremumOutputSelector::Min => extrema.min,
        }
    }
}

impl Estimator for MinMax {
    type Output = Extrema<f64>;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        let ready = match mode {
            Mode::Committed => self.extremum.commit(value),
            Mode::Speculative => self.extremum.preview(value),
        };
        Status::from_ready(ready)
    }

    fn get(&self) -> Extrema<f64> {
        self.extremum.get().unwrap_or(Extrema {
            max: f64::NAN,
            min: f64::NAN,
        })
    }

    fn is_ready(&self) -> bool {
        self.extremum.is_ready()
    }

    fn reset(&mut self) {
        self.extremum.reset();
    }
}
