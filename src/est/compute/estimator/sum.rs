/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::moments::WindowMoments;
use crate::est::compute::estimator::Estimator;
use crate::est::error::{check_period, EstimatorError};
use crate::est::mode::{Mode, Status};

#[derive(Debug, Clone)]
pub struct WindowSum {
    moments: WindowMoments,
}

impl WindowSum {
    pub fn new(period: usize) -> Result<Self, EstimatorError> {
        check_period(period, "WindowSum")?;

        Ok(Self {
            moments: WindowMoments::new(period),
        })
    }

    pub fn period(&self) -> usize {
        self.moments.period()
    }

    pub fn recompute(&mut self) {
        self.moments.recompute();
    }
}

impl Estimator for WindowSum {
    type Output = f64;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        self.moments.update(value, mode)
    }

    fn get(&self) -> f64 {
        if self.is_ready() {
            self.moments.moments().sum
        } else {
            f64::NAN
        }
    }

    fn is_ready(&self) -> bool {
        self.moments.is_ready()
    }

    fn reset(&mut self) {
        self.moments.reset();
    }
}
