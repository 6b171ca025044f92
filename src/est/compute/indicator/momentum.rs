/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::collections::delay_line::DelayLine;
use crate::est::compute::estimator::Estimator;
use crate::est::error::{check_delay, check_period, EstimatorError};
use crate::est::mode::{Mode, Status};

///
/// Difference between the latest value and the value `period` samples before it
///
#[derive(Debug, Clone)]
pub struct Momentum {
    line: DelayLine<f64>,
}

impl Momentum {
    pub fn new(period: usize) -> Result<Self, EstimatorError> {
        check_period(period, "Momentum")?;
        check_delay(period, "Momentum")?;

        Ok(Self {
            line: DelayLine::new(period),
        })
    }

    pub fn period(&self) -> usize {
        self.line.delay()
    }
}

impl Estimator for Momentum {
    type Output = f64;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        let ready = match mode {
            Mode::Committed => self.line.commit(value),
            Mode::Speculative => self.line.preview(value),
        };
        Status::from_ready(ready)
    }

    fn get(&self) -> f64 {
        match (self.line.latest(), self.line.get()) {
            (Some(latest), Some(delayed)) => latest - delayed,
            _ => f64::NAN,
        }
    }

    fn is_ready(&self) -> bool {
        self.line.is_ready()
    }

    fn reset(&mut self) {
        self.line.reset();
    }
}
