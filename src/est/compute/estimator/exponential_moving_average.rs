/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::{Estimator, MovingAverage};
use crate::est::error::{check_period, EstimatorError};
use crate::est::mode::{Mode, Status};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct EmaState {
    count: usize,
    seed_sum: f64,
    ema: f64,
}

impl EmaState {
    ///
    /// Seeds with the simple mean of the first `span` values, smooths afterwards
    ///
    #[inline]
    fn next(self, value: f64, span: usize, multiplier: f64) -> EmaState {
        let count = self.count + 1;

        if count < span {
            EmaState {
                count,
                seed_sum: self.seed_sum + value,
                ema: f64::NAN,
            }
        } else if count == span {
            let seed_sum = self.seed_sum + value;
            EmaState {
                count,
                seed_sum,
                ema: seed_sum / span as f64,
            }
        } else {
            EmaState {
                count,
                seed_sum: self.seed_sum,
                ema: (value - self.ema) * multiplier + self.ema,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    span: usize,
    multiplier: f64,
    committed: EmaState,
    speculative: EmaState,
    previewing: bool,
}

impl ExponentialMovingAverage {
    pub fn new(span: usize) -> Result<Self, EstimatorError> {
        check_period(span, "ExponentialMovingAverage")?;

        Ok(Self {
            span,
            multiplier: 2.0 / (span as f64 + 1.0),
            committed: EmaState::default(),
            speculative: EmaState::default(),
            previewing: false,
        })
    }

    fn active(&self) -> &EmaState {
        if self.previewing {
            &self.speculative
        } else {
            &self.committed
        }
    }
}

impl Estimator for ExponentialMovingAverage {
    type Output = f64;

    fn update(&mut self, value: f64, mode: Mode) -> Status {
        match mode {
            Mode::Committed => {
                self.committed = self.committed.next(value, self.span, self.multiplier);
                self.previewing = false;
            }
            Mode::Speculative => {
                if self.committed.count == 0 {
                    return Status::NotReady;
                }
                self.speculative = self.committed.next(value, self.span, self.multiplier);
                self.previewing = true;
            }
        }

        Status::from_ready(self.is_ready())
    }

    fn get(&self) -> f64 {
        if self.is_ready() {
            self.active().ema
        } else {
            f64::NAN
        }
    }

    fn is_ready(&self) -> bool {
        self.active().count >= self.span
    }

    fn reset(&mut self) {
        self.committed = EmaState::default();
        self.speculative = EmaState::default();
        self.previewing = false;
    }
}

impl MovingAverage for ExponentialMovingAverage {
    fn with_period(period: usize) -> Result<Self, EstimatorError> {
        ExponentialMovingAverage::new(period)
    }

    fn period(&self) -> usize {
        self.span
    }

    fn is_empty(&self) -> bool {
        self.committed.count == 0
    }
}
