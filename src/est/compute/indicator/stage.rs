/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::MovingAverage;
use crate::est::error::EstimatorError;
use crate::est::mode::{Mode, Status};

///
/// Inner average of a composite indicator. A preview reaching a stage without committed
/// history is committed into a copy of the stage, and the copy answers until the next
/// commit, settle or reset.
///
#[derive(Debug, Clone)]
pub(crate) struct Stage<M> {
    inner: M,
    seeded: Option<M>,
}

impl<M: MovingAverage> Stage<M> {
    pub(crate) fn new(period: usize) -> Result<Self, EstimatorError> {
        Ok(Self {
            inner: M::with_period(period)?,
            seeded: None,
        })
    }

    pub(crate) fn update(&mut self, value: f64, mode: Mode) -> Status {
        match mode {
            Mode::Speculative if self.inner.is_empty() => {
                let mut seeded = self.inner.clone();
                let status = seeded.commit(value);
                self.seeded = Some(seeded);
                status
            }
            _ => {
                self.seeded = None;
                self.inner.update(value, mode)
            }
        }
    }

    ///
    /// Drops a seeded preview when a commit passes the stage by
    ///
    pub(crate) fn settle(&mut self) {
        self.seeded = None;
    }

    pub(crate) fn get(&self) -> f64 {
        self.active().get()
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.active().is_ready()
    }

    pub(crate) fn reset(&mut self) {
        self.inner.reset();
        self.seeded = None;
    }

    fn active(&self) -> &M {
        self.seeded.as_ref().unwrap_or(&self.inner)
    }
}
