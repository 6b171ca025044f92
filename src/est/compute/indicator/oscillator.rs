/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::exponential_moving_average::ExponentialMovingAverage;
use crate::est::compute::estimator::{Estimator, MovingAverage};
use crate::est::compute::indicator::stage::Stage;
use crate::est::error::EstimatorError;
use crate::est::mode::{Mode, Status};
use crate::est::selector::output_selector;

output_selector!(OscillatorOutputSelector, "MovingAverageOscillator", {
    Line => "line",
    Signal => "signal",
    Histogram => "histogram",
});

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OscillatorEntry {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

///
/// Spread between a fast and a slow average, its smoothed signal and the distance between the two.
/// With exponential stages this is the classic MACD.
///
#[derive(Debug, Clone)]
pub struct MovingAverageOscillator<
    F = ExponentialMovingAverage,
    S = ExponentialMovingAverage,
    G = ExponentialMovingAverage,
> {
    fast: F,
    slow: S,
    signal: Stage<G>,
}

impl<F, S, G> MovingAverageOscillator<F, S, G>
where
    F: MovingAverage,
    S: MovingAverage,
    G: MovingAverage,
{
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, EstimatorError> {
        if fast_period >= slow_period {
            return Err(EstimatorError::NotConfigured(
                format!(
                    "fast period({fast_period}) must be shorter than slow period({slow_period})"
                )
                .into(),
            ));
        }

        Ok(Self {
            fast: F::with_period(fast_period)?,
            slow: S::with_period(slow_period)?,
            signal: Stage::new(signal_period)?,
        })
    }

    pub fn output(&self, selector: OscillatorOutputSelector) -> f64 {
        let entry = self.get();
        match selector {
            OscillatorOutputSelector::Line => entry.line,
            OscillatorOutputSelector::Signal => entry.signal,
            OscillatorOutputSelector::Histogram => entry.histogram,
        }
    }

    fn line(&self) -> f64 {
        self.fast.get() - self.slow.get()
    }
}

impl<F, S, G> Estimator for MovingAverageOscillator<F, S, G>
where
    F: MovingAverage,
    S: MovingAverage,
    G: MovingAverage,
{
    type Output = OscillatorEntry;

    fn update(&mut self, value: f64, mode: Mode) -> Status {
        let fast_ready = self.fast.update(value, mode).is_ready();
        let slow_ready = self.slow.update(value, mode).is_ready();

        if fast_ready && slow_ready {
            let line = self.line();
            self.signal.update(line, mode);
        } else {
            self.signal.settle();
        }

        Status::from_ready(self.is_ready())
    }

    fn get(&self) -> OscillatorEntry {
        let line = self.line();
        let signal = self.signal.get();

        OscillatorEntry {
            line,
            signal,
            histogram: line - signal,
        }
    }

    fn is_ready(&self) -> bool {
        self.fast.is_ready() && self.slow.is_ready() && self.signal.is_ready()
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }
}
