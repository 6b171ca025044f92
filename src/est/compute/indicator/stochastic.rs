/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::min_max::MinMax;
use crate::est::compute::estimator::simple_moving_average::SimpleMovingAverage;
use crate::est::compute::estimator::{Estimator, MovingAverage};
use crate::est::compute::indicator::stage::Stage;
use crate::est::error::EstimatorError;
use crate::est::mode::{Mode, Status};
use crate::est::selector::output_selector;

output_selector!(StochasticOutputSelector, "Stochastic", {
    K => "k",
    D => "d",
});

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StochasticEntry {
    pub k: f64,
    pub d: f64,
}

///
/// Position of the latest value inside the range of the last `k_period` values, in percent,
/// together with its `d_period` average. A flat range reports the midpoint.
///
#[derive(Debug, Clone)]
pub struct Stochastic<M = SimpleMovingAverage> {
    range: MinMax,
    smoothing: Stage<M>,
    committed_k: f64,
    speculative_k: f64,
    previewing: bool,
}

impl<M: MovingAverage> Stochastic<M> {
    pub fn new(k_period: usize, d_period: usize) -> Result<Self, EstimatorError> {
        Ok(Self {
            range: MinMax::new(k_period)?,
            smoothing: Stage::new(d_period)?,
            committed_k: f64::NAN,
            speculative_k: f64::NAN,
            previewing: false,
        })
    }

    pub fn output(&self, selector: StochasticOutputSelector) -> f64 {
        let entry = self.get();
        match selector {
            StochasticOutputSelector::K => entry.k,
            StochasticOutputSelector::D => entry.d,
        }
    }

    fn percent_k(&self, value: f64) -> f64 {
        let extrema = self.range.get();
        let spread = extrema.max - extrema.min;

        if spread > 0.0 {
            100.0 * (value - extrema.min) / spread
        } else {
            50.0
        }
    }
}

impl<M: MovingAverage> Estimator for Stochastic<M> {
    type Output = StochasticEntry;

    fn update(&mut self, value: f64, mode: Mode) -> Status {
        let range_ready = self.range.update(value, mode).is_ready();
        let k = if range_ready {
            self.percent_k(value)
        } else {
            f64::NAN
        };

        match mode {
            Mode::Committed => {
                self.committed_k = k;
                self.previewing = false;
            }
            Mode::Speculative => {
                if !self.range.is_previewing() {
                    return Status::NotReady;
                }
                self.speculative_k = k;
                self.previewing = true;
            }
        }

        if range_ready {
            self.smoothing.update(k, mode);
        } else {
            self.smoothing.settle();
        }

        Status::from_ready(self.is_ready())
    }

    fn get(&self) -> StochasticEntry {
        let k = if self.previewing {
            self.speculative_k
        } else {
            self.committed_k
        };

        StochasticEntry {
            k,
            d: self.smoothing.get(),
        }
    }

    fn is_ready(&self) -> bool {
        self.range.is_ready() && self.smoothing.is_ready()
    }

    fn reset(&mut self) {
        self.range.reset();
        self.smoothing.reset();
        self.committed_k = f64::NAN;
        self.speculative_k = f64::NAN;
        self.previewing = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::est::compute::estimator::exponential_moving_average::ExponentialMovingAverage;
    use crate::est::compute::estimator::simple_moving_average::SimpleMovingAverage;
    use crate::est::compute::estimator::Estimator;
    use crate::est::compute::indicator::stochastic::{Stochastic, StochasticOutputSelector};
    use crate::est::mode::Status;

    #[test]
    fn should_locate_value_in_range() {
        //given
        let mut stochastic = Stochastic::<ExponentialMovingAverage>::new(3, 1).unwrap();

        //when
        let statuses = [10.0, 20.0, 15.0]
            .into_iter()
            .map(|v| stochastic.commit(v))
            .collect::<Vec<_>>();

        //then
        assert_eq!(
            vec![Status::NotReady, Status::NotReady, Status::Ready],
            statuses
        );
        assert_eq!(50.0, stochastic.output(StochasticOutputSelector::K));
        assert_eq!(50.0, stochastic.output(StochasticOutputSelector::D));
    }

    #[test]
    fn should_smooth_k_into_d() {
        let mut stochastic = Stochastic::<SimpleMovingAverage>::new(2, 2).unwrap();

        for v in [1.0, 3.0, 2.0] {
            stochastic.commit(v);
        }

        let entry = stochastic.get();
        assert_eq!(0.0, entry.k);
        assert_eq!(50.0, entry.d);
    }

    #[test]
    fn should_report_midpoint_for_flat_range() {
        let mut stochastic = Stochastic::<ExponentialMovingAverage>::new(2, 1).unwrap();

        stochastic.commit(7.0);
        stochastic.commit(7.0);

        assert_eq!(50.0, stochastic.get().k);
    }

    #[test]
    fn should_preview_without_disturbing_smoothing() {
        //given
        let mut stochastic = Stochastic::<ExponentialMovingAverage>::new(2, 2).unwrap();
        let mut reference = Stochastic::<ExponentialMovingAverage>::new(2, 2).unwrap();
        for v in [1.0, 3.0, 2.0, 5.0] {
            stochastic.commit(v);
            reference.commit(v);
        }

        //when
        stochastic.preview(0.0);
        let previewed = stochastic.get();
        stochastic.preview(9.0);
        stochastic.commit(4.0);
        reference.commit(4.0);

        //then
        assert_eq!(0.0, previewed.k);
        assert_eq!(reference.get(), stochastic.get());
    }

    #[test]
    fn should_preview_first_smoothed_value_like_commit() {
        //given
        let mut stochastic = Stochastic::<SimpleMovingAverage>::new(3, 1).unwrap();
        stochastic.commit(1.0);
        stochastic.commit(5.0);
        let mut reference = stochastic.clone();

        //when
        let previewed_status = stochastic.preview(3.0);
        let committed_status = reference.commit(3.0);

        //then
        assert_eq!(Status::Ready, committed_status);
        assert_eq!(committed_status, previewed_status);
        assert_eq!(50.0, stochastic.output(StochasticOutputSelector::D));
        assert_eq!(reference.get(), stochastic.get());

        stochastic.commit(4.0);
        reference = Stochastic::<SimpleMovingAverage>::new(3, 1).unwrap();
        for v in [1.0, 5.0, 4.0] {
            reference.commit(v);
        }
        assert_eq!(reference.get(), stochastic.get());
    }

    #[test]
    fn should_ignore_preview_before_first_commit() {
        let mut stochastic = Stochastic::<ExponentialMovingAverage>::new(1, 1).unwrap();

        assert_eq!(Status::NotReady, stochastic.preview(5.0));
        assert!(stochastic.get().k.is_nan());
    }
}
