/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::moments::WindowMoments;
use crate::est::compute::estimator::{Estimator, MovingAverage};
use crate::est::error::{check_period, EstimatorError};
use crate::est::mode::{Mode, Status};

#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    moments: WindowMoments,
    span_f64: f64,
}

impl SimpleMovingAverage {
    pub fn new(span: usize) -> Result<Self, EstimatorError> {
        check_period(span, "SimpleMovingAverage")?;

        Ok(Self {
            moments: WindowMoments::new(span),
            span_f64: span as f64,
        })
    }

    pub fn recompute(&mut self) {
        self.moments.recompute();
    }
}

impl Estimator for SimpleMovingAverage {
    type Output = f64;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        self.moments.update(value, mode)
    }

    fn get(&self) -> f64 {
        if self.is_ready() {
            self.moments.moments().sum / self.span_f64
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

impl MovingAverage for SimpleMovingAverage {
    fn with_period(period: usize) -> Result<Self, EstimatorError> {
        SimpleMovingAverage::new(period)
    }

    fn period(&self) -> usize {
        self.moments.period()
    }

    fn is_empty(&self) -> bool {
        self.moments.window().committed().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::est::compute::estimator::simple_moving_average::SimpleMovingAverage;
    use crate::est::compute::estimator::{Estimator, MovingAverage};

    #[test]
    fn should_average_window() {
        //given
        let mut sma = SimpleMovingAverage::new(3).unwrap();

        //when
        sma.commit(10.0);
        sma.commit(20.0);
        let before_ready = sma.get();
        sma.commit(30.0);
        let first = sma.get();
        sma.commit(40.0);

        //then
        assert!(before_ready.is_nan());
        assert_eq!(20.0, first);
        assert_eq!(30.0, sma.get());
        assert_eq!(3, sma.period());
    }

    #[test]
    fn should_preview_tail_value() {
        //given
        let mut sma = SimpleMovingAverage::new(3).unwrap();
        [10.0, 20.0, 30.0].into_iter().for_each(|v| {
            sma.commit(v);
        });

        //when
        sma.preview(60.0);
        let previewed = sma.get();
        sma.preview(90.0);
        let previewed_again = sma.get();

        //then
        assert_eq!((20.0 + 30.0 + 60.0) / 3.0, previewed);
        assert_eq!((20.0 + 30.0 + 90.0) / 3.0, previewed_again);
        sma.commit(40.0);
        assert_eq!(30.0, sma.get());
    }

    #[test]
    fn should_become_ready_on_preview_of_last_missing_value() {
        let mut sma = SimpleMovingAverage::new(2).unwrap();
        sma.commit(1.0);

        assert!(sma.preview(3.0).is_ready());
        assert_eq!(2.0, sma.get());

        sma.commit(5.0);
        assert_eq!(3.0, sma.get());
    }

    #[test]
    fn should_report_empty_until_first_commit() {
        let mut sma = SimpleMovingAverage::new(2).unwrap();
        assert!(sma.is_empty());

        sma.preview(1.0);
        assert!(sma.is_empty());

        sma.commit(1.0);
        assert!(!sma.is_empty());

        sma.reset();
        assert!(sma.is_empty());
    }
}
