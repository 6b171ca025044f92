/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::str::FromStr;

use crate::est::compute::estimator::moments::{Moments, WindowMoments};
use crate::est::compute::estimator::Estimator;
use crate::est::error::{check_period, DefinitionError, EstimatorError};
use crate::est::mode::{Mode, Status};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VarianceKind {
    /// Divides by N.
    Population,
    /// Divides by N - 1.
    Sample,
}

impl VarianceKind {
    fn denominator(self, span: usize) -> f64 {
        match self {
            VarianceKind::Population => span as f64,
            VarianceKind::Sample => (span - 1) as f64,
        }
    }
}

impl FromStr for VarianceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "population" => Ok(VarianceKind::Population),
            "sample" => Ok(VarianceKind::Sample),
            _ => Err(DefinitionError::InvalidParameter {
                parameter: String::from(s),
                component: "VarianceKind",
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variance {
    moments: WindowMoments,
    kind: VarianceKind,
    span_f64: f64,
    denominator: f64,
}

impl Variance {
    pub fn new(span: usize, kind: VarianceKind) -> Result<Self, EstimatorError> {
        check_period(span, "Variance")?;
        if kind == VarianceKind::Sample && span < 2 {
            return Err(EstimatorError::NotConfigured(
                "sample variance requires a period of at least 2".into(),
            ));
        }

        Ok(Self {
            moments: WindowMoments::new(span),
            kind,
            span_f64: span as f64,
            denominator: kind.denominator(span),
        })
    }

    pub fn kind(&self) -> VarianceKind {
        self.kind
    }

    pub fn period(&self) -> usize {
        self.moments.period()
    }

    ///
    /// Mean of the same window the variance is computed over
    ///
    pub fn mean(&self) -> f64 {
        if self.is_ready() {
            self.moments.moments().sum / self.span_f64
        } else {
            f64::NAN
        }
    }

    pub fn recompute(&mut self) {
        self.moments.recompute();
    }

    #[inline]
    fn variance_of(&self, moments: Moments) -> f64 {
        let mean = moments.sum / self.span_f64;
        let squared_deviations = moments.sum_of_squares - self.span_f64 * mean * mean;
        squared_deviations.max(0.0) / self.denominator
    }
}

impl Estimator for Variance {
    type Output = f64;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        self.moments.update(value, mode)
    }

    fn get(&self) -> f64 {
        if self.is_ready() {
            self.variance_of(self.moments.moments())
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

#[derive(Debug, Clone)]
pub struct StandardDeviation {
    variance: Variance,
}

impl StandardDeviation {
    pub fn new(span: usize, kind: VarianceKind) -> Result<Self, EstimatorError> {
        Ok(Self {
            variance: Variance::new(span, kind)?,
        })
    }

    pub fn period(&self) -> usize {
        self.variance.period()
    }

    pub fn mean(&self) -> f64 {
        self.variance.mean()
    }

    pub fn recompute(&mut self) {
        self.variance.recompute();
    }
}

impl Estimator for StandardDeviation {
    type Output = f64;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        self.variance.update(value, mode)
    }

    fn get(&self) -> f64 {
        self.variance.get().sqrt()
    }

    fn is_ready(&self) -> bool {
        self.variance.is_ready()
    }

    fn reset(&mut self) {
        self.variance.reset();
    }
}
