/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use std::str::FromStr;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::est::compute::estimator::exponential_moving_average::ExponentialMovingAverage;
use crate::est::compute::estimator::min_max::{ExtremumOutputSelector, MinMax};
use crate::est::compute::estimator::simple_moving_average::SimpleMovingAverage;
use crate::est::compute::estimator::standard_deviation::{StandardDeviation, Variance, VarianceKind};
use crate::est::compute::estimator::sum::WindowSum;
use crate::est::compute::estimator::Estimator;
use crate::est::compute::indicator::bollinger_bands::{BandsOutputSelector, BollingerBands};
use crate::est::compute::indicator::momentum::Momentum;
use crate::est::compute::indicator::oscillator::{
    MovingAverageOscillator, OscillatorOutputSelector,
};
use crate::est::compute::indicator::stochastic::{Stochastic, StochasticOutputSelector};
use crate::est::error::{DefinitionError, EstimatorError};
use crate::est::mode::{Mode, Status};

type Arguments<'a> = SmallVec<[&'a str; 4]>;

///
/// Textual estimator definition of the form `kind(arg, ...)[.output]`, e.g. `sma(20)`,
/// `stddev(20, population)`, `bollinger_bands(20, 2.0).lower_band` or `macd(12, 26, 9).signal`.
///
/// Parsing only checks the shape of the definition. Parameter values are validated by
/// [`Definition::build`], which degrades to an estimator that never becomes ready.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Definition {
    Sum {
        period: usize,
    },
    SimpleMovingAverage {
        period: usize,
    },
    ExponentialMovingAverage {
        period: usize,
    },
    Variance {
        period: usize,
        kind: VarianceKind,
    },
    StandardDeviation {
        period: usize,
        kind: VarianceKind,
    },
    MinMax {
        window: usize,
        shift: usize,
        output: ExtremumOutputSelector,
    },
    Momentum {
        period: usize,
    },
    BollingerBands {
        period: usize,
        band_multiplier: f64,
        output: BandsOutputSelector,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
        output: StochasticOutputSelector,
    },
    MovingAverageOscillator {
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
        output: OscillatorOutputSelector,
    },
}

impl FromStr for Definition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        trace!("parsing estimator definition('{s}')");

        let s = s.trim();
        let (kind, rest) = s
            .split_once('(')
            .ok_or_else(|| DefinitionError::Malformed(String::from(s)))?;
        let (args, output) = rest
            .rsplit_once(')')
            .ok_or_else(|| DefinitionError::Malformed(String::from(s)))?;

        let output = match output {
            "" => None,
            suffix => Some(
                suffix
                    .strip_prefix('.')
                    .ok_or_else(|| DefinitionError::Malformed(String::from(s)))?,
            ),
        };

        let args: Arguments = if args.trim().is_empty() {
            SmallVec::new()
        } else {
            args.split(',').map(str::trim).collect()
        };

        match kind.trim() {
            "sum" => {
                let period = single_lane("Sum", &args, output)?;
                Ok(Definition::Sum { period })
            }
            "sma" | "simple_moving_average" => {
                let period = single_lane("SimpleMovingAverage", &args, output)?;
                Ok(Definition::SimpleMovingAverage { period })
            }
            "ema" | "exponential_moving_average" => {
                let period = single_lane("ExponentialMovingAverage", &args, output)?;
                Ok(Definition::ExponentialMovingAverage { period })
            }
            "variance" => {
                let (period, kind) = dispersion("Variance", &args, output)?;
                Ok(Definition::Variance { period, kind })
            }
            "stddev" | "standard_deviation" => {
                let (period, kind) = dispersion("StandardDeviation", &args, output)?;
                Ok(Definition::StandardDeviation { period, kind })
            }
            "min_max" => {
                const COMPONENT: &str = "MinMax";
                check_arity(COMPONENT, &args, 1, 2)?;
                Ok(Definition::MinMax {
                    window: parse_argument(COMPONENT, args[0])?,
                    shift: optional_argument(COMPONENT, &args, 1, 0)?,
                    output: selector(output, ExtremumOutputSelector::Max)?,
                })
            }
            "momentum" => {
                let period = single_lane("Momentum", &args, output)?;
                Ok(Definition::Momentum { period })
            }
            "bollinger_bands" => {
                const COMPONENT: &str = "BollingerBands";
                check_arity(COMPONENT, &args, 1, 2)?;
                Ok(Definition::BollingerBands {
                    period: parse_argument(COMPONENT, args[0])?,
                    band_multiplier: optional_argument(COMPONENT, &args, 1, 2.0)?,
                    output: selector(output, BandsOutputSelector::Average)?,
                })
            }
            "stochastic" => {
                const COMPONENT: &str = "Stochastic";
                check_arity(COMPONENT, &args, 1, 2)?;
                Ok(Definition::Stochastic {
                    k_period: parse_argument(COMPONENT, args[0])?,
                    d_period: optional_argument(COMPONENT, &args, 1, 3)?,
                    output: selector(output, StochasticOutputSelector::K)?,
                })
            }
            "macd" | "moving_average_oscillator" => {
                const COMPONENT: &str = "MovingAverageOscillator";
                check_arity(COMPONENT, &args, 3, 3)?;
                Ok(Definition::MovingAverageOscillator {
                    fast_period: parse_argument(COMPONENT, args[0])?,
                    slow_period: parse_argument(COMPONENT, args[1])?,
                    signal_period: parse_argument(COMPONENT, args[2])?,
                    output: selector(output, OscillatorOutputSelector::Line)?,
                })
            }
            unknown => Err(DefinitionError::UnrecognizedKind(String::from(unknown)).into()),
        }
    }
}

impl Definition {
    pub fn try_build(&self) -> Result<DynamicEstimator, EstimatorError> {
        let estimator = match *self {
            Definition::Sum { period } => DynamicEstimator::Sum(WindowSum::new(period)?),
            Definition::SimpleMovingAverage { period } => {
                DynamicEstimator::SimpleMovingAverage(SimpleMovingAverage::new(period)?)
            }
            Definition::ExponentialMovingAverage { period } => {
                DynamicEstimator::ExponentialMovingAverage(ExponentialMovingAverage::new(period)?)
            }
            Definition::Variance { period, kind } => {
                DynamicEstimator::Variance(Variance::new(period, kind)?)
            }
            Definition::StandardDeviation { period, kind } => {
                DynamicEstimator::StandardDeviation(StandardDeviation::new(period, kind)?)
            }
            Definition::MinMax {
                window,
                shift,
                output,
            } => DynamicEstimator::MinMax(MinMax::with_shift(window, shift)?, output),
            Definition::Momentum { period } => DynamicEstimator::Momentum(Momentum::new(period)?),
            Definition::BollingerBands {
                period,
                band_multiplier,
                output,
            } => DynamicEstimator::BollingerBands(
                BollingerBands::new(period, band_multiplier)?,
                output,
            ),
            Definition::Stochastic {
                k_period,
                d_period,
                output,
            } => DynamicEstimator::Stochastic(
                Stochastic::<SimpleMovingAverage>::new(k_period, d_period)?,
                output,
            ),
            Definition::MovingAverageOscillator {
                fast_period,
                slow_period,
                signal_period,
                output,
            } => DynamicEstimator::MovingAverageOscillator(
                MovingAverageOscillator::<
                    ExponentialMovingAverage,
                    ExponentialMovingAverage,
                    ExponentialMovingAverage,
                >::new(fast_period, slow_period, signal_period)?,
                output,
            ),
        };

        Ok(estimator)
    }

    pub fn build(&self) -> DynamicEstimator {
        self.try_build().unwrap_or_else(|error| {
            warn!("Definition({self:?}) degraded to unconfigured estimator: {error}");
            DynamicEstimator::Unconfigured(error)
        })
    }
}

fn check_arity(
    component: &'static str,
    args: &Arguments,
    min: usize,
    max: usize,
) -> Result<(), DefinitionError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(DefinitionError::WrongArity {
            component,
            expected: max,
            actual: args.len(),
        })
    }
}

fn parse_argument<T: FromStr>(component: &'static str, arg: &str) -> Result<T, DefinitionError> {
    arg.parse().map_err(|_| DefinitionError::InvalidParameter {
        parameter: String::from(arg),
        component,
    })
}

fn optional_argument<T: FromStr>(
    component: &'static str,
    args: &Arguments,
    position: usize,
    default: T,
) -> Result<T, DefinitionError> {
    match args.get(position) {
        Some(arg) => parse_argument(component, arg),
        None => Ok(default),
    }
}

fn selector<S>(output: Option<&str>, default: S) -> Result<S, anyhow::Error>
where
    S: FromStr<Err = anyhow::Error>,
{
    match output {
        Some(output) => output.parse(),
        None => Ok(default),
    }
}

fn single_lane(
    component: &'static str,
    args: &Arguments,
    output: Option<&str>,
) -> Result<usize, anyhow::Error> {
    if let Some(output) = output {
        return Err(DefinitionError::UnrecognizedSelector {
            unrecognized: String::from(output),
            component,
        }
        .into());
    }
    check_arity(component, args, 1, 1)?;
    Ok(parse_argument(component, args[0])?)
}

fn dispersion(
    component: &'static str,
    args: &Arguments,
    output: Option<&str>,
) -> Result<(usize, VarianceKind), anyhow::Error> {
    if let Some(output) = output {
        return Err(DefinitionError::UnrecognizedSelector {
            unrecognized: String::from(output),
            component,
        }
        .into());
    }
    check_arity(component, args, 1, 2)?;

    let period = parse_argument(component, args[0])?;
    let kind = match args.get(1) {
        Some(kind) => kind.parse()?,
        None => VarianceKind::Sample,
    };

    Ok((period, kind))
}

///
/// Single lane estimator built from a [`Definition`]. Multi lane indicators report the lane
/// chosen by the definition through `get`, all lanes through `outputs`.
///
#[derive(Debug, Clone)]
pub enum DynamicEstimator {
    Sum(WindowSum),
    SimpleMovingAverage(SimpleMovingAverage),
    ExponentialMovingAverage(ExponentialMovingAverage),
    Variance(Variance),
    StandardDeviation(StandardDeviation),
    MinMax(MinMax, ExtremumOutputSelector),
    Momentum(Momentum),
    BollingerBands(BollingerBands, BandsOutputSelector),
    Stochastic(Stochastic, StochasticOutputSelector),
    MovingAverageOscillator(MovingAverageOscillator, OscillatorOutputSelector),
    Unconfigured(EstimatorError),
}

macro_rules! dispatch {
    ($target:expr, $estimator:ident => $configured:expr, $unconfigured:expr) => {
        match $target {
            DynamicEstimator::Sum($estimator) => $configured,
            DynamicEstimator::SimpleMovingAverage($estimator) => $configured,
            DynamicEstimator::ExponentialMovingAverage($estimator) => $configured,
            DynamicEstimator::Variance($estimator) => $configured,
            DynamicEstimator::StandardDeviation($estimator) => $configured,
            DynamicEstimator::MinMax($estimator, _) => $configured,
            DynamicEstimator::Momentum($estimator) => $configured,
            DynamicEstimator::BollingerBands($estimator, _) => $configured,
            DynamicEstimator::Stochastic($estimator, _) => $configured,
            DynamicEstimator::MovingAverageOscillator($estimator, _) => $configured,
            DynamicEstimator::Unconfigured(_) => $unconfigured,
        }
    };
}

impl DynamicEstimator {
    pub fn is_configured(&self) -> bool {
        !matches!(self, DynamicEstimator::Unconfigured(_))
    }

    ///
    /// Every lane of the active state, in selector ordinal order
    ///
    pub fn outputs(&self) -> SmallVec<[f64; 3]> {
        match self {
            DynamicEstimator::MinMax(estimator, _) => {
                let extrema = estimator.get();
                SmallVec::from_slice(&[extrema.max, extrema.min])
            }
            DynamicEstimator::BollingerBands(estimator, _) => {
                let entry = estimator.get();
                SmallVec::from_slice(&[entry.upper_band, entry.average, entry.lower_band])
            }
            DynamicEstimator::Stochastic(estimator, _) => {
                let entry = estimator.get();
                SmallVec::from_slice(&[entry.k, entry.d])
            }
            DynamicEstimator::MovingAverageOscillator(estimator, _) => {
                let entry = estimator.get();
                SmallVec::from_slice(&[entry.line, entry.signal, entry.histogram])
            }
            DynamicEstimator::Unconfigured(_) => SmallVec::new(),
            single_lane => SmallVec::from_slice(&[single_lane.get()]),
        }
    }
}

impl Estimator for DynamicEstimator {
    type Output = f64;

    fn update(&mut self, value: f64, mode: Mode) -> Status {
        dispatch!(self, estimator => estimator.update(value, mode), Status::NotConfigured)
    }

    fn get(&self) -> f64 {
        match self {
            DynamicEstimator::Sum(estimator) => estimator.get(),
            DynamicEstimator::SimpleMovingAverage(estimator) => estimator.get(),
            DynamicEstimator::ExponentialMovingAverage(estimator) => estimator.get(),
            DynamicEstimator::Variance(estimator) => estimator.get(),
            DynamicEstimator::StandardDeviation(estimator) => estimator.get(),
            DynamicEstimator::MinMax(estimator, output) => estimator.output(*output),
            DynamicEstimator::Momentum(estimator) => estimator.get(),
            DynamicEstimator::BollingerBands(estimator, output) => estimator.output(*output),
            DynamicEstimator::Stochastic(estimator, output) => estimator.output(*output),
            DynamicEstimator::MovingAverageOscillator(estimator, output) => {
                estimator.output(*output)
            }
            DynamicEstimator::Unconfigured(_) => f64::NAN,
        }
    }

    fn is_ready(&self) -> bool {
        dispatch!(self, estimator => estimator.is_ready(), false)
    }

    fn reset(&mut self) {
        debug!("resetting estimator");
        dispatch!(self, estimator => estimator.reset(), ())
    }

    fn try_get(&self) -> Result<f64, EstimatorError> {
        match self {
            DynamicEstimator::Unconfigured(error) => Err(error.clone()),
            configured if configured.is_ready() => Ok(configured.get()),
            _ => Err(EstimatorError::NotReady),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::est::compute::estimator::min_max::ExtremumOutputSelector;
    use crate::est::compute::estimator::standard_deviation::{StandardDeviation, VarianceKind};
    use crate::est::compute::estimator::Estimator;
    use crate::est::compute::indicator::bollinger_bands::BandsOutputSelector;
    use crate::est::compute::indicator::oscillator::OscillatorOutputSelector;
    use crate::est::definitions::{Definition, DynamicEstimator};
    use crate::est::error::EstimatorError;
    use crate::est::mode::Status;

    #[test]
    fn should_parse_single_lane_definitions() {
        assert_eq!(
            Definition::SimpleMovingAverage { period: 20 },
            "sma(20)".parse::<Definition>().unwrap()
        );
        assert_eq!(
            Definition::ExponentialMovingAverage { period: 9 },
            " exponential_moving_average( 9 ) ".parse::<Definition>().unwrap()
        );
        assert_eq!(
            Definition::StandardDeviation {
                period: 20,
                kind: VarianceKind::Sample
            },
            "stddev(20)".parse::<Definition>().unwrap()
        );
        assert_eq!(
            Definition::Variance {
                period: 5,
                kind: VarianceKind::Population
            },
            "variance(5, population)".parse::<Definition>().unwrap()
        );
    }

    #[test]
    fn should_parse_output_lane() {
        assert_eq!(
            Definition::BollingerBands {
                period: 20,
                band_multiplier: 2.5,
                output: BandsOutputSelector::LowerBand
            },
            "bollinger_bands(20, 2.5).lower_band"
                .parse::<Definition>()
                .unwrap()
        );
        assert_eq!(
            Definition::MinMax {
                window: 10,
                shift: 2,
                output: ExtremumOutputSelector::Min
            },
            "min_max(10, 2).min".parse::<Definition>().unwrap()
        );
        assert_eq!(
            Definition::MovingAverageOscillator {
                fast_period: 12,
                slow_period: 26,
                signal_period: 9,
                output: OscillatorOutputSelector::Signal
            },
            "macd(12, 26, 9).signal".parse::<Definition>().unwrap()
        );
    }

    #[test]
    fn should_reject_malformed_definitions() {
        let error = |s: &str| s.parse::<Definition>().unwrap_err().to_string();

        assert_eq!("Unrecognized estimator kind('median')", error("median(3)"));
        assert_eq!(
            "Component('MovingAverageOscillator') expects 3 argument(s), got 2",
            error("macd(12, 26)")
        );
        assert_eq!(
            "Invalid parameter('ten') for component('SimpleMovingAverage')",
            error("sma(ten)")
        );
        assert_eq!(
            "Unrecognized selector('middle') for component('BollingerBands')",
            error("bollinger_bands(20).middle")
        );
        assert_eq!(
            "Unrecognized selector('value') for component('Sum')",
            error("sum(3).value")
        );
        assert_eq!("Malformed definition('sma 20')", error("sma 20"));
        assert_eq!("Malformed definition('sma(20)max')", error("sma(20)max"));
    }

    #[test]
    fn should_match_direct_estimator() {
        //given
        let mut dynamic = "stddev(3, population)".parse::<Definition>().unwrap().build();
        let mut direct = StandardDeviation::new(3, VarianceKind::Population).unwrap();

        //when
        for v in [4.0, 8.0, 6.0, 1.0, 9.0] {
            assert_eq!(direct.commit(v), dynamic.commit(v));
            assert_eq!(direct.get().to_bits(), dynamic.get().to_bits());
        }
        dynamic.preview(3.0);
        direct.preview(3.0);

        //then
        assert_eq!(direct.get(), dynamic.get());
    }

    #[test]
    fn should_report_selected_lane_and_all_outputs() {
        let mut dynamic = "min_max(3).min".parse::<Definition>().unwrap().build();

        for v in [5.0, 2.0, 7.0] {
            dynamic.commit(v);
        }

        assert_eq!(2.0, dynamic.get());
        assert_eq!(&[7.0, 2.0], dynamic.outputs().as_slice());
    }

    #[test]
    fn should_degrade_to_unconfigured() {
        //given
        let definitions = [
            "sma(0)",
            "stddev(1, sample)",
            "macd(26, 12, 9)",
            "bollinger_bands(20, NaN)",
            "sma(18446744073709551615)",
            "stddev(9223372036854775808, population)",
            "momentum(18446744073709551615)",
            "min_max(3, 18446744073709551615)",
            "stochastic(14, 18446744073709551615)",
        ];

        for definition in definitions {
            //when
            let mut estimator = definition.parse::<Definition>().unwrap().build();

            //then
            assert!(!estimator.is_configured());
            assert_eq!(Status::NotConfigured, estimator.commit(1.0));
            assert_eq!(Status::NotConfigured, estimator.preview(1.0));
            assert!(estimator.get().is_nan());
            assert!(estimator.outputs().is_empty());
            assert!(matches!(
                estimator.try_get(),
                Err(EstimatorError::NotConfigured(_))
            ));
            estimator.reset();
            assert!(!estimator.is_ready());
        }
    }

    #[test]
    fn should_reset_through_dispatch() {
        let mut dynamic = "momentum(1)".parse::<Definition>().unwrap().build();
        dynamic.commit(1.0);
        dynamic.commit(4.0);
        assert_eq!(Ok(3.0), dynamic.try_get());

        dynamic.reset();

        assert!(matches!(dynamic, DynamicEstimator::Momentum(_)));
        assert_eq!(Err(EstimatorError::NotReady), dynamic.try_get());
    }
}
