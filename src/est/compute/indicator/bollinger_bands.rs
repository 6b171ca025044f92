/*
 * Copyright (c) 2022 Kamil Konior. All rights reserved.
*/

use crate::est::compute::estimator::standard_deviation::{StandardDeviation, VarianceKind};
use crate::est::compute::estimator::Estimator;
use crate::est::error::EstimatorError;
use crate::est::mode::{Mode, Status};
use crate::est::selector::output_selector;

output_selector!(BandsOutputSelector, "BollingerBands", {
    UpperBand => "upper_band",
    Average => "average",
    LowerBand => "lower_band",
});

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandsEntry {
    pub upper_band: f64,
    pub average: f64,
    pub lower_band: f64,
}

impl BandsEntry {
    const NOT_READY: BandsEntry = BandsEntry {
        upper_band: f64::NAN,
        average: f64::NAN,
        lower_band: f64::NAN,
    };
}

#[derive(Debug, Clone)]
pub struct BollingerBands {
    band_multiplier: f64,
    standard_deviation: StandardDeviation,
}

impl BollingerBands {
    pub fn new(span: usize, band_multiplier: f64) -> Result<Self, EstimatorError> {
        if !band_multiplier.is_finite() || band_multiplier < 0.0 {
            return Err(EstimatorError::NotConfigured(
                format!("band multiplier({band_multiplier}) must be finite and non-negative")
                    .into(),
            ));
        }

        Ok(Self {
            band_multiplier,
            standard_deviation: StandardDeviation::new(span, VarianceKind::Population)?,
        })
    }

    pub fn output(&self, selector: BandsOutputSelector) -> f64 {
        let entry = self.get();
        match selector {
            BandsOutputSelector::UpperBand => entry.upper_band,
            BandsOutputSelector::Average => entry.average,
            BandsOutputSelector::LowerBand => entry.lower_band,
        }
    }
}

impl Estimator for BollingerBands {
    type Output = BandsEntry;

    #[inline]
    fn update(&mut self, value: f64, mode: Mode) -> Status {
        self.standard_deviation.update(value, mode)
    }

    fn get(&self) -> BandsEntry {
        if !self.is_ready() {
            return BandsEntry::NOT_READY;
        }

        let sd = self.standard_deviation.get();
        let mean = self.standard_deviation.mean();

        BandsEntry {
            upper_band: mean + sd * self.band_multiplier,
            average: mean,
            lower_band: mean - sd * self.band_multiplier,
        }
    }

    fn is_ready(&self) -> bool {
        self.standard_deviation.is_ready()
    }

    fn reset(&mut self) {
        self.standard_deviation.reset();
    }
}

#[cfg(test)]
mod tests {
    use crate::est::compute::estimator::Estimator;
    use crate::est::compute::indicator::bollinger_bands::{BandsOutputSelector, BollingerBands};
    use crate::est::error::EstimatorError;

    #[test]
    fn should_place_bands_around_mean() {
        //given
        let mut bands = BollingerBands::new(3, 2.0).unwrap();

        //when
        [100.0, 102.0, 101.0].into_iter().for_each(|v| {
            bands.commit(v);
        });

        //then
        let entry = bands.get();
        let sd = (2.0f64 / 3.0).sqrt();
        assert!((entry.average - 101.0).abs() < 1e-9);
        assert!((entry.upper_band - (101.0 + 2.0 * sd)).abs() < 1e-9);
        assert!((entry.lower_band - (101.0 - 2.0 * sd)).abs() < 1e-9);
    }

    #[test]
    fn should_slide_window() {
        let mut bands = BollingerBands::new(3, 2.0).unwrap();

        [100.0, 102.0, 101.0, 103.0].into_iter().for_each(|v| {
            bands.commit(v);
        });

        assert!((bands.output(BandsOutputSelector::Average) - 102.0).abs() < 1e-9);
    }

    #[test]
    fn should_preview_then_commit() {
        //given
        let mut bands = BollingerBands::new(3, 1.0).unwrap();
        [1.0, 1.0, 1.0].into_iter().for_each(|v| {
            bands.commit(v);
        });

        //when
        bands.preview(4.0);
        let previewed = bands.get();
        bands.commit(1.0);

        //then
        assert!((previewed.average - 2.0).abs() < 1e-9);
        assert!(previewed.upper_band > previewed.average);
        assert_eq!(1.0, bands.get().upper_band);
        assert_eq!(1.0, bands.get().lower_band);
    }

    #[test]
    fn should_reject_invalid_multiplier() {
        assert!(matches!(
            BollingerBands::new(20, f64::NAN),
            Err(EstimatorError::NotConfigured(_))
        ));
        assert!(BollingerBands::new(0, 2.0).is_err());
    }
}
