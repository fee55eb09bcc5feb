// src/reference.rs

//! Measured GP-SANS count rates keyed by constant experimental
//! configuration.

use crate::error::CalibrateError;

/// One experimental setting: number of collimators in the beamline and the
/// exit slit radius in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantConfig {
    pub collimators: u32,
    pub aperture_radius: f64,
}

/// A measured count rate with its uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredRate {
    pub sum: f64,
    pub err: f64,
}

/// Lookup table of measured count rates. A config with no entry is a hard
/// failure; there is no interpolation and no default.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    rows: Vec<(ConstantConfig, MeasuredRate)>,
}

impl ReferenceDataset {
    pub fn new(rows: Vec<(ConstantConfig, MeasuredRate)>) -> Self {
        Self { rows }
    }

    /// The GP-SANS measurements available for calibration.
    pub fn gp_sans() -> Self {
        let row = |coll, ap, sum, err| {
            (
                ConstantConfig { collimators: coll, aperture_radius: ap },
                MeasuredRate { sum, err },
            )
        };
        Self::new(vec![
            row(8, 0.01, 5130.0, 0.000777),
            row(7, 0.01, 4090.0, 0.000757),
            row(4, 0.01, 844.0, 1.68),
            row(0, 0.01, 264.0, 0.727),
        ])
    }

    pub fn lookup(&self, config: ConstantConfig) -> Result<MeasuredRate, CalibrateError> {
        self.rows
            .iter()
            .find(|(c, _)| c.collimators == config.collimators && c.aperture_radius == config.aperture_radius)
            .map(|(_, rate)| *rate)
            .ok_or(CalibrateError::UnknownConfig(config))
    }
}
