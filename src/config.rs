// src/config.rs

//! Application configuration: the fixed quantities of one calibration run.

use crate::params::{ParamBounds, ParameterMatrix};
use crate::reference::{ConstantConfig, ReferenceDataset};
use ndarray::arr2;

pub struct AppConfig {
    pub sample_count: u64,
    pub configs: Vec<ConstantConfig>,
    /// Configs covered by the parameter-space scan. The scan is for breadth
    /// on the variable parameters, so it sticks to the full-collimation
    /// setting rather than multiplying the simulation cost by every config.
    pub scan_configs: Vec<ConstantConfig>,
    pub reference: ReferenceDataset,
    pub initial_params: ParameterMatrix,
    pub bounds: ParamBounds,
    pub penalty_scale: f64,
    pub sd_tolerance: f64,
}

impl AppConfig {
    /// The GP-SANS calibration setup: 7 regions of interest, the four
    /// measured collimator settings at 0.010 m exit slit radius, and the
    /// supermirror defaults (R0=0.99, alpha=6.1, m=1; region 2 allows
    /// m up to 3).
    pub fn gp_sans() -> Self {
        let configs = [0u32, 4, 7, 8]
            .iter()
            .map(|&collimators| ConstantConfig { collimators, aperture_radius: 0.010 })
            .collect();

        let initial_params = ParameterMatrix::new(arr2(&[
            [0.99, 6.1, 1.0],
            [0.99, 6.1, 3.0],
            [0.99, 6.1, 1.0],
            [0.99, 6.1, 1.0],
            [0.99, 6.1, 1.0],
            [0.99, 6.1, 1.0],
            [0.99, 6.1, 1.0],
        ]))
        .expect("default initial parameters are well-formed");

        let lower = arr2(&[[0.0, 0.0, 0.0]; 7]);
        let upper = arr2(&[
            [0.99, 10.0, 1.0],
            [0.99, 10.0, 3.0],
            [0.99, 10.0, 1.0],
            [0.99, 10.0, 1.0],
            [0.99, 10.0, 1.0],
            [0.99, 10.0, 1.0],
            [0.99, 10.0, 1.0],
        ]);
        let bounds = ParamBounds::new(lower, upper).expect("default bounds are well-formed");

        Self {
            sample_count: 100_000_000,
            configs,
            scan_configs: vec![ConstantConfig { collimators: 8, aperture_radius: 0.010 }],
            reference: ReferenceDataset::gp_sans(),
            initial_params,
            bounds,
            penalty_scale: 1e10,
            sd_tolerance: 1e-2,
        }
    }
}
