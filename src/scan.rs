// src/scan.rs

//! Organized grid scan of parameter space: scale one region at a time from
//! a baseline and record the achieved count rates. Useful for breadth
//! before handing an initial guess to the simplex search.

use crate::error::CalibrateError;
use crate::logging::{TrialLogger, TrialRecord};
use crate::params::ParameterMatrix;
use crate::reference::ConstantConfig;
use crate::runner::Simulator;
use ndarray::Array1;
use std::path::Path;

/// Scaling grids applied to one region's (R0, alpha, m) triple: R0 is
/// scaled by k1, alpha left alone, m scaled by k3.
pub const K1_RANGE: (f64, f64) = (0.75, 1.0);
pub const K3_RANGE: (f64, f64) = (0.3, 1.0);

/// For every config, region, and (k1, k3) grid point, runs the simulator on
/// the scaled baseline and appends one summary-log row. No comparison to
/// reference data; the scan only records what each scaling achieves.
pub fn grid_scan<S: Simulator>(
    baseline: &ParameterMatrix,
    configs: &[ConstantConfig],
    samples_per_axis: usize,
    sample_count: u64,
    simulator: &S,
    logger: &dyn TrialLogger,
    output_root: &Path,
) -> Result<(), CalibrateError> {
    let k1_grid = Array1::linspace(K1_RANGE.0, K1_RANGE.1, samples_per_axis);
    let k3_grid = Array1::linspace(K3_RANGE.0, K3_RANGE.1, samples_per_axis);

    for &config in configs {
        for region in 0..baseline.num_regions() {
            log::info!("scanning region {}", region + 1);
            for &k1 in &k1_grid {
                for &k3 in &k3_grid {
                    let scaled = baseline.scale_region(region, [k1, 1.0, k3]);
                    let simulated =
                        simulator.simulate(sample_count, config, &scaled, output_root)?;
                    logger.log_trial(&TrialRecord {
                        config,
                        params: scaled,
                        sim_sum: simulated.sum,
                        sim_err: simulated.err,
                    })?;
                }
            }
        }
    }
    Ok(())
}
