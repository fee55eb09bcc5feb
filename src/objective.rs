// src/objective.rs

//! The scalar error of a candidate parameter matrix.

use crate::error::CalibrateError;
use crate::logging::{TrialLogger, TrialRecord};
use crate::params::ParameterMatrix;
use crate::reference::{ConstantConfig, ReferenceDataset};
use crate::runner::Simulator;
use std::path::Path;

/// Composes reference data, the simulator, and the trial log into a single
/// scalar error across all constant-parameter configurations.
pub struct CalibrationObjective<'a, S: Simulator> {
    pub sample_count: u64,
    pub configs: &'a [ConstantConfig],
    pub reference: &'a ReferenceDataset,
    pub simulator: &'a S,
    pub logger: &'a dyn TrialLogger,
    pub output_root: &'a Path,
}

impl<S: Simulator> CalibrationObjective<'_, S> {
    /// Sum over configs of the squared deviation between measured and
    /// simulated count rates. Uncertainties are recorded in the summary log
    /// but do not weight the loss. Appends one trial row per config.
    pub fn evaluate(&self, params: &ParameterMatrix) -> Result<f64, CalibrateError> {
        let mut err = 0.0;
        for &config in self.configs {
            let measured = self.reference.lookup(config)?;
            let simulated =
                self.simulator
                    .simulate(self.sample_count, config, params, self.output_root)?;
            self.logger.log_trial(&TrialRecord {
                config,
                params: params.clone(),
                sim_sum: simulated.sum,
                sim_err: simulated.err,
            })?;
            log::debug!(
                "coll={} ap_radius={}: measured {} +/- {}, simulated {} +/- {}",
                config.collimators,
                config.aperture_radius,
                measured.sum,
                measured.err,
                simulated.sum,
                simulated.err
            );
            err += (measured.sum - simulated.sum).powi(2);
        }
        Ok(err)
    }
}
