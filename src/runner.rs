// src/runner.rs

//! Launches the external neutron-transport simulator and addresses its
//! output by a digest of the exact inputs.

use crate::error::CalibrateError;
use crate::params::{param_name, ParameterMatrix, PARAMS_PER_REGION};
use crate::reducer::{reduce_spectrum, SimulationResult};
use crate::reference::ConstantConfig;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Stable digest over the exact numeric inputs of one simulator run.
/// Hashes the f64 bit patterns, so the digest survives process restarts
/// and any single-bit change in any input changes it.
pub fn run_digest(sample_count: u64, config: &ConstantConfig, params: &ParameterMatrix) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sample_count.to_le_bytes());
    hasher.update(config.collimators.to_le_bytes());
    hasher.update(config.aperture_radius.to_bits().to_le_bytes());
    for value in params.flatten() {
        hasher.update(value.to_bits().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Capability interface over the external simulator: turn a candidate into
/// a count-rate estimate. The production implementation shells out; tests
/// substitute canned results.
pub trait Simulator {
    fn simulate(
        &self,
        sample_count: u64,
        config: ConstantConfig,
        params: &ParameterMatrix,
        output_root: &Path,
    ) -> Result<SimulationResult, CalibrateError>;
}

/// Invokes `mcrun` on the SANS1 instrument model as a blocking child
/// process. No timeout and no retry: simulations run for seconds to hours
/// and a transient failure is indistinguishable from a deterministic one
/// without operator inspection.
#[derive(Debug, Clone)]
pub struct McstasSimulator {
    pub executable: String,
    pub instrument: String,
    pub mpi_processes: u32,
    pub seed: u64,
}

impl Default for McstasSimulator {
    fn default() -> Self {
        Self {
            executable: "mcrun".to_string(),
            instrument: "SANS1.instr".to_string(),
            mpi_processes: 32,
            seed: 100_100_100,
        }
    }
}

impl McstasSimulator {
    /// Runs the simulator for one candidate and returns the run directory,
    /// `output_root/run_<digest>`. The directory is content-addressed for
    /// traceability; an existing directory is never treated as a cache hit
    /// and the simulation is always re-run.
    pub fn run(
        &self,
        sample_count: u64,
        config: ConstantConfig,
        params: &ParameterMatrix,
        output_root: &Path,
    ) -> Result<PathBuf, CalibrateError> {
        let digest = run_digest(sample_count, &config, params);
        let run_dir = output_root.join(format!("run_{}", digest));
        if run_dir.exists() {
            log::debug!("run directory {} already exists, re-running", run_dir.display());
        }

        let mut command = Command::new(&self.executable);
        command
            .arg(format!("--mpi={}", self.mpi_processes))
            .arg(&self.instrument)
            .arg("-d")
            .arg(&run_dir)
            .arg("-s")
            .arg(self.seed.to_string())
            .arg("-n")
            .arg(sample_count.to_string())
            .arg("Wavelength_Min=0")
            .arg("Wavelength_Max=20")
            .arg("VS_Central_Wavelength=0")
            .arg("Channel=2")
            .arg(format!("N={}", config.collimators))
            .arg(format!("Exit_slit_radius={:.4}", config.aperture_radius));
        for i in 0..params.num_regions() {
            for j in 0..PARAMS_PER_REGION {
                command.arg(format!("{}={}", param_name(i, j), params.value(i, j)));
            }
        }

        log::info!("running command: {:?}", command);
        let status = command.status().map_err(|e| CalibrateError::SimulationProcessFailure {
            command: format!("{:?}", command),
            reason: format!("failed to launch: {}", e),
        })?;
        if !status.success() {
            return Err(CalibrateError::SimulationProcessFailure {
                command: format!("{:?}", command),
                reason: format!("exited with {}", status),
            });
        }
        Ok(run_dir)
    }
}

impl Simulator for McstasSimulator {
    fn simulate(
        &self,
        sample_count: u64,
        config: ConstantConfig,
        params: &ParameterMatrix,
        output_root: &Path,
    ) -> Result<SimulationResult, CalibrateError> {
        let run_dir = self.run(sample_count, config, params, output_root)?;
        reduce_spectrum(&run_dir)
    }
}
