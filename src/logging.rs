// src/logging.rs

//! Append-only trial records for reproducible, auditable runs.
//!
//! Two independent logs cover one run: the summary log gains one row per
//! (config, candidate) simulation inside the objective, the optimizer log
//! one row per minimizer evaluation. Rows are appended in evaluation order
//! and never rewritten, so a run aborted mid-flight leaves both logs valid.

use crate::error::CalibrateError;
use crate::params::{param_name, ParameterMatrix, PARAMS_PER_REGION};
use crate::reference::ConstantConfig;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// One raw simulation trial: which config, which candidate, what came out.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    pub config: ConstantConfig,
    pub params: ParameterMatrix,
    pub sim_sum: f64,
    pub sim_err: f64,
}

/// One minimizer evaluation: the flattened candidate, the raw objective,
/// the scaled penalty, and their sum.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub params: Vec<f64>,
    pub raw_err: f64,
    pub penalty: f64,
    pub combined: f64,
}

/// Logging collaborator handed to the objective and the search driver by
/// construction, so tests can substitute an in-memory fake.
pub trait TrialLogger {
    fn log_trial(&self, record: &TrialRecord) -> Result<(), CalibrateError>;
    fn log_iteration(&self, record: &IterationRecord) -> Result<(), CalibrateError>;
}

fn region_param_names(num_regions: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(num_regions * PARAMS_PER_REGION);
    for i in 0..num_regions {
        for j in 0..PARAMS_PER_REGION {
            names.push(param_name(i, j));
        }
    }
    names
}

/// CSV logs on disk: `output.dat` (summary) and `optimization_output.dat`
/// (optimizer). Headers are written at creation, one row is appended and
/// flushed per event.
pub struct CsvTrialLogger {
    summary: Mutex<csv::Writer<File>>,
    optimizer: Mutex<csv::Writer<File>>,
}

impl CsvTrialLogger {
    pub const SUMMARY_FILE: &'static str = "output.dat";
    pub const OPTIMIZER_FILE: &'static str = "optimization_output.dat";

    pub fn create(output_dir: &Path, num_regions: usize) -> Result<Self, CalibrateError> {
        let names = region_param_names(num_regions);

        let mut summary = csv::Writer::from_path(output_dir.join(Self::SUMMARY_FILE))?;
        let mut header = vec!["coll".to_string(), "ap_radius".to_string()];
        header.extend(names.iter().cloned());
        header.extend(["mes_sum".to_string(), "mes_err".to_string()]);
        summary.write_record(&header)?;
        summary.flush()?;

        let mut optimizer = csv::Writer::from_path(output_dir.join(Self::OPTIMIZER_FILE))?;
        let mut header = names;
        header.extend([
            "param_err".to_string(),
            "param_penalty".to_string(),
            "opt_err".to_string(),
        ]);
        optimizer.write_record(&header)?;
        optimizer.flush()?;

        Ok(Self {
            summary: Mutex::new(summary),
            optimizer: Mutex::new(optimizer),
        })
    }
}

impl TrialLogger for CsvTrialLogger {
    fn log_trial(&self, record: &TrialRecord) -> Result<(), CalibrateError> {
        let mut row = vec![
            record.config.collimators.to_string(),
            record.config.aperture_radius.to_string(),
        ];
        row.extend(record.params.flatten().iter().map(|v| v.to_string()));
        row.push(record.sim_sum.to_string());
        row.push(record.sim_err.to_string());

        let mut writer = self.summary.lock().expect("summary log poisoned");
        writer.write_record(&row)?;
        writer.flush()?;
        Ok(())
    }

    fn log_iteration(&self, record: &IterationRecord) -> Result<(), CalibrateError> {
        let mut row: Vec<String> = record.params.iter().map(|v| v.to_string()).collect();
        row.push(record.raw_err.to_string());
        row.push(record.penalty.to_string());
        row.push(record.combined.to_string());

        let mut writer = self.optimizer.lock().expect("optimizer log poisoned");
        writer.write_record(&row)?;
        writer.flush()?;
        Ok(())
    }
}

/// In-memory fake for tests.
#[derive(Default)]
pub struct MemoryLogger {
    pub trials: Mutex<Vec<TrialRecord>>,
    pub iterations: Mutex<Vec<IterationRecord>>,
}

impl TrialLogger for MemoryLogger {
    fn log_trial(&self, record: &TrialRecord) -> Result<(), CalibrateError> {
        self.trials.lock().expect("trials poisoned").push(record.clone());
        Ok(())
    }

    fn log_iteration(&self, record: &IterationRecord) -> Result<(), CalibrateError> {
        self.iterations.lock().expect("iterations poisoned").push(record.clone());
        Ok(())
    }
}
