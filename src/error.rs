// src/error.rs

//! Error types for the calibration engine.

use crate::reference::ConstantConfig;
use std::path::PathBuf;
use thiserror::Error;

/// All failure modes of a calibration run. Every variant is fatal: a failed
/// evaluation cannot be defaulted without corrupting the optimization trace,
/// so errors propagate up and abort the run with the logs left intact.
#[derive(Debug, Error)]
pub enum CalibrateError {
    #[error("no reference data for coll={} and ap_radius={}", .0.collimators, .0.aperture_radius)]
    UnknownConfig(ConstantConfig),

    #[error("simulator process failed: {command}: {reason}")]
    SimulationProcessFailure { command: String, reason: String },

    #[error("missing spectrum file: {0}")]
    DataMissing(PathBuf),

    #[error("malformed spectrum data in {path}: {reason}")]
    MalformedData { path: PathBuf, reason: String },

    #[error("parameter shape mismatch: expected {expected} regions x 3, got {found} values")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("parameter matrix must have 3 columns per region, got {0}")]
    WrongColumnCount(usize),

    #[error("bounds shape mismatch: lower is {lower:?}, upper is {upper:?}")]
    BoundsShapeMismatch {
        lower: (usize, usize),
        upper: (usize, usize),
    },

    #[error("invalid bounds for region {region} param {param}: lower {lower} exceeds upper {upper}")]
    InvalidBounds {
        region: usize,
        param: usize,
        lower: f64,
        upper: f64,
    },

    #[error("solver error: {0}")]
    Solver(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("log write failed: {0}")]
    Csv(#[from] csv::Error),
}
