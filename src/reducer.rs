// src/reducer.rs

//! Reduces one simulator run to a count-rate estimate.

use crate::error::CalibrateError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Relative path of the spectrum monitor output inside a run directory.
pub const SPECTRUM_FILE: &str = "Sample_Position_spectrum.dat";

/// Detector efficiency calibration constant: corrected intensity is
/// I(lambda) * lambda / EFFICIENCY_CONSTANT.
pub const EFFICIENCY_CONSTANT: f64 = 1.8e5;

/// Estimated count rate from one simulator run, with its uncertainty.
/// Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    pub sum: f64,
    pub err: f64,
}

/// Loads the 3-column spectrum table (wavelength, intensity, intensity
/// uncertainty) written by the simulator, applies the linear
/// wavelength-dependent efficiency correction, and reduces it to a total
/// count rate with quadrature-combined uncertainty.
///
/// Comment lines starting with `#` (McStas file headers) are skipped.
pub fn reduce_spectrum(run_dir: &Path) -> Result<SimulationResult, CalibrateError> {
    let path = run_dir.join(SPECTRUM_FILE);
    let text = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CalibrateError::DataMissing(path.clone())
        } else {
            CalibrateError::Io(e)
        }
    })?;

    let mut sum = 0.0;
    let mut err_sq = 0.0;
    let mut bins = 0usize;
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(CalibrateError::MalformedData {
                path: path.clone(),
                reason: format!("line {}: expected 3 columns, found {}", line_no + 1, fields.len()),
            });
        }
        let parse = |s: &str| {
            s.parse::<f64>().map_err(|_| CalibrateError::MalformedData {
                path: path.clone(),
                reason: format!("line {}: not a number: {:?}", line_no + 1, s),
            })
        };
        let wavelength = parse(fields[0])?;
        let intensity = parse(fields[1])?;
        let intensity_err = parse(fields[2])?;

        let corrected = intensity * wavelength / EFFICIENCY_CONSTANT;
        let corrected_err = intensity_err * wavelength / EFFICIENCY_CONSTANT;
        sum += corrected;
        err_sq += corrected_err * corrected_err;
        bins += 1;
    }

    if bins == 0 {
        return Err(CalibrateError::MalformedData {
            path,
            reason: "no data rows".to_string(),
        });
    }

    Ok(SimulationResult { sum, err: err_sq.sqrt() })
}
