// src/params.rs

//! The candidate parameter matrix, its feasible region, and the
//! out-of-bounds penalty.

use crate::error::CalibrateError;
use ndarray::Array2;

/// Each region of interest carries a (R0, alpha, m) triple.
pub const PARAMS_PER_REGION: usize = 3;

/// Command-line names for the three per-region parameters, 1-indexed by
/// region: `R0_1`, `alpha_1`, `m_1`, ...
pub fn param_name(region: usize, param: usize) -> String {
    let prefix = ["R0_", "alpha_", "m_"][param];
    format!("{}{}", prefix, region + 1)
}

/// An ordered set of per-region (R0, alpha, m) triples. Candidates are
/// never mutated in place; the search driver proposes fresh matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMatrix {
    values: Array2<f64>,
}

impl ParameterMatrix {
    /// Builds a matrix from (regions, 3)-shaped values.
    pub fn new(values: Array2<f64>) -> Result<Self, CalibrateError> {
        if values.ncols() != PARAMS_PER_REGION {
            return Err(CalibrateError::WrongColumnCount(values.ncols()));
        }
        Ok(Self { values })
    }

    /// Reshapes a flat vector (row-major over regions then parameter index)
    /// back into a matrix, validating against the expected region count.
    pub fn from_flat(flat: &[f64], num_regions: usize) -> Result<Self, CalibrateError> {
        if flat.len() != num_regions * PARAMS_PER_REGION {
            return Err(CalibrateError::ShapeMismatch {
                expected: num_regions,
                found: flat.len(),
            });
        }
        let values = Array2::from_shape_vec((num_regions, PARAMS_PER_REGION), flat.to_vec())
            .map_err(|_| CalibrateError::ShapeMismatch {
                expected: num_regions,
                found: flat.len(),
            })?;
        Ok(Self { values })
    }

    pub fn num_regions(&self) -> usize {
        self.values.nrows()
    }

    pub fn value(&self, region: usize, param: usize) -> f64 {
        self.values[[region, param]]
    }

    /// Row-major flat view for the minimizer.
    pub fn flatten(&self) -> Vec<f64> {
        self.values.iter().cloned().collect()
    }

    /// Returns a new matrix with one region's triple scaled elementwise.
    pub fn scale_region(&self, region: usize, factors: [f64; PARAMS_PER_REGION]) -> Self {
        let mut values = self.values.clone();
        for (j, &k) in factors.iter().enumerate() {
            values[[region, j]] *= k;
        }
        Self { values }
    }
}

/// Inclusive (lower, upper) limits parallel to a `ParameterMatrix`.
/// Fixed for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct ParamBounds {
    lower: Array2<f64>,
    upper: Array2<f64>,
}

impl ParamBounds {
    pub fn new(lower: Array2<f64>, upper: Array2<f64>) -> Result<Self, CalibrateError> {
        if lower.dim() != upper.dim() {
            return Err(CalibrateError::BoundsShapeMismatch {
                lower: lower.dim(),
                upper: upper.dim(),
            });
        }
        if lower.ncols() != PARAMS_PER_REGION {
            return Err(CalibrateError::WrongColumnCount(lower.ncols()));
        }
        for region in 0..lower.nrows() {
            for param in 0..PARAMS_PER_REGION {
                let (lo, up) = (lower[[region, param]], upper[[region, param]]);
                if lo > up {
                    return Err(CalibrateError::InvalidBounds { region, param, lower: lo, upper: up });
                }
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn num_regions(&self) -> usize {
        self.lower.nrows()
    }

    pub fn lower(&self, region: usize, param: usize) -> f64 {
        self.lower[[region, param]]
    }

    pub fn upper(&self, region: usize, param: usize) -> f64 {
        self.upper[[region, param]]
    }

    /// Width of the feasible interval for one entry.
    pub fn span(&self, region: usize, param: usize) -> f64 {
        self.upper[[region, param]] - self.lower[[region, param]]
    }
}

/// Quadratic out-of-bounds cost: zero inside the feasible box, growing as
/// the squared distance to the nearest bound outside it. Smoothness keeps
/// the derivative-free minimizer informed without hard rejection.
pub fn bounds_penalty(params: &ParameterMatrix, bounds: &ParamBounds) -> f64 {
    assert_eq!(
        params.num_regions(),
        bounds.num_regions(),
        "parameter matrix and bounds must cover the same regions"
    );
    let mut penalty = 0.0;
    for i in 0..params.num_regions() {
        for j in 0..PARAMS_PER_REGION {
            let v = params.value(i, j);
            let lo = bounds.lower(i, j);
            let up = bounds.upper(i, j);
            if v < lo {
                penalty += (lo - v).powi(2);
            } else if v > up {
                penalty += (v - up).powi(2);
            }
        }
    }
    penalty
}
