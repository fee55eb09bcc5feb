// src/search.rs

//! The simplex search driver: rolls a Nelder-Mead simplex through parameter
//! space over the combined objective + penalty.

use crate::error::CalibrateError;
use crate::logging::IterationRecord;
use crate::objective::CalibrationObjective;
use crate::params::{bounds_penalty, ParamBounds, ParameterMatrix, PARAMS_PER_REGION};
use crate::runner::Simulator;
use argmin::core::{CostFunction, Error, Executor};
use argmin::solver::neldermead::NelderMead;

/// Fraction of each entry's feasible span used to perturb the initial
/// simplex vertices.
pub const SIMPLEX_STEP: f64 = 0.1;

/// Fixed knobs of one search run.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Multiplier on the out-of-bounds penalty. Large enough that any
    /// in-bounds candidate dominates any out-of-bounds one.
    pub penalty_scale: f64,
    /// Standard-deviation tolerance of the Nelder-Mead internal
    /// convergence test.
    pub sd_tolerance: f64,
    /// Hard cap on minimizer iterations.
    pub max_iterations: u64,
}

/// Builds the initial simplex: vertex 0 is the initial guess, and for each
/// flattened entry one further vertex perturbs only that entry by
/// -0.1 times its feasible span. The 3M+1 vertices are affinely
/// independent, and the perturbation points toward the interior of the
/// feasible box when the guess sits on an upper bound.
pub fn initial_simplex(initial: &ParameterMatrix, bounds: &ParamBounds) -> Vec<Vec<f64>> {
    let base = initial.flatten();
    let mut simplex = Vec::with_capacity(base.len() + 1);
    simplex.push(base.clone());
    for i in 0..bounds.num_regions() {
        for j in 0..PARAMS_PER_REGION {
            let mut vertex = base.clone();
            vertex[i * PARAMS_PER_REGION + j] -= SIMPLEX_STEP * bounds.span(i, j);
            simplex.push(vertex);
        }
    }
    simplex
}

/// The cost the minimizer sees: raw objective plus scaled penalty. Each
/// evaluation appends one optimizer-log row.
pub struct CombinedCost<'a, S: Simulator> {
    pub objective: CalibrationObjective<'a, S>,
    pub bounds: &'a ParamBounds,
    pub penalty_scale: f64,
}

impl<S: Simulator> CostFunction for CombinedCost<'_, S> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, Error> {
        let params =
            ParameterMatrix::from_flat(p, self.bounds.num_regions()).map_err(Error::new)?;
        let raw_err = self.objective.evaluate(&params).map_err(|e| {
            log::error!("objective failed for candidate {:?}: {}", p, e);
            Error::new(e)
        })?;
        let penalty = self.penalty_scale * bounds_penalty(&params, self.bounds);
        log::info!("candidate err={} penalty={}", raw_err, penalty);

        self.objective
            .logger
            .log_iteration(&IterationRecord {
                params: p.clone(),
                raw_err,
                penalty,
                combined: raw_err + penalty,
            })
            .map_err(Error::new)?;

        Ok(raw_err + penalty)
    }
}

/// Runs the Nelder-Mead search from an initial guess and returns the best
/// candidate found, reshaped back into a parameter matrix. Terminates on
/// the minimizer's internal convergence test or on `max_iterations`,
/// whichever comes first.
pub fn simplex_search<S: Simulator>(
    initial: &ParameterMatrix,
    bounds: &ParamBounds,
    settings: &SearchSettings,
    objective: CalibrationObjective<'_, S>,
) -> Result<ParameterMatrix, CalibrateError> {
    assert_eq!(
        initial.num_regions(),
        bounds.num_regions(),
        "initial guess and bounds must cover the same regions"
    );
    let num_regions = bounds.num_regions();

    let simplex = initial_simplex(initial, bounds);
    let solver = NelderMead::<Vec<f64>, f64>::new(simplex)
        .with_sd_tolerance(settings.sd_tolerance)
        .map_err(|e| CalibrateError::Solver(format!("{:#}", e)))?;

    let cost = CombinedCost {
        objective,
        bounds,
        penalty_scale: settings.penalty_scale,
    };

    let res = Executor::new(cost, solver)
        .configure(|state| state.max_iters(settings.max_iterations))
        .run()
        .map_err(|e| CalibrateError::Solver(format!("{:#}", e)))?;

    let state = res.state();
    log::info!(
        "search finished after {} iterations, best combined cost {}",
        state.iter,
        state.best_cost
    );
    let best = state
        .best_param
        .clone()
        .ok_or_else(|| CalibrateError::Solver("minimizer produced no best parameter".to_string()))?;
    ParameterMatrix::from_flat(&best, num_regions)
}
