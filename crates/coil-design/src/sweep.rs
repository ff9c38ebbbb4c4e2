// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Trace-Width Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exhaustive trace-width design sweep.
//!
//! Port of `main.py` optimize step: fixed 100-point grid, one
//! vectorized prediction, NaN-aware maximum, top-k% candidate band.

use coil_ml::predictor::{QInput, QPredictor};
use coil_types::constants::{TW_MAX_MM, TW_MIN_MM, TW_SAMPLES};
use coil_types::design::{DesignParameters, FrequencySample, OptimizationResult, QSample};
use coil_types::error::{CoilError, CoilResult};
use ndarray::Array1;

/// The fixed trace-width sampling grid, rebuilt for every sweep.
/// Python: np.linspace(0.1, 10, 100).
pub fn trace_width_grid() -> Array1<f64> {
    Array1::linspace(TW_MIN_MM, TW_MAX_MM, TW_SAMPLES)
}

/// Index of the largest non-NaN value; ties resolve to the first index.
/// None when every entry is NaN (or the array is empty).
/// Matches np.nanargmax up to its error convention.
pub fn nan_argmax(values: &Array1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Sweep the trace-width grid at a fixed design point and locate the Q
/// maximum and its near-optimal band.
///
/// The candidate band keeps every sample with
/// `q >= best_q * (1 - top_k_percent / 100)`, in grid order. NaN samples
/// never qualify; the best sample itself is always a member, even when a
/// negative peak puts the threshold above it.
pub fn optimize(
    predictor: &dyn QPredictor,
    params: &DesignParameters,
    top_k_percent: f64,
) -> CoilResult<OptimizationResult> {
    params.validate()?;

    let grid = trace_width_grid();
    let q = predictor.predict(
        QInput::Array(grid.view()),
        QInput::Scalar(params.frequency_mhz),
        params.r_mm,
        params.lg_mm,
        params.ll_mm,
    )?;
    if q.len() != grid.len() {
        return Err(CoilError::ConfigError(format!(
            "Predictor returned {} values for {} grid samples",
            q.len(),
            grid.len()
        )));
    }

    let best_index = nan_argmax(&q).ok_or(CoilError::NoValidOptimum {
        n_samples: grid.len(),
    })?;
    let best_q = q[best_index];
    let best_trace_width_mm = grid[best_index];

    let samples: Vec<QSample> = grid
        .iter()
        .zip(q.iter())
        .map(|(&trace_width_mm, &q)| QSample { trace_width_mm, q })
        .collect();

    let threshold = best_q * (1.0 - top_k_percent / 100.0);
    let candidates: Vec<QSample> = samples
        .iter()
        .enumerate()
        .filter(|(i, s)| s.q >= threshold || *i == best_index)
        .map(|(_, s)| s.clone())
        .collect();

    Ok(OptimizationResult {
        samples,
        best_index,
        best_trace_width_mm,
        best_q,
        candidates,
        top_k_percent,
    })
}

/// Q response over a frequency sweep at a fixed trace width, for the
/// secondary response chart. Python: predict over np.linspace(100, 800, 800)
/// at the optimal Tw.
pub fn frequency_response(
    predictor: &dyn QPredictor,
    trace_width_mm: f64,
    r_mm: f64,
    lg_mm: f64,
    ll_mm: f64,
    f_lo_mhz: f64,
    f_hi_mhz: f64,
    n_points: usize,
) -> CoilResult<Vec<FrequencySample>> {
    let freqs = Array1::linspace(f_lo_mhz, f_hi_mhz, n_points);
    let q = predictor.predict(
        QInput::Scalar(trace_width_mm),
        QInput::Array(freqs.view()),
        r_mm,
        lg_mm,
        ll_mm,
    )?;
    if q.len() != freqs.len() {
        return Err(CoilError::ConfigError(format!(
            "Predictor returned {} values for {} frequency samples",
            q.len(),
            freqs.len()
        )));
    }

    Ok(freqs
        .iter()
        .zip(q.iter())
        .map(|(&frequency_mhz, &q)| FrequencySample { frequency_mhz, q })
        .collect())
}
