// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Analytic Q Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

//! Closed-form Q estimate for printed Tx coils. Port of
//! `model_wrapper.py` fallback: two competing loss terms gated by a
//! linear geometry factor.

use coil_types::error::CoilResult;
use ndarray::Array1;

use crate::predictor::{broadcast_pair, QInput, QPredictor};

/// Trace-width term intercept. Python: 415.0.
const Q_TW_INTERCEPT: f64 = 415.0;
/// Trace-width term slope [1/mm]. Python: 9.5.
const Q_TW_SLOPE: f64 = 9.5;
/// Frequency term curvature [1/MHz^2]. Python: -0.000012.
const Q_FR_CURVATURE: f64 = -0.000012;
/// Frequency term vertex [MHz]. Python: 400.0.
const Q_FR_CENTER_MHZ: f64 = 400.0;
/// Frequency term peak value. Python: 132.0.
const Q_FR_PEAK: f64 = 132.0;

/// Geometry sensitivities about the reference point R=6, Lg=5, Ll=10 mm.
const GEOM_R_SLOPE: f64 = 0.02;
const GEOM_R_REF_MM: f64 = 6.0;
const GEOM_LL_SLOPE: f64 = 0.01;
const GEOM_LL_REF_MM: f64 = 10.0;
const GEOM_LG_SLOPE: f64 = 0.015;
const GEOM_LG_REF_MM: f64 = 5.0;

/// Q at a single design point: `min(q_tw, q_fr) * geometry`.
pub fn analytic_q(
    trace_width_mm: f64,
    frequency_mhz: f64,
    r_mm: f64,
    lg_mm: f64,
    ll_mm: f64,
) -> f64 {
    let q_tw = Q_TW_INTERCEPT - Q_TW_SLOPE * trace_width_mm;
    let q_fr = Q_FR_CURVATURE * (frequency_mhz - Q_FR_CENTER_MHZ).powi(2) + Q_FR_PEAK;
    let geom = 1.0 - GEOM_R_SLOPE * (r_mm - GEOM_R_REF_MM)
        + GEOM_LL_SLOPE * (ll_mm - GEOM_LL_REF_MM)
        - GEOM_LG_SLOPE * (lg_mm - GEOM_LG_REF_MM);

    // np.minimum propagates NaN; f64::min would discard it.
    let q_limit = if q_tw.is_nan() || q_fr.is_nan() {
        f64::NAN
    } else {
        q_tw.min(q_fr)
    };
    q_limit * geom
}

/// Deterministic analytic backend of the [`QPredictor`] contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticQModel;

impl AnalyticQModel {
    pub fn new() -> Self {
        AnalyticQModel
    }
}

impl QPredictor for AnalyticQModel {
    fn predict(
        &self,
        trace_width: QInput<'_>,
        frequency: QInput<'_>,
        r_mm: f64,
        lg_mm: f64,
        ll_mm: f64,
    ) -> CoilResult<Array1<f64>> {
        let (tw, fr) = broadcast_pair(&trace_width, &frequency)?;
        Ok(Array1::from_shape_fn(tw.len(), |i| {
            analytic_q(tw[i], fr[i], r_mm, lg_mm, ll_mm)
        }))
    }
}
