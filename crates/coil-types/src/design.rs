// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Design Domain Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

//! Domain types for the Tx-coil design search: the fixed design point,
//! sweep samples, and the full optimization outcome.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FREQUENCY_MHZ, DEFAULT_LG_MM, DEFAULT_LL_MM, DEFAULT_R_MM};
use crate::error::{CoilError, CoilResult};

/// Fixed operating point and geometry for one optimization run.
/// Trace width is the free variable and is deliberately absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Operating frequency [MHz].
    pub frequency_mhz: f64,
    /// Coil outer radius R [mm].
    #[serde(rename = "R_mm")]
    pub r_mm: f64,
    /// Leg gap Lg [mm].
    #[serde(rename = "Lg_mm")]
    pub lg_mm: f64,
    /// Leg length Ll [mm].
    #[serde(rename = "Ll_mm")]
    pub ll_mm: f64,
}

impl DesignParameters {
    pub fn new(frequency_mhz: f64, r_mm: f64, lg_mm: f64, ll_mm: f64) -> Self {
        DesignParameters {
            frequency_mhz,
            r_mm,
            lg_mm,
            ll_mm,
        }
    }

    /// Check physical domains. NaN and infinities are rejected so a bad
    /// design point fails here instead of surfacing as NaN Q downstream.
    pub fn validate(&self) -> CoilResult<()> {
        if !(self.frequency_mhz.is_finite() && self.frequency_mhz > 0.0) {
            return Err(CoilError::ConfigError(format!(
                "frequency_mhz must be positive and finite, got {}",
                self.frequency_mhz
            )));
        }
        if !(self.r_mm.is_finite() && self.r_mm > 0.0) {
            return Err(CoilError::ConfigError(format!(
                "R_mm must be positive and finite, got {}",
                self.r_mm
            )));
        }
        if !(self.lg_mm.is_finite() && self.lg_mm >= 0.0) {
            return Err(CoilError::ConfigError(format!(
                "Lg_mm must be non-negative and finite, got {}",
                self.lg_mm
            )));
        }
        if !(self.ll_mm.is_finite() && self.ll_mm > 0.0) {
            return Err(CoilError::ConfigError(format!(
                "Ll_mm must be positive and finite, got {}",
                self.ll_mm
            )));
        }
        Ok(())
    }
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            frequency_mhz: DEFAULT_FREQUENCY_MHZ,
            r_mm: DEFAULT_R_MM,
            lg_mm: DEFAULT_LG_MM,
            ll_mm: DEFAULT_LL_MM,
        }
    }
}

/// One point of the trace-width sweep. `q` is NaN where the predictor
/// produced no usable value for that sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QSample {
    /// Trace width Tw [mm].
    pub trace_width_mm: f64,
    /// Predicted quality factor (dimensionless).
    pub q: f64,
}

/// One point of the secondary Q-versus-frequency sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencySample {
    /// Operating frequency [MHz].
    pub frequency_mhz: f64,
    /// Predicted quality factor (dimensionless).
    pub q: f64,
}

/// Outcome of a trace-width sweep: the full sampled curve, the located
/// maximum, and the near-optimal candidate band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// All sweep samples in grid order, NaN entries retained.
    pub samples: Vec<QSample>,
    /// Index of the best sample within `samples`.
    pub best_index: usize,
    /// Trace width at the maximum [mm].
    pub best_trace_width_mm: f64,
    /// Maximum predicted Q (never NaN).
    pub best_q: f64,
    /// Samples with Q within `top_k_percent` of the peak, in grid order.
    /// Always contains the best sample.
    pub candidates: Vec<QSample>,
    /// Band width used for candidate selection, in percent.
    pub top_k_percent: f64,
}

impl OptimizationResult {
    /// Q threshold the candidate band was selected with:
    /// `best_q * (1 - top_k_percent / 100)`.
    pub fn threshold(&self) -> f64 {
        self.best_q * (1.0 - self.top_k_percent / 100.0)
    }
}
