// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Canonical Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

//! Canonical defaults and sweep bounds shared by every coil crate.

/// Default operating frequency [MHz]. Python GUI default: 400.0.
pub const DEFAULT_FREQUENCY_MHZ: f64 = 400.0;

/// Default coil outer radius R [mm]. Python GUI default: 6.0.
pub const DEFAULT_R_MM: f64 = 6.0;

/// Default leg gap Lg [mm]. Python GUI default: 5.0.
pub const DEFAULT_LG_MM: f64 = 5.0;

/// Default leg length Ll [mm]. Python GUI default: 10.0.
pub const DEFAULT_LL_MM: f64 = 10.0;

/// Default candidate-band width as a percentage of the peak Q.
/// Python GUI slider default: 10.
pub const DEFAULT_TOP_K_PERCENT: f64 = 10.0;

/// Trace-width sweep lower bound [mm]. Python: np.linspace(0.1, 10, 100).
pub const TW_MIN_MM: f64 = 0.1;

/// Trace-width sweep upper bound [mm].
pub const TW_MAX_MM: f64 = 10.0;

/// Number of trace-width samples per sweep.
pub const TW_SAMPLES: usize = 100;

/// Frequency-response sweep lower bound [MHz]. Python: np.linspace(100, 800, 800).
pub const FREQ_SWEEP_MIN_MHZ: f64 = 100.0;

/// Frequency-response sweep upper bound [MHz].
pub const FREQ_SWEEP_MAX_MHZ: f64 = 800.0;

/// Number of frequency-response samples.
pub const FREQ_SWEEP_SAMPLES: usize = 800;
