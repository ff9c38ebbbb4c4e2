// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Coil Ml
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Q-factor prediction models.
//!
//! Broadcasting predictor contract, neural surrogate (npz MLP weights
//! plus standardization scalers) and the closed-form analytic model.

pub mod analytic;
pub mod predictor;
pub mod surrogate;
