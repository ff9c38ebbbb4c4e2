// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Property-Based Tests (proptest) for coil-design
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for coil-design using proptest.
//!
//! Covers: sweep result invariants (grid order, maximality, band
//! membership), determinism, peak localization, frequency response.

use coil_design::sweep::{frequency_response, optimize, trace_width_grid};
use coil_ml::analytic::AnalyticQModel;
use coil_ml::predictor::{broadcast_pair, QInput, QPredictor};
use coil_types::design::DesignParameters;
use coil_types::error::CoilResult;
use ndarray::Array1;
use proptest::prelude::*;

/// Synthetic predictor with a parabolic peak at a known trace width.
struct ParabolaModel {
    center_mm: f64,
}

impl QPredictor for ParabolaModel {
    fn predict(
        &self,
        trace_width: QInput<'_>,
        frequency: QInput<'_>,
        _r_mm: f64,
        _lg_mm: f64,
        _ll_mm: f64,
    ) -> CoilResult<Array1<f64>> {
        let (tw, _) = broadcast_pair(&trace_width, &frequency)?;
        Ok(tw.mapv(|w| 100.0 - (w - self.center_mm).powi(2)))
    }
}

fn arb_params() -> impl Strategy<Value = DesignParameters> {
    (
        100.0f64..900.0,
        1.0f64..20.0,
        0.0f64..20.0,
        1.0f64..30.0,
    )
        .prop_map(|(frequency_mhz, r_mm, lg_mm, ll_mm)| {
            DesignParameters::new(frequency_mhz, r_mm, lg_mm, ll_mm)
        })
}

// ── Sweep Result Invariants ──────────────────────────────────────────

proptest! {
    /// The sweep always covers the full grid in order, and the reported
    /// best sample dominates every other sample.
    #[test]
    fn sweep_result_invariants(
        params in arb_params(),
        top_k_percent in 0.5f64..60.0,
    ) {
        let model = AnalyticQModel::new();
        let result = optimize(&model, &params, top_k_percent).unwrap();

        prop_assert_eq!(result.samples.len(), 100);
        for pair in result.samples.windows(2) {
            prop_assert!(pair[0].trace_width_mm < pair[1].trace_width_mm);
        }

        prop_assert!(!result.best_q.is_nan());
        for s in &result.samples {
            prop_assert!(!(s.q > result.best_q),
                "sample {} beats reported best {}", s.q, result.best_q);
        }
        let best = &result.samples[result.best_index];
        prop_assert_eq!(best.trace_width_mm.to_bits(),
            result.best_trace_width_mm.to_bits());
        prop_assert_eq!(best.q.to_bits(), result.best_q.to_bits());
    }

    /// Every band member clears the threshold (or is the best sample),
    /// the best sample is always a member, and grid order is kept.
    #[test]
    fn candidate_band_invariants(
        params in arb_params(),
        top_k_percent in 0.5f64..60.0,
    ) {
        let model = AnalyticQModel::new();
        let result = optimize(&model, &params, top_k_percent).unwrap();
        let threshold = result.threshold();

        prop_assert!(!result.candidates.is_empty());
        prop_assert!(result.candidates.iter().any(
            |s| s.trace_width_mm.to_bits() == result.best_trace_width_mm.to_bits()));

        for s in &result.candidates {
            prop_assert!(
                s.q >= threshold
                    || s.trace_width_mm.to_bits() == result.best_trace_width_mm.to_bits(),
                "candidate q {} below threshold {}", s.q, threshold);
            prop_assert!(!s.q.is_nan());
        }
        for pair in result.candidates.windows(2) {
            prop_assert!(pair[0].trace_width_mm < pair[1].trace_width_mm);
        }
    }

    /// Candidates are an exact subsequence of the sweep samples.
    #[test]
    fn candidates_are_subsequence_of_samples(
        params in arb_params(),
        top_k_percent in 0.5f64..60.0,
    ) {
        let model = AnalyticQModel::new();
        let result = optimize(&model, &params, top_k_percent).unwrap();

        let mut cursor = result.samples.iter();
        for c in &result.candidates {
            let found = cursor.any(
                |s| s.trace_width_mm.to_bits() == c.trace_width_mm.to_bits()
                    && s.q.to_bits() == c.q.to_bits());
            prop_assert!(found, "candidate Tw {} not found in order", c.trace_width_mm);
        }
    }

    /// Repeated sweeps are bit-identical.
    #[test]
    fn sweep_is_deterministic(params in arb_params()) {
        let model = AnalyticQModel::new();
        let a = optimize(&model, &params, 10.0).unwrap();
        let b = optimize(&model, &params, 10.0).unwrap();

        prop_assert_eq!(a.best_index, b.best_index);
        prop_assert_eq!(a.best_q.to_bits(), b.best_q.to_bits());
        prop_assert_eq!(a.candidates.len(), b.candidates.len());
        for (x, y) in a.samples.iter().zip(b.samples.iter()) {
            prop_assert_eq!(x.q.to_bits(), y.q.to_bits());
        }
    }

    /// A parabolic peak is located to within half a grid step.
    #[test]
    fn peak_located_within_grid_resolution(center_mm in 0.5f64..9.5) {
        let model = ParabolaModel { center_mm };
        let result = optimize(&model, &DesignParameters::default(), 10.0).unwrap();
        prop_assert!((result.best_trace_width_mm - center_mm).abs() <= 0.05 + 1e-9,
            "best {} too far from center {}", result.best_trace_width_mm, center_mm);
    }
}

// ── Grid and Frequency Response ──────────────────────────────────────

proptest! {
    /// Every grid point sits on the linear form 0.1 + 0.1 * i.
    #[test]
    fn grid_matches_linear_form(i in 0usize..100) {
        let grid = trace_width_grid();
        prop_assert_eq!(grid.len(), 100);
        prop_assert!((grid[i] - (0.1 + 0.1 * i as f64)).abs() < 1e-9,
            "grid[{}] = {} off the linear form", i, grid[i]);
    }

    /// The response sweep returns exactly the requested sample count
    /// with monotonically increasing frequencies.
    #[test]
    fn frequency_response_shape(
        trace_width_mm in 0.1f64..10.0,
        n_points in 2usize..200,
    ) {
        let model = AnalyticQModel::new();
        let response = frequency_response(
            &model, trace_width_mm, 6.0, 5.0, 10.0, 100.0, 800.0, n_points).unwrap();

        prop_assert_eq!(response.len(), n_points);
        prop_assert!((response[0].frequency_mhz - 100.0).abs() < 1e-9);
        prop_assert!((response[n_points - 1].frequency_mhz - 800.0).abs() < 1e-9);
        for pair in response.windows(2) {
            prop_assert!(pair[0].frequency_mhz < pair[1].frequency_mhz);
        }
        prop_assert!(response.iter().all(|s| s.q.is_finite()));
    }
}
