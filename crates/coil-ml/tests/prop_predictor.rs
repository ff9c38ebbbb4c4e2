// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Property-Based Tests (proptest) for coil-ml
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for coil-ml using proptest.
//!
//! Covers: broadcast-length algebra, vector/scalar prediction
//! equivalence, sample-matrix layout, analytic fallback identity.

use coil_ml::analytic::{analytic_q, AnalyticQModel};
use coil_ml::predictor::{broadcast_len, broadcast_pair, sample_matrix, QInput, QPredictor};
use coil_ml::surrogate::QSurrogate;
use coil_types::error::CoilError;
use ndarray::Array1;
use proptest::prelude::*;

// ── Broadcast Algebra ────────────────────────────────────────────────

proptest! {
    /// Broadcast length is symmetric in its two arguments.
    #[test]
    fn broadcast_len_symmetric(
        left in prop::collection::vec(0.1f64..10.0, 1..40),
        right in prop::collection::vec(100.0f64..900.0, 1..40),
    ) {
        let a = Array1::from_vec(left);
        let b = Array1::from_vec(right);
        let forward = broadcast_len(&QInput::from(&a), &QInput::from(&b));
        let backward = broadcast_len(&QInput::from(&b), &QInput::from(&a));
        match (forward, backward) {
            (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "asymmetric broadcast outcome"),
        }
    }

    /// A scalar stretches to any array length.
    #[test]
    fn scalar_stretches_to_array(
        values in prop::collection::vec(0.1f64..10.0, 1..80),
        scalar in 100.0f64..900.0,
    ) {
        let arr = Array1::from_vec(values);
        let n = broadcast_len(&QInput::from(&arr), &QInput::Scalar(scalar)).unwrap();
        prop_assert_eq!(n, arr.len());

        let (tw, fr) = broadcast_pair(&QInput::from(&arr), &QInput::Scalar(scalar)).unwrap();
        prop_assert_eq!(tw.len(), arr.len());
        prop_assert!(fr.iter().all(|&v| (v - scalar).abs() < 1e-15));
    }

    /// Two arrays of different lengths above one never broadcast.
    #[test]
    fn incompatible_arrays_rejected(
        n in 2usize..40,
        extra in 1usize..40,
    ) {
        let a = Array1::zeros(n);
        let b = Array1::zeros(n + extra);
        let err = broadcast_len(&QInput::from(&a), &QInput::from(&b)).unwrap_err();
        prop_assert!(matches!(err, CoilError::ShapeMismatch { .. }), "expected CoilError::ShapeMismatch");
    }
}

// ── Prediction Equivalence ───────────────────────────────────────────

proptest! {
    /// Vectorized analytic prediction equals the scalar map.
    #[test]
    fn vector_matches_scalar_map(
        widths in prop::collection::vec(0.1f64..10.0, 1..60),
        frequency_mhz in 100.0f64..900.0,
        r_mm in 1.0f64..20.0,
        lg_mm in 0.0f64..20.0,
        ll_mm in 1.0f64..30.0,
    ) {
        let model = AnalyticQModel::new();
        let tw = Array1::from_vec(widths);
        let out = model
            .predict(QInput::from(&tw), QInput::Scalar(frequency_mhz), r_mm, lg_mm, ll_mm)
            .unwrap();

        prop_assert_eq!(out.len(), tw.len());
        for (i, &w) in tw.iter().enumerate() {
            let expected = analytic_q(w, frequency_mhz, r_mm, lg_mm, ll_mm);
            prop_assert!((out[i] - expected).abs() < 1e-12,
                "mismatch at {}: {} vs {}", i, out[i], expected);
        }
    }

    /// A surrogate without weights is the analytic model, exactly.
    #[test]
    fn weightless_surrogate_is_analytic(
        trace_width_mm in 0.1f64..10.0,
        frequency_mhz in 100.0f64..900.0,
        r_mm in 1.0f64..20.0,
    ) {
        let surrogate = QSurrogate::new();
        let analytic = AnalyticQModel::new();
        let a = surrogate
            .predict_point(trace_width_mm, frequency_mhz, r_mm, 5.0, 10.0)
            .unwrap();
        let b = analytic
            .predict_point(trace_width_mm, frequency_mhz, r_mm, 5.0, 10.0)
            .unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}

// ── Sample Matrix Layout ─────────────────────────────────────────────

proptest! {
    /// Geometry columns are constant; Tw and frequency land per row.
    #[test]
    fn sample_matrix_layout(
        widths in prop::collection::vec(0.1f64..10.0, 1..40),
        frequency_mhz in 100.0f64..900.0,
        r_mm in 1.0f64..20.0,
        lg_mm in 0.0f64..20.0,
        ll_mm in 1.0f64..30.0,
    ) {
        let tw = Array1::from_vec(widths);
        let fr = Array1::from_elem(tw.len(), frequency_mhz);
        let m = sample_matrix(&tw, &fr, r_mm, lg_mm, ll_mm);

        prop_assert_eq!(m.dim(), (tw.len(), 5));
        for i in 0..tw.len() {
            prop_assert_eq!(m[[i, 0]].to_bits(), frequency_mhz.to_bits());
            prop_assert_eq!(m[[i, 1]].to_bits(), r_mm.to_bits());
            prop_assert_eq!(m[[i, 2]].to_bits(), lg_mm.to_bits());
            prop_assert_eq!(m[[i, 3]].to_bits(), ll_mm.to_bits());
            prop_assert_eq!(m[[i, 4]].to_bits(), tw[i].to_bits());
        }
    }
}
