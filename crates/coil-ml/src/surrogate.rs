// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Neural Q Surrogate
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

//! Learned Q surrogate (5 -> 64 -> 32 -> 1) with analytic fallback.
//!
//! Weights and the optional standardization scalers come from NumPy
//! `.npz` archives. Artifact loading is lenient: every failure is
//! recorded and the model keeps serving through the analytic path, so a
//! missing or corrupt artifact can never abort a study. Artifacts with
//! non-finite entries are rejected at load, and numeric overflow in the
//! forward pass surfaces as NaN samples, which the sweep's NaN-aware
//! maximum skips.

use coil_types::config::ArtifactPaths;
use coil_types::error::{CoilError, CoilResult};
use ndarray::{Array1, Array2};
use ndarray_npy::NpzReader;
use std::fs::File;

use crate::analytic::analytic_q;
use crate::predictor::{broadcast_pair, sample_matrix, QInput, QPredictor};

const INPUT_DIM: usize = 5;
const HIDDEN1: usize = 64;
const HIDDEN2: usize = 32;
const OUTPUT_DIM: usize = 1;
const EPS_SCALE: f64 = 1e-8;

/// MLP weights of the learned Q model.
#[derive(Debug, Clone)]
pub struct SurrogateWeights {
    pub w1: Array2<f64>, // (5, 64)
    pub b1: Array1<f64>, // (64,)
    pub w2: Array2<f64>, // (64, 32)
    pub b2: Array1<f64>, // (32,)
    pub w3: Array2<f64>, // (32, 1)
    pub b3: Array1<f64>, // (1,)
}

impl SurrogateWeights {
    /// Load MLP weights from a NumPy `.npz` archive.
    pub fn from_npz(path: &str) -> CoilResult<Self> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file)
            .map_err(|e| CoilError::ConfigError(format!("Failed to open npz '{path}': {e}")))?;

        let weights = SurrogateWeights {
            w1: read_array2(&mut npz, "w1")?,
            b1: read_array1(&mut npz, "b1")?,
            w2: read_array2(&mut npz, "w2")?,
            b2: read_array1(&mut npz, "b2")?,
            w3: read_array2(&mut npz, "w3")?,
            b3: read_array1(&mut npz, "b3")?,
        };

        validate_shapes(&weights)?;
        validate_finite(&weights)?;

        Ok(weights)
    }
}

/// StandardScaler artifact: forward `(x - mean) / scale`, inverse
/// `y * scale + mean`.
#[derive(Debug, Clone)]
pub struct Scaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl Scaler {
    /// Load a standardization scaler from a NumPy `.npz` archive holding
    /// `mean` and `scale` arrays of equal length.
    pub fn from_npz(path: &str) -> CoilResult<Self> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file)
            .map_err(|e| CoilError::ConfigError(format!("Failed to open npz '{path}': {e}")))?;

        let mean = read_array1(&mut npz, "mean")?;
        let scale = read_array1(&mut npz, "scale")?;

        if mean.len() != scale.len() {
            return Err(CoilError::ConfigError(format!(
                "Scaler mean/scale length mismatch: {} vs {}",
                mean.len(),
                scale.len()
            )));
        }
        if !mean.iter().all(|v| v.is_finite()) || !scale.iter().all(|v| v.is_finite()) {
            return Err(CoilError::ConfigError(format!(
                "Non-finite scaler values in '{path}'"
            )));
        }

        Ok(Scaler { mean, scale })
    }

    /// Column-wise forward standardization of sample rows.
    fn transform_samples(&self, x: &Array2<f64>) -> Array2<f64> {
        Array2::from_shape_fn(x.raw_dim(), |(i, j)| {
            (x[[i, j]] - self.mean[j]) / self.scale[j].abs().max(EPS_SCALE)
        })
    }

    /// Inverse standardization of the single-output column.
    fn inverse_output(&self, y: &Array1<f64>) -> Array1<f64> {
        y.mapv(|v| v * self.scale[0] + self.mean[0])
    }
}

/// Which path [`QPredictor::predict`] currently takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Loaded MLP weights.
    Surrogate,
    /// Closed-form analytic model.
    Analytic,
}

/// What kind of artifact a load failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Weights,
    InputScaler,
    OutputScaler,
}

/// One artifact load attempt that failed. The surrogate stays usable;
/// callers inspect these to report degraded runs.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub artifact: ArtifactKind,
    pub path: String,
    pub cause: String,
}

/// Q predictor backed by learned MLP weights when available and by the
/// analytic model otherwise.
#[derive(Debug, Clone, Default)]
pub struct QSurrogate {
    weights: Option<SurrogateWeights>,
    scaler_x: Option<Scaler>,
    scaler_y: Option<Scaler>,
    load_failures: Vec<LoadFailure>,
}

impl QSurrogate {
    /// Analytic-only instance (no artifacts configured).
    pub fn new() -> Self {
        QSurrogate::default()
    }

    /// Load whatever artifacts are configured. Never fails: each artifact
    /// that cannot be loaded is recorded and left out, and an empty weight
    /// slot selects the analytic path.
    pub fn from_artifacts(paths: &ArtifactPaths) -> Self {
        let mut load_failures = Vec::new();

        let weights = paths
            .model
            .as_deref()
            .and_then(|path| match SurrogateWeights::from_npz(path) {
                Ok(w) => Some(w),
                Err(e) => {
                    load_failures.push(LoadFailure {
                        artifact: ArtifactKind::Weights,
                        path: path.to_string(),
                        cause: e.to_string(),
                    });
                    None
                }
            });

        let scaler_x = paths
            .scaler_x
            .as_deref()
            .and_then(|path| match load_scaler(path, INPUT_DIM) {
                Ok(s) => Some(s),
                Err(e) => {
                    load_failures.push(LoadFailure {
                        artifact: ArtifactKind::InputScaler,
                        path: path.to_string(),
                        cause: e.to_string(),
                    });
                    None
                }
            });

        let scaler_y = paths
            .scaler_y
            .as_deref()
            .and_then(|path| match load_scaler(path, OUTPUT_DIM) {
                Ok(s) => Some(s),
                Err(e) => {
                    load_failures.push(LoadFailure {
                        artifact: ArtifactKind::OutputScaler,
                        path: path.to_string(),
                        cause: e.to_string(),
                    });
                    None
                }
            });

        QSurrogate {
            weights,
            scaler_x,
            scaler_y,
            load_failures,
        }
    }

    /// Build from in-memory parts, validating shapes and numerics strictly.
    pub fn from_parts(
        weights: SurrogateWeights,
        scaler_x: Option<Scaler>,
        scaler_y: Option<Scaler>,
    ) -> CoilResult<Self> {
        validate_shapes(&weights)?;
        validate_finite(&weights)?;
        if let Some(s) = &scaler_x {
            validate_scaler_len(s, INPUT_DIM)?;
        }
        if let Some(s) = &scaler_y {
            validate_scaler_len(s, OUTPUT_DIM)?;
        }
        Ok(QSurrogate {
            weights: Some(weights),
            scaler_x,
            scaler_y,
            load_failures: Vec::new(),
        })
    }

    /// Prediction path the instance currently serves from.
    pub fn backend(&self) -> Backend {
        if self.weights.is_some() {
            Backend::Surrogate
        } else {
            Backend::Analytic
        }
    }

    /// Artifact load problems recorded at construction.
    pub fn load_failures(&self) -> &[LoadFailure] {
        &self.load_failures
    }
}

impl QPredictor for QSurrogate {
    fn predict(
        &self,
        trace_width: QInput<'_>,
        frequency: QInput<'_>,
        r_mm: f64,
        lg_mm: f64,
        ll_mm: f64,
    ) -> CoilResult<Array1<f64>> {
        let (tw, fr) = broadcast_pair(&trace_width, &frequency)?;
        match &self.weights {
            Some(weights) => {
                let samples = sample_matrix(&tw, &fr, r_mm, lg_mm, ll_mm);
                Ok(neural_forward(
                    &samples,
                    weights,
                    self.scaler_x.as_ref(),
                    self.scaler_y.as_ref(),
                ))
            }
            None => Ok(Array1::from_shape_fn(tw.len(), |i| {
                analytic_q(tw[i], fr[i], r_mm, lg_mm, ll_mm)
            })),
        }
    }
}

fn validate_shapes(weights: &SurrogateWeights) -> CoilResult<()> {
    if weights.w1.dim() != (INPUT_DIM, HIDDEN1) {
        return Err(CoilError::ConfigError(format!(
            "Invalid w1 shape {:?}, expected ({INPUT_DIM}, {HIDDEN1})",
            weights.w1.dim()
        )));
    }
    if weights.b1.len() != HIDDEN1 {
        return Err(CoilError::ConfigError(format!(
            "Invalid b1 length {}, expected {HIDDEN1}",
            weights.b1.len()
        )));
    }
    if weights.w2.dim() != (HIDDEN1, HIDDEN2) {
        return Err(CoilError::ConfigError(format!(
            "Invalid w2 shape {:?}, expected ({HIDDEN1}, {HIDDEN2})",
            weights.w2.dim()
        )));
    }
    if weights.b2.len() != HIDDEN2 {
        return Err(CoilError::ConfigError(format!(
            "Invalid b2 length {}, expected {HIDDEN2}",
            weights.b2.len()
        )));
    }
    if weights.w3.dim() != (HIDDEN2, OUTPUT_DIM) {
        return Err(CoilError::ConfigError(format!(
            "Invalid w3 shape {:?}, expected ({HIDDEN2}, {OUTPUT_DIM})",
            weights.w3.dim()
        )));
    }
    if weights.b3.len() != OUTPUT_DIM {
        return Err(CoilError::ConfigError(format!(
            "Invalid b3 length {}, expected {OUTPUT_DIM}",
            weights.b3.len()
        )));
    }
    Ok(())
}

fn validate_finite(weights: &SurrogateWeights) -> CoilResult<()> {
    for (name, finite) in [
        ("w1", weights.w1.iter().all(|v| v.is_finite())),
        ("b1", weights.b1.iter().all(|v| v.is_finite())),
        ("w2", weights.w2.iter().all(|v| v.is_finite())),
        ("b2", weights.b2.iter().all(|v| v.is_finite())),
        ("w3", weights.w3.iter().all(|v| v.is_finite())),
        ("b3", weights.b3.iter().all(|v| v.is_finite())),
    ] {
        if !finite {
            return Err(CoilError::ConfigError(format!(
                "Non-finite values in weight array {name}"
            )));
        }
    }
    Ok(())
}

fn validate_scaler_len(scaler: &Scaler, expected: usize) -> CoilResult<()> {
    if scaler.mean.len() != expected || scaler.scale.len() != expected {
        return Err(CoilError::ConfigError(format!(
            "Invalid scaler lengths mean={}, scale={}, expected {expected}",
            scaler.mean.len(),
            scaler.scale.len()
        )));
    }
    Ok(())
}

fn load_scaler(path: &str, expected: usize) -> CoilResult<Scaler> {
    let scaler = Scaler::from_npz(path)?;
    validate_scaler_len(&scaler, expected)?;
    Ok(scaler)
}

fn read_array1(npz: &mut NpzReader<File>, key: &str) -> CoilResult<Array1<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(key))
        .map_err(|e| CoilError::ConfigError(format!("Failed to read {key} from npz: {e}")))
}

fn read_array2(npz: &mut NpzReader<File>, key: &str) -> CoilResult<Array2<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix2>(key))
        .map_err(|e| CoilError::ConfigError(format!("Failed to read {key} from npz: {e}")))
}

fn neural_forward(
    samples: &Array2<f64>,
    w: &SurrogateWeights,
    scaler_x: Option<&Scaler>,
    scaler_y: Option<&Scaler>,
) -> Array1<f64> {
    let x = match scaler_x {
        Some(s) => s.transform_samples(samples),
        None => samples.clone(),
    };

    let z1 = x.dot(&w.w1) + &w.b1;
    let a1 = z1.mapv(relu);
    let z2 = a1.dot(&w.w2) + &w.b2;
    let a2 = z2.mapv(relu);
    let out = a2.dot(&w.w3) + &w.b3;
    let q = out.column(0).to_owned();

    let q = match scaler_y {
        Some(s) => s.inverse_output(&q),
        None => q,
    };
    // Overflowed samples surface as NaN; the sweep skips NaN, not Inf.
    q.mapv_into(|v| if v.is_finite() { v } else { f64::NAN })
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}
