//! Predictor contract: scalar-or-array arguments with NumPy-style
//! broadcasting over trace width and frequency.

use coil_types::error::{CoilError, CoilResult};
use ndarray::{Array1, Array2, ArrayView1};

/// Scalar-or-array argument accepted by [`QPredictor::predict`].
#[derive(Debug, Clone, Copy)]
pub enum QInput<'a> {
    Scalar(f64),
    Array(ArrayView1<'a, f64>),
}

impl QInput<'_> {
    /// Logical length; scalars count as 1.
    pub fn len(&self) -> usize {
        match self {
            QInput::Scalar(_) => 1,
            QInput::Array(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `i` after broadcasting: scalars and length-1 arrays repeat.
    fn value_at(&self, i: usize) -> f64 {
        match self {
            QInput::Scalar(v) => *v,
            QInput::Array(v) if v.len() == 1 => v[0],
            QInput::Array(v) => v[i],
        }
    }
}

impl From<f64> for QInput<'static> {
    fn from(v: f64) -> Self {
        QInput::Scalar(v)
    }
}

impl<'a> From<ArrayView1<'a, f64>> for QInput<'a> {
    fn from(v: ArrayView1<'a, f64>) -> Self {
        QInput::Array(v)
    }
}

impl<'a> From<&'a Array1<f64>> for QInput<'a> {
    fn from(v: &'a Array1<f64>) -> Self {
        QInput::Array(v.view())
    }
}

impl<'a> From<&'a [f64]> for QInput<'a> {
    fn from(v: &'a [f64]) -> Self {
        QInput::Array(ArrayView1::from(v))
    }
}

/// Common length two inputs broadcast to, NumPy rules: equal lengths, or
/// either side of length 1 stretched to the other.
pub fn broadcast_len(trace_width: &QInput<'_>, frequency: &QInput<'_>) -> CoilResult<usize> {
    let (left, right) = (trace_width.len(), frequency.len());
    if left == right {
        Ok(left)
    } else if left == 1 {
        Ok(right)
    } else if right == 1 {
        Ok(left)
    } else {
        Err(CoilError::ShapeMismatch { left, right })
    }
}

/// Materialize both inputs at their common broadcast length.
pub fn broadcast_pair(
    trace_width: &QInput<'_>,
    frequency: &QInput<'_>,
) -> CoilResult<(Array1<f64>, Array1<f64>)> {
    let n = broadcast_len(trace_width, frequency)?;
    let tw = Array1::from_shape_fn(n, |i| trace_width.value_at(i));
    let fr = Array1::from_shape_fn(n, |i| frequency.value_at(i));
    Ok((tw, fr))
}

/// Stack broadcast inputs into model samples, one row per design point.
/// Column order matches the trained model: [frequency, R, Lg, Ll, Tw].
pub fn sample_matrix(
    tw: &Array1<f64>,
    fr: &Array1<f64>,
    r_mm: f64,
    lg_mm: f64,
    ll_mm: f64,
) -> Array2<f64> {
    Array2::from_shape_fn((tw.len(), 5), |(i, j)| match j {
        0 => fr[i],
        1 => r_mm,
        2 => lg_mm,
        3 => ll_mm,
        _ => tw[i],
    })
}

/// A quality-factor predictor over the five coil design parameters.
///
/// `trace_width` and `frequency` broadcast against each other; the three
/// geometry parameters are scalars repeated across every sample.
pub trait QPredictor {
    /// Predict Q for every broadcast design point. The output length equals
    /// the broadcast length; entries are NaN where no value was obtained.
    fn predict(
        &self,
        trace_width: QInput<'_>,
        frequency: QInput<'_>,
        r_mm: f64,
        lg_mm: f64,
        ll_mm: f64,
    ) -> CoilResult<Array1<f64>>;

    /// Scalar convenience wrapper: one design point, one Q.
    fn predict_point(
        &self,
        trace_width_mm: f64,
        frequency_mhz: f64,
        r_mm: f64,
        lg_mm: f64,
        ll_mm: f64,
    ) -> CoilResult<f64> {
        let out = self.predict(
            QInput::Scalar(trace_width_mm),
            QInput::Scalar(frequency_mhz),
            r_mm,
            lg_mm,
            ll_mm,
        )?;
        Ok(out[0])
    }
}
