//! fracdiff::convolution — truncated causal convolution with the
//! fractional differencing weights.
//!
//! Purpose
//! -------
//! Apply the coefficients produced by
//! [`generate_coefficients`](super::coefficients::generate_coefficients) to a
//! single series or to every column of an `n × p` matrix, under the boundary
//! policy selected by [`Mode`].
//!
//! Key behaviors
//! -------------
//! - `Mode::Full`: output length `n`;
//!   `out[t] = Σ_{k < min(w, t+1)} coef[k] · x[t − k]`. Early outputs use a
//!   shrinking prefix of the coefficients against the observations seen so
//!   far. Nothing is padded.
//! - `Mode::Valid`: output length `n − w + 1`;
//!   `out[j] = Σ_{k < w} coef[k] · x[j + w − 1 − k]`, i.e. only outputs where
//!   every coefficient is used. `valid[j] == full[j + w − 1]`.
//! - Matrix inputs are processed column by column with no cross-column
//!   coupling; results are stacked in the original column order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows are time, columns are features.
//! - The coefficient buffer and the output buffer are allocated per call and
//!   never shared.
//! - In full mode no output can use more than `n` coefficients, so only
//!   `min(window, n)` are generated; a window far larger than the series is
//!   accepted and costs nothing extra.
//!
//! Conventions
//! -----------
//! - Shape checks go through [`validate_series_len`] before any arithmetic.
//! - NaNs in the data are not rejected; they propagate into every output
//!   whose window covers them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the length laws, the impulse identity, first-order
//!   reduction, full/valid consistency, and the two-column worked example.
use crate::fracdiff::{
    coefficients::generate_coefficients,
    errors::FracdiffResult,
    mode::Mode,
    validation::{validate_series_len, validate_window},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Output length of the transform for a series of `n` observations.
///
/// Returns `n` in full mode and `n − window + 1` in valid mode, saturating
/// at zero when `n < window` (callers that need an error use
/// [`validate_series_len`]).
pub fn output_len(n: usize, window: usize, mode: Mode) -> usize {
    match mode {
        Mode::Full => n,
        Mode::Valid => (n + 1).saturating_sub(window),
    }
}

/// Number of coefficients a transform of `n` observations can use.
///
/// Full mode never reaches further back than `n − 1` lags, so the buffer is
/// capped at `n` (at least 1). Valid mode needs the whole window.
pub(crate) fn coefficient_len(n: usize, window: usize, mode: Mode) -> usize {
    match mode {
        Mode::Full => window.min(n.max(1)),
        Mode::Valid => window,
    }
}

/// Fractionally difference a single series.
///
/// Parameters
/// ----------
/// - `series`: `ArrayView1<f64>`
///   Observations in time order. Must be non-empty; in valid mode it must
///   contain at least `window` observations.
/// - `d`: `f64`
///   Differencing order.
/// - `window`: `usize`
///   Number of coefficients (and past observations) per output; at least 1.
/// - `mode`: [`Mode`]
///   Boundary policy.
///
/// Returns
/// -------
/// `FracdiffResult<Array1<f64>>`
///   The differenced series, of length [`output_len`]`(n, window, mode)`.
///
/// Errors
/// ------
/// - `FracdiffError::InvalidWindow` if `window == 0`.
/// - `FracdiffError::EmptySeries` if `series` is empty.
/// - `FracdiffError::InsufficientData` if `mode == Valid` and `n < window`.
///
/// Examples
/// --------
/// ```rust
/// use ndarray::array;
/// use rust_fracdiff::fracdiff::{Mode, convolution::fractional_diff};
///
/// let x = array![1.0, 0.0, 0.0, 0.0];
/// let out = fractional_diff(x.view(), 0.5, 4, Mode::Full).unwrap();
/// assert_eq!(out.to_vec(), vec![1.0, -0.5, -0.125, -0.0625]);
/// ```
pub fn fractional_diff(
    series: ArrayView1<f64>, d: f64, window: usize, mode: Mode,
) -> FracdiffResult<Array1<f64>> {
    validate_window(window)?;
    validate_series_len(series.len(), window, mode)?;
    let coef = generate_coefficients(d, coefficient_len(series.len(), window, mode))?;
    apply_coefficients(series, coef.view(), mode)
}

/// Fractionally difference every column of an `n × p` matrix.
///
/// Each column is transformed exactly as by [`fractional_diff`]; the result
/// has shape `(output_len(n, window, mode), p)`. A matrix with zero columns
/// is accepted and yields a zero-column result.
///
/// Errors
/// ------
/// - Same as [`fractional_diff`], evaluated on the row count `n`.
pub fn fractional_diff_columns(
    x: ArrayView2<f64>, d: f64, window: usize, mode: Mode,
) -> FracdiffResult<Array2<f64>> {
    validate_window(window)?;
    validate_series_len(x.nrows(), window, mode)?;
    let coef = generate_coefficients(d, coefficient_len(x.nrows(), window, mode))?;

    let mut out = Array2::<f64>::zeros((output_len(x.nrows(), window, mode), x.ncols()));
    for (column, mut target) in x.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
        let diffed = apply_coefficients(column, coef.view(), mode)?;
        target.assign(&diffed);
    }
    Ok(out)
}

/// Convolve `series` with precomputed coefficients under `mode`.
///
/// The window is taken to be `coef.len()`. This is the shared kernel behind
/// [`fractional_diff`] and the [`Fracdiff`](super::transformer::Fracdiff)
/// value type, which caches nothing but may reuse one coefficient buffer
/// across columns.
///
/// Errors
/// ------
/// - `FracdiffError::InvalidWindow` if `coef` is empty.
/// - `FracdiffError::EmptySeries` / `FracdiffError::InsufficientData` as in
///   [`fractional_diff`].
pub fn apply_coefficients(
    series: ArrayView1<f64>, coef: ArrayView1<f64>, mode: Mode,
) -> FracdiffResult<Array1<f64>> {
    let window = coef.len();
    let n = series.len();
    validate_window(window)?;
    validate_series_len(n, window, mode)?;

    // Output index j corresponds to time index t = j + offset.
    let offset = match mode {
        Mode::Full => 0,
        Mode::Valid => window - 1,
    };
    let out = Array1::from_iter((offset..n).map(|t| lagged_dot(series, coef, t)));
    Ok(out)
}

/// Σ_{k < min(w, t+1)} coef[k] · series[t − k].
#[inline]
fn lagged_dot(series: ArrayView1<f64>, coef: ArrayView1<f64>, t: usize) -> f64 {
    let terms = coef.len().min(t + 1);
    (0..terms).map(|k| coef[k] * series[t - k]).sum()
}
