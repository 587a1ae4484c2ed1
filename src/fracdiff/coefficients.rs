//! fracdiff::coefficients — truncated binomial weights of (1 − L)^d.
//!
//! Purpose
//! -------
//! Generate the first `window` coefficients of the fractional differencing
//! operator `(1 − L)^d`, where `L` is the lag operator. Truncating the
//! infinite binomial series at `window` terms turns the operator into a
//! finite-impulse-response filter; this is an approximation of the exact
//! fractional derivative, not the derivative itself.
//!
//! Key behaviors
//! -------------
//! - `coef[0] = 1` and `coef[k] = −coef[k−1] · (d − k + 1) / k` for
//!   `k = 1, …, window − 1`.
//! - Each term is a ratio of the previous term and small integers, so no
//!   factorial or gamma evaluation is needed and nothing overflows for
//!   moderate windows.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned sequence has exactly `window` elements.
//! - For a non-negative integer `d`, all coefficients past lag `d` are zero,
//!   so integer orders reduce to ordinary differencing.
//!
//! Testing notes
//! -------------
//! - Unit tests check `coef[0] == 1`, the integer-order reductions, and the
//!   hand-computed `d = 0.5` sequence.
use crate::fracdiff::{errors::FracdiffResult, validation::validate_window};
use ndarray::Array1;

/// Generate the truncated coefficient sequence of `(1 − L)^d`.
///
/// Parameters
/// ----------
/// - `d`: `f64`
///   Differencing order. Any real value is accepted; `d = 0` yields the
///   identity filter `[1, 0, …, 0]`.
/// - `window`: `usize`
///   Number of coefficients to return. Must be at least 1.
///
/// Returns
/// -------
/// `FracdiffResult<Array1<f64>>`
///   The coefficients indexed by lag, of length `window`.
///
/// Errors
/// ------
/// - `FracdiffError::InvalidWindow` when `window == 0`.
///
/// Examples
/// --------
/// ```rust
/// use rust_fracdiff::fracdiff::coefficients::generate_coefficients;
///
/// let coef = generate_coefficients(0.5, 3).unwrap();
/// assert_eq!(coef.to_vec(), vec![1.0, -0.5, -0.125]);
/// ```
pub fn generate_coefficients(d: f64, window: usize) -> FracdiffResult<Array1<f64>> {
    validate_window(window)?;
    let mut coef = Array1::<f64>::zeros(window);
    coef[0] = 1.0;
    for k in 1..window {
        let k_f = k as f64;
        coef[k] = -coef[k - 1] * (d - k_f + 1.0) / k_f;
    }
    Ok(coef)
}
