//! fracdiff::validation — shared parameter and shape guards.
//!
//! Purpose
//! -------
//! Centralize the checks that must run before any coefficient is generated
//! or any convolution is performed, so the transform, the transformer value
//! type, and the stationarity search report identical errors for identical
//! violations.
//!
//! Key behaviors
//! -------------
//! - [`validate_window`]: window must be at least 1.
//! - [`validate_order`]: order must be finite.
//! - [`validate_series_len`]: non-empty series; in valid mode, at least
//!   `window` observations.
//! - [`validate_significance`]: significance level in the open interval (0, 1).
//!
//! Conventions
//! -----------
//! - Validation is purely about *contracts of this crate*. NaN checking of
//!   the data itself is the caller's job; NaNs simply propagate through the
//!   arithmetic.
//! - Nothing here allocates except for error construction.
use crate::fracdiff::{
    errors::{FracdiffError, FracdiffResult},
    mode::Mode,
};

/// Check that the truncation window is at least 1.
///
/// Errors
/// ------
/// - `FracdiffError::InvalidWindow` when `window == 0`.
pub fn validate_window(window: usize) -> FracdiffResult<()> {
    if window == 0 {
        return Err(FracdiffError::InvalidWindow { window });
    }
    Ok(())
}

/// Check that the differencing order is a finite real number.
pub fn validate_order(d: f64) -> FracdiffResult<()> {
    if !d.is_finite() {
        return Err(FracdiffError::InvalidOrder { d });
    }
    Ok(())
}

/// Check that a series of length `n` can be transformed with `window` under
/// `mode`.
///
/// Parameters
/// ----------
/// - `n`: `usize`
///   Number of observations along the time axis.
/// - `window`: `usize`
///   Truncation window; assumed already checked by [`validate_window`].
/// - `mode`: [`Mode`]
///   Boundary policy.
///
/// Errors
/// ------
/// - `FracdiffError::EmptySeries` when `n == 0`, in either mode.
/// - `FracdiffError::InsufficientData` when `mode == Valid` and `n < window`.
pub fn validate_series_len(n: usize, window: usize, mode: Mode) -> FracdiffResult<()> {
    if n == 0 {
        return Err(FracdiffError::EmptySeries);
    }
    if mode == Mode::Valid && n < window {
        return Err(FracdiffError::InsufficientData { needed: window, got: n });
    }
    Ok(())
}

/// Check that a significance level lies strictly between 0 and 1.
pub fn validate_significance(value: f64) -> FracdiffResult<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(FracdiffError::InvalidSignificance { value });
    }
    Ok(())
}
