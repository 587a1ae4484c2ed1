//! fracdiff::transformer — immutable configuration for a fixed-order
//! fractional differencing transform.
//!
//! Purpose
//! -------
//! Bundle `(d, window, mode, window_policy)` into a validated value type that
//! can be built once and applied to any number of series or matrices. There
//! is no fit step and no fitted state; the coefficients are a pure function of
//! `(d, window)` and are recomputed on each call.
//!
//! Key behaviors
//! -------------
//! - [`Fracdiff::new`] validates the window and the order.
//! - [`Fracdiff::coef`] returns the truncated operator weights.
//! - [`Fracdiff::transform`] / [`Fracdiff::transform_series`] apply the
//!   transform per column / to a single series.
//! - `Display` renders the parameters, e.g.
//!   `Fracdiff(d=0.5, window=10, mode=full, window_policy=fixed)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `window >= 1` and `d` is finite for every constructed value.
//! - Two transforms with equal parameters produce identical output.
use crate::fracdiff::{
    coefficients::generate_coefficients,
    convolution::{apply_coefficients, coefficient_len, fractional_diff, output_len},
    errors::FracdiffResult,
    mode::{Mode, WindowPolicy},
    validation::{validate_order, validate_series_len, validate_window},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::fmt;

/// Fracdiff — fixed-order fractional differencing of time series.
///
/// Fields
/// ------
/// - `d`: `f64`
///   Order of differentiation.
/// - `window`: `usize`
///   Number of observations used for each output element.
/// - `mode`: [`Mode`]
///   `Full` keeps the input length; `Valid` keeps only outputs that used
///   the complete window.
/// - `window_policy`: [`WindowPolicy`]
///   Only `Fixed` is available.
///
/// Notes
/// -----
/// - `Default` is `d = 1.0, window = 10, mode = full, window_policy = fixed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fracdiff {
    d: f64,
    window: usize,
    mode: Mode,
    window_policy: WindowPolicy,
}

impl Default for Fracdiff {
    fn default() -> Self {
        Fracdiff { d: 1.0, window: 10, mode: Mode::Full, window_policy: WindowPolicy::Fixed }
    }
}

impl Fracdiff {
    /// Construct a validated [`Fracdiff`].
    ///
    /// Errors
    /// ------
    /// - `FracdiffError::InvalidWindow` if `window == 0`.
    /// - `FracdiffError::InvalidOrder` if `d` is not finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_fracdiff::fracdiff::{Fracdiff, Mode, WindowPolicy};
    ///
    /// let f = Fracdiff::new(0.5, 10, Mode::Full, WindowPolicy::Fixed).unwrap();
    /// assert_eq!(f.to_string(), "Fracdiff(d=0.5, window=10, mode=full, window_policy=fixed)");
    /// ```
    pub fn new(
        d: f64, window: usize, mode: Mode, window_policy: WindowPolicy,
    ) -> FracdiffResult<Self> {
        validate_window(window)?;
        validate_order(d)?;
        Ok(Fracdiff { d, window, mode, window_policy })
    }

    /// Copy of `self` with a different order, validated.
    pub fn with_order(&self, d: f64) -> FracdiffResult<Self> {
        Fracdiff::new(d, self.window, self.mode, self.window_policy)
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn window_policy(&self) -> WindowPolicy {
        self.window_policy
    }

    /// Coefficients of the truncated operator, length `window`.
    pub fn coef(&self) -> FracdiffResult<Array1<f64>> {
        generate_coefficients(self.d, self.window)
    }

    /// Output length for an input of `n` observations.
    pub fn output_len(&self, n: usize) -> usize {
        output_len(n, self.window, self.mode)
    }

    /// Transform a single series.
    pub fn transform_series(&self, series: ArrayView1<f64>) -> FracdiffResult<Array1<f64>> {
        fractional_diff(series, self.d, self.window, self.mode)
    }

    /// Transform each column of an `n_samples × n_features` matrix.
    ///
    /// The coefficient buffer is generated once and shared by all columns. In
    /// full mode it holds at most `x.nrows()` weights.
    ///
    /// Errors
    /// ------
    /// - `FracdiffError::EmptySeries` if `x` has no rows.
    /// - `FracdiffError::InsufficientData` in valid mode when
    ///   `x.nrows() < window`.
    pub fn transform(&self, x: ArrayView2<f64>) -> FracdiffResult<Array2<f64>> {
        validate_series_len(x.nrows(), self.window, self.mode)?;
        let coef =
            generate_coefficients(self.d, coefficient_len(x.nrows(), self.window, self.mode))?;
        let mut out = Array2::<f64>::zeros((self.output_len(x.nrows()), x.ncols()));
        for (column, mut target) in x.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
            target.assign(&apply_coefficients(column, coef.view(), self.mode)?);
        }
        Ok(out)
    }
}

impl fmt::Display for Fracdiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fracdiff(d={}, window={}, mode={}, window_policy={})",
            self.d, self.window, self.mode, self.window_policy
        )
    }
}
