//! fracdiff — finite-window fractional differencing.
//!
//! Purpose
//! -------
//! Compute the fractional derivative `(1 − L)^d x` of a time series, where
//! `L` is the lag operator and `d` a real order. Orders between 0 and 1
//! interpolate between the raw series and its first difference, removing
//! enough memory to reach stationarity while keeping more long-range
//! dependence than a full difference.
//!
//! Key behaviors
//! -------------
//! - [`coefficients`]: the truncated binomial weights of the operator.
//! - [`convolution`]: the causal truncated convolution under [`Mode::Full`]
//!   (length-preserving, shrinking window at the start) or [`Mode::Valid`]
//!   (complete window only), for one series or per matrix column.
//! - [`transformer`]: the [`Fracdiff`] value type bundling
//!   `(d, window, mode, window_policy)`.
//! - [`validation`] and [`errors`]: shared guards and the
//!   [`FracdiffError`] / [`FracdiffResult`] pair.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coefficient length always equals the window.
//! - Full mode output length is `n`; valid mode output length is
//!   `n − window + 1` and requires `n ≥ window`.
//! - Truncation at `window` terms is an approximation of the infinite
//!   operator; early full-mode outputs carry boundary bias.
//!
//! Conventions
//! -----------
//! - Matrices are `n_samples × n_features` (rows = time).
//! - All routines are pure; each call owns its coefficient and output
//!   buffers.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::array;
//! use rust_fracdiff::fracdiff::{Mode, fractional_diff};
//!
//! let x = array![0.0, 2.0, 4.0, 6.0];
//! let y = fractional_diff(x.view(), 0.5, 3, Mode::Full)?;
//! assert_eq!(y.len(), 4);
//! # Ok::<(), rust_fracdiff::fracdiff::FracdiffError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the end-to-end pipeline with
//!   the order search lives in `tests/integration_fracdiff_pipeline.rs`.

pub mod coefficients;
pub mod convolution;
pub mod errors;
pub mod mode;
pub mod transformer;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coefficients::generate_coefficients;
pub use self::convolution::{
    apply_coefficients, fractional_diff, fractional_diff_columns, output_len,
};
pub use self::errors::{FracdiffError, FracdiffResult};
pub use self::mode::{Mode, WindowPolicy};
pub use self::transformer::Fracdiff;

pub mod prelude {
    pub use super::{
        Fracdiff, FracdiffError, FracdiffResult, Mode, WindowPolicy, fractional_diff,
        fractional_diff_columns, generate_coefficients,
    };
}
