//! stationarity — minimal fractional order that makes a series stationary.
//!
//! Purpose
//! -------
//! Search, by bisection, the smallest differencing order within given
//! bounds whose fractional difference passes an injected stationarity test,
//! and apply the resulting per-feature orders to multi-feature data.
//!
//! Key behaviors
//! -------------
//! - [`StationarityOracle`] is the only contract with the statistical test;
//!   [`from_fn`] and [`infallible`] adapt closures.
//! - [`find_minimal_order`] / [`find_minimal_orders`] implement the search
//!   for one series / every column of a matrix.
//! - [`FracdiffStat`] bundles window, mode, significance level, and
//!   [`SearchBounds`] into one configuration value with `fit`, `transform`,
//!   and `fit_transform`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Stationarity is assumed monotone in the order over the bounds.
//! - Infeasible features are reported with `NaN`, not with an error.
//! - Oracle errors are returned unchanged inside [`SearchError::Oracle`].
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::{Array2, ArrayView1};
//! use rust_fracdiff::stationarity::{FracdiffStat, infallible};
//!
//! let x = Array2::from_shape_fn((50, 2), |(t, j)| (t as f64).sqrt() * (j + 1) as f64);
//! // Replace with a real unit-root test.
//! let oracle = infallible(|y: ArrayView1<f64>, _alpha: f64| y[y.len() - 1].abs() < 1.0);
//! let (orders, diffed) = FracdiffStat::default().fit_transform(x.view(), &oracle).unwrap();
//! assert_eq!(orders.len(), 2);
//! assert_eq!(diffed.ncols(), 2);
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests in [`search`] pin exact oracle call counts and bisection
//!   results with a synthetic threshold oracle; [`fracdiff_stat`] covers the
//!   fit/transform pairing and NaN handling.

pub mod errors;
pub mod fracdiff_stat;
pub mod oracle;
pub mod search;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SearchError, SearchResult};
pub use self::fracdiff_stat::{FittedOrders, FracdiffStat};
pub use self::oracle::{FnOracle, InfallibleOracle, StationarityOracle, from_fn, infallible};
pub use self::search::{SearchBounds, find_minimal_order, find_minimal_orders};

#[cfg(feature = "parallel")]
pub use self::search::find_minimal_orders_parallel;

pub mod prelude {
    pub use super::{
        FittedOrders, FracdiffStat, SearchBounds, SearchError, SearchResult, StationarityOracle,
        find_minimal_order, find_minimal_orders, from_fn, infallible,
    };
}
