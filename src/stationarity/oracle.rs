//! stationarity::oracle — injected stationarity test capability.
//!
//! Purpose
//! -------
//! Model the stationarity test (ADF or any other) as a capability passed into
//! the search rather than a method selected by name. New tests plug in by
//! implementing [`StationarityOracle`]; the search algorithm never changes.
//!
//! Key behaviors
//! -------------
//! - [`StationarityOracle::is_stationary`] receives the differenced series
//!   and the significance level, and returns a verdict or the oracle's own
//!   error.
//! - [`from_fn`] adapts a fallible closure; [`infallible`] adapts a closure
//!   returning a plain `bool` (error type [`std::convert::Infallible`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Oracles are expected to be deterministic: the same series and level
//!   must yield the same verdict. The search does not re-check verdicts.
//! - Oracles take `&self`; any internal bookkeeping needs interior
//!   mutability. Parallel fitting additionally requires `Sync`.
use ndarray::ArrayView1;
use std::convert::Infallible;

/// Stationarity test consumed by the order search.
pub trait StationarityOracle {
    /// Error reported by the underlying test.
    type Error;

    /// Return `Ok(true)` when `series` is judged stationary at
    /// `significance`, `Ok(false)` when it is not.
    fn is_stationary(&self, series: ArrayView1<f64>, significance: f64)
    -> Result<bool, Self::Error>;
}

impl<O: StationarityOracle + ?Sized> StationarityOracle for &O {
    type Error = O::Error;

    fn is_stationary(
        &self, series: ArrayView1<f64>, significance: f64,
    ) -> Result<bool, Self::Error> {
        (**self).is_stationary(series, significance)
    }
}

/// Oracle backed by a fallible closure. Built with [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnOracle<F> {
    f: F,
}

/// Wrap a closure `(series, significance) -> Result<bool, E>` as an oracle.
///
/// Examples
/// --------
/// ```rust
/// use ndarray::{ArrayView1, array};
/// use rust_fracdiff::stationarity::{StationarityOracle, from_fn};
///
/// let oracle = from_fn(|x: ArrayView1<f64>, _alpha: f64| -> Result<bool, String> {
///     Ok(x.iter().all(|v| v.abs() < 10.0))
/// });
/// assert_eq!(oracle.is_stationary(array![1.0, -2.0].view(), 0.05), Ok(true));
/// ```
pub fn from_fn<F, E>(f: F) -> FnOracle<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> Result<bool, E>,
{
    FnOracle { f }
}

impl<F, E> StationarityOracle for FnOracle<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> Result<bool, E>,
{
    type Error = E;

    fn is_stationary(&self, series: ArrayView1<f64>, significance: f64) -> Result<bool, E> {
        (self.f)(series, significance)
    }
}

/// Oracle backed by a closure that cannot fail. Built with [`infallible`].
#[derive(Debug, Clone, Copy)]
pub struct InfallibleOracle<F> {
    f: F,
}

/// Wrap a closure `(series, significance) -> bool` as an oracle whose error
/// type is [`Infallible`].
pub fn infallible<F>(f: F) -> InfallibleOracle<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> bool,
{
    InfallibleOracle { f }
}

impl<F> StationarityOracle for InfallibleOracle<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> bool,
{
    type Error = Infallible;

    fn is_stationary(
        &self, series: ArrayView1<f64>, significance: f64,
    ) -> Result<bool, Infallible> {
        Ok((self.f)(series, significance))
    }
}
