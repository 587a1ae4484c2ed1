//! stationarity::errors — error type for the minimal-order search.
//!
//! Purpose
//! -------
//! Separate the two ways a search can fail: the inputs violate a contract of
//! the differencing core ([`FracdiffError`]), or the injected stationarity
//! oracle itself reports an error. The oracle's error is carried unchanged so
//! callers can match on their own error type.
//!
//! Key behaviors
//! -------------
//! - [`SearchError<E>`] is generic over the oracle's error type `E`.
//! - `From<FracdiffError>` lets search code use `?` on core routines; oracle
//!   errors are wrapped explicitly with [`SearchError::Oracle`].
//! - `Error::source` exposes the wrapped error in both variants.
//!
//! Invariants & assumptions
//! ------------------------
//! - No retries: an oracle error aborts the search (and, for multi-feature
//!   input, every remaining feature).
//! - "No feasible order" is never an error; it is a `NaN` result.
use crate::fracdiff::errors::FracdiffError;
use std::fmt;

#[cfg(feature = "python-bindings")]
use pyo3::PyErr;

pub type SearchResult<T, E> = Result<T, SearchError<E>>;

/// Failure of a stationarity-order search.
///
/// Variants
/// --------
/// - `Fracdiff(FracdiffError)`
///   Parameter or shape validation failed before or while differencing.
/// - `Oracle(E)`
///   The stationarity oracle returned an error; propagated verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError<E> {
    Fracdiff(FracdiffError),
    Oracle(E),
}

impl<E> From<FracdiffError> for SearchError<E> {
    fn from(err: FracdiffError) -> Self {
        SearchError::Fracdiff(err)
    }
}

impl<E: fmt::Display> fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Fracdiff(err) => write!(f, "{err}"),
            SearchError::Oracle(err) => write!(f, "Stationarity oracle failed: {err}"),
        }
    }
}

impl<E> std::error::Error for SearchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Fracdiff(err) => Some(err),
            SearchError::Oracle(err) => Some(err),
        }
    }
}

/// Oracle errors raised in Python are re-raised as-is; validation errors
/// become `ValueError`.
#[cfg(feature = "python-bindings")]
impl From<SearchError<PyErr>> for PyErr {
    fn from(err: SearchError<PyErr>) -> PyErr {
        match err {
            SearchError::Fracdiff(err) => err.into(),
            SearchError::Oracle(err) => err,
        }
    }
}
