//! rust_fracdiff — fractional differencing of time series with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes fractional differencing and the minimal stationary-order search to
//! Python via the `_rust_fracdiff` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`fracdiff` and `stationarity`) as the
//!   public crate surface.
//! - When the `python-bindings` feature is enabled, define `#[pyclass]`
//!   wrappers (`Fracdiff`, `FracdiffStat`), the free functions `fdiff` and
//!   `fdiff_coef`, and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, argument parsing, and error mapping.
//! - The Python `FracdiffStat` takes the stationarity test as a callable
//!   `stattest(x, pvalue) -> bool`; exceptions raised by it propagate
//!   unchanged.
//!
//! Conventions
//! -----------
//! - Input matrices are `n_samples × n_features`; 1-D input is treated as a
//!   single feature.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary with the Rust `Display` message preserved.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`fracdiff`] and [`stationarity`]
//!   directly and can ignore the items guarded by `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_fracdiff_pipeline.rs`. The PyO3 layer is exercised
//!   from Python.

pub mod fracdiff;
pub mod stationarity;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    fracdiff::{Fracdiff, fractional_diff_columns, generate_coefficients},
    stationarity::{FittedOrders, FracdiffStat, SearchBounds},
    utils::{PyStationarityOracle, extract_f64_matrix, extract_mode, extract_window_policy},
};

/// Fracdiff — Python-facing fixed-order fractional differencing.
///
/// Constructed from Python via
/// `Fracdiff(d=1.0, window=10, mode="full", window_policy="fixed")`.
/// `fit` is accepted for pipeline compatibility and does nothing beyond
/// returning `self`; `transform` needs no prior `fit`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "Fracdiff", module = "rust_fracdiff")]
pub struct PyFracdiff {
    inner: Fracdiff,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFracdiff {
    #[new]
    #[pyo3(
        signature = (d = 1.0, window = 10, mode = None, window_policy = None),
        text_signature = "(d=1.0, window=10, mode='full', window_policy='fixed')"
    )]
    pub fn new(
        d: f64, window: usize, mode: Option<&str>, window_policy: Option<&str>,
    ) -> PyResult<Self> {
        let inner = Fracdiff::new(d, window, extract_mode(mode)?, extract_window_policy(window_policy)?)?;
        Ok(PyFracdiff { inner })
    }

    #[pyo3(signature = (x = None, y = None))]
    pub fn fit<'py>(
        slf: PyRef<'py, Self>, x: Option<&Bound<'py, PyAny>>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyRef<'py, Self> {
        let _ = (x, y);
        slf
    }

    #[pyo3(signature = (x, y = None))]
    pub fn transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let _ = y;
        let data = extract_f64_matrix(x)?;
        Ok(self.inner.transform(data.view())?.into_pyarray(py))
    }

    #[pyo3(signature = (x, y = None))]
    pub fn fit_transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        self.transform(py, x, y)
    }

    #[getter]
    pub fn d(&self) -> f64 {
        self.inner.d()
    }

    #[getter]
    pub fn window(&self) -> usize {
        self.inner.window()
    }

    #[getter]
    pub fn mode(&self) -> &'static str {
        self.inner.mode().as_str()
    }

    #[getter]
    pub fn window_policy(&self) -> &'static str {
        self.inner.window_policy().as_str()
    }

    #[getter]
    #[allow(non_snake_case)]
    pub fn coef_<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(self.inner.coef()?.into_pyarray(py))
    }

    pub fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// FracdiffStat — Python-facing minimal-order fractional differencing.
///
/// Constructed from Python via
/// `FracdiffStat(stattest, window=10, mode="full", window_policy="fixed",
/// pvalue=0.05, precision=0.01, upper=1.0, lower=0.0)`, where `stattest` is a
/// callable `(x: ndarray, pvalue: float) -> bool` returning `True` for a
/// stationary series.
///
/// Fields
/// ------
/// - `inner`: [`FracdiffStat`] configuration.
/// - `stattest`: the Python oracle.
/// - `fitted`: orders from the last `fit`, exposed as `d_`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "FracdiffStat", module = "rust_fracdiff")]
pub struct PyFracdiffStat {
    inner: FracdiffStat,
    stattest: PyObject,
    fitted: Option<FittedOrders>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFracdiffStat {
    #[new]
    #[pyo3(
        signature = (
            stattest,
            window = 10,
            mode = None,
            window_policy = None,
            pvalue = 0.05,
            precision = 0.01,
            upper = 1.0,
            lower = 0.0,
        ),
        text_signature = "(stattest, /, window=10, mode='full', window_policy='fixed', \
                          pvalue=0.05, precision=0.01, upper=1.0, lower=0.0)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stattest: &Bound<'_, PyAny>, window: usize, mode: Option<&str>,
        window_policy: Option<&str>, pvalue: f64, precision: f64, upper: f64, lower: f64,
    ) -> PyResult<Self> {
        // Validates callability up front.
        PyStationarityOracle::new(stattest.clone())?;
        let bounds = SearchBounds::new(lower, upper, precision)?;
        let inner = FracdiffStat::new(
            window,
            extract_mode(mode)?,
            extract_window_policy(window_policy)?,
            pvalue,
            bounds,
        )?;
        Ok(PyFracdiffStat { inner, stattest: stattest.clone().unbind(), fitted: None })
    }

    #[pyo3(signature = (x, y = None))]
    pub fn fit<'py>(
        mut slf: PyRefMut<'py, Self>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PyRefMut<'py, Self>> {
        let _ = y;
        let data = extract_f64_matrix(x)?;
        let oracle = PyStationarityOracle::new(slf.stattest.bind(x.py()).clone())?;
        let orders = slf.inner.fit(data.view(), &oracle)?;
        slf.fitted = Some(orders);
        Ok(slf)
    }

    #[pyo3(signature = (x, y = None))]
    pub fn transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let _ = y;
        let orders = self.fitted.as_ref().ok_or_else(not_fitted)?;
        let data = extract_f64_matrix(x)?;
        Ok(self.inner.transform(data.view(), orders)?.into_pyarray(py))
    }

    #[pyo3(signature = (x, y = None))]
    pub fn fit_transform<'py>(
        mut slf: PyRefMut<'py, Self>, py: Python<'py>, x: &Bound<'py, PyAny>,
        y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let _ = y;
        let data = extract_f64_matrix(x)?;
        let oracle = PyStationarityOracle::new(slf.stattest.bind(py).clone())?;
        let (orders, out) = slf.inner.fit_transform(data.view(), &oracle)?;
        slf.fitted = Some(orders);
        Ok(out.into_pyarray(py))
    }

    /// Minimal stationary order per feature (`nan` where none was found).
    #[getter]
    #[allow(non_snake_case)]
    pub fn d_<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let orders = self.fitted.as_ref().ok_or_else(not_fitted)?;
        Ok(orders.orders().to_owned().into_pyarray(py))
    }

    pub fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

#[cfg(feature = "python-bindings")]
fn not_fitted() -> PyErr {
    PyValueError::new_err("FracdiffStat is not fitted yet; call fit first")
}

/// Fractional difference of `a` (1-D or `n_samples × n_features`) along the
/// time axis with order `n`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (a, n = 1.0, window = 10, mode = None))]
fn fdiff<'py>(
    py: Python<'py>, a: &Bound<'py, PyAny>, n: f64, window: usize, mode: Option<&str>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let data = extract_f64_matrix(a)?;
    Ok(fractional_diff_columns(data.view(), n, window, extract_mode(mode)?)?.into_pyarray(py))
}

/// Truncated coefficients of the fractional differencing operator.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (d, window = 10))]
fn fdiff_coef<'py>(py: Python<'py>, d: f64, window: usize) -> PyResult<Bound<'py, PyArray1<f64>>> {
    Ok(generate_coefficients(d, window)?.into_pyarray(py))
}

/// _rust_fracdiff — PyO3 module initializer for the Python extension.
///
/// Registers the `Fracdiff` and `FracdiffStat` classes and the `fdiff` /
/// `fdiff_coef` functions. Invoked by Python on import.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_fracdiff<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyFracdiff>()?;
    m.add_class::<PyFracdiffStat>()?;
    m.add_function(wrap_pyfunction!(fdiff, m)?)?;
    m.add_function(wrap_pyfunction!(fdiff_coef, m)?)?;
    Ok(())
}
