//! Conversion helpers for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is not part of the Rust-facing API surface.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2, Axis};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray, // ndarray → PyArray
    PyArrayMethods,
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::{
    fracdiff::{Mode, WindowPolicy},
    stationarity::StationarityOracle,
};

/// Convert a 1-D or 2-D array-like (numpy array, pandas object, or nested
/// sequence) into an owned `n_samples × n_features` matrix. One-dimensional
/// input becomes a single column.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw_data: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(column_matrix(arr.as_array().to_owned()));
    }

    if let Ok(obj) = raw_data.call_method1("to_numpy", (false,)) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
        if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(column_matrix(arr.as_array().to_owned()));
        }
    }

    if let Ok(rows) = raw_data.extract::<Vec<Vec<f64>>>() {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(PyValueError::new_err("all rows must have the same length"));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        return Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|err| PyValueError::new_err(err.to_string()));
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 1-D or 2-D numpy.ndarray, pandas object, or sequence of float64",
        )
    })?;
    Ok(column_matrix(Array1::from(vec)))
}

#[cfg(feature = "python-bindings")]
fn column_matrix(column: Array1<f64>) -> Array2<f64> {
    column.insert_axis(Axis(1))
}

#[cfg(feature = "python-bindings")]
pub fn extract_mode(mode: Option<&str>) -> PyResult<Mode> {
    Ok(mode.map(str::parse::<Mode>).transpose()?.unwrap_or_default())
}

#[cfg(feature = "python-bindings")]
pub fn extract_window_policy(window_policy: Option<&str>) -> PyResult<WindowPolicy> {
    Ok(window_policy.map(str::parse::<WindowPolicy>).transpose()?.unwrap_or_default())
}

/// Stationarity oracle backed by a Python callable
/// `stattest(x: numpy.ndarray, pvalue: float) -> bool`.
///
/// Any exception raised by the callable, or a return value that cannot be
/// converted to `bool`, is returned as the oracle error and surfaces
/// unchanged to the Python caller.
#[cfg(feature = "python-bindings")]
pub struct PyStationarityOracle<'py> {
    stattest: Bound<'py, PyAny>,
}

#[cfg(feature = "python-bindings")]
impl<'py> PyStationarityOracle<'py> {
    pub fn new(stattest: Bound<'py, PyAny>) -> PyResult<Self> {
        if !stattest.is_callable() {
            return Err(PyTypeError::new_err("stattest must be callable"));
        }
        Ok(PyStationarityOracle { stattest })
    }
}

#[cfg(feature = "python-bindings")]
impl StationarityOracle for PyStationarityOracle<'_> {
    type Error = PyErr;

    fn is_stationary(&self, series: ndarray::ArrayView1<f64>, significance: f64) -> PyResult<bool> {
        let py = self.stattest.py();
        let arr = series.to_owned().into_pyarray(py);
        self.stattest.call1((arr, significance))?.extract::<bool>()
    }
}
