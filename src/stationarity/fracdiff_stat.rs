//! stationarity::fracdiff_stat — minimal-order fractional differencing of
//! multi-feature data.
//!
//! Purpose
//! -------
//! Combine the order search and the differencing transform into one
//! configuration value: fit the minimal stationary order of every feature,
//! then difference each feature with its own order.
//!
//! Key behaviors
//! -------------
//! - [`FracdiffStat::fit`] returns a [`FittedOrders`] value (one order per
//!   column, `NaN` where no feasible order exists). Nothing is stored on the
//!   configuration, so fit/transform ordering hazards cannot arise.
//! - [`FracdiffStat::transform`] differences column `i` with `orders[i]`
//!   into an output of the reference length of the configured window/mode.
//!   A `NaN` order yields an all-`NaN` column.
//! - [`FracdiffStat::fit_transform`] chains the two.
//! - `fit_parallel` (feature `parallel`) searches columns on the rayon pool.
//!
//! Invariants & assumptions
//! ------------------------
//! - Window and mode are global across features, so every transformed
//!   column has exactly the reference length; the output shape never
//!   depends on the fitted orders.
//! - The significance level is forwarded verbatim to the oracle.
use crate::{
    fracdiff::{
        convolution::{fractional_diff, output_len},
        errors::{FracdiffError, FracdiffResult},
        mode::{Mode, WindowPolicy},
        validation::{validate_series_len, validate_significance, validate_window},
    },
    stationarity::{
        errors::SearchResult,
        oracle::StationarityOracle,
        search::{SearchBounds, find_minimal_orders},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::fmt;

/// FracdiffStat — configuration of the minimal-order differencing pipeline.
///
/// Fields
/// ------
/// - `window`: `usize`
///   Truncation window used both during the search and in `transform`.
/// - `mode`: [`Mode`]
///   Boundary policy used both during the search and in `transform`.
/// - `window_policy`: [`WindowPolicy`]
///   Only `Fixed`.
/// - `significance`: `f64`
///   Level handed to the oracle (the p-value threshold of e.g. an ADF test).
/// - `bounds`: [`SearchBounds`]
///   Order interval and bisection precision.
///
/// Notes
/// -----
/// - `Default` is `window = 10, mode = full, window_policy = fixed,
///   significance = 0.05, bounds = SearchBounds::default()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracdiffStat {
    window: usize,
    mode: Mode,
    window_policy: WindowPolicy,
    significance: f64,
    bounds: SearchBounds,
}

impl Default for FracdiffStat {
    fn default() -> Self {
        FracdiffStat {
            window: 10,
            mode: Mode::Full,
            window_policy: WindowPolicy::Fixed,
            significance: 0.05,
            bounds: SearchBounds::default(),
        }
    }
}

impl FracdiffStat {
    /// Construct a validated [`FracdiffStat`].
    ///
    /// Errors
    /// ------
    /// - `FracdiffError::InvalidWindow` if `window == 0`.
    /// - `FracdiffError::InvalidSignificance` if `significance` is outside (0, 1).
    pub fn new(
        window: usize, mode: Mode, window_policy: WindowPolicy, significance: f64,
        bounds: SearchBounds,
    ) -> FracdiffResult<Self> {
        validate_window(window)?;
        validate_significance(significance)?;
        Ok(FracdiffStat { window, mode, window_policy, significance, bounds })
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

    pub fn significance(&self) -> f64 {
        self.significance
    }

    pub fn bounds(&self) -> SearchBounds {
        self.bounds
    }

    /// Search the minimal stationary order of every column of `x`.
    ///
    /// Errors
    /// ------
    /// - `SearchError::Fracdiff` on shape violations (empty input, valid mode
    ///   with fewer rows than `window`).
    /// - `SearchError::Oracle` with the first error raised by `oracle`.
    pub fn fit<O>(&self, x: ArrayView2<f64>, oracle: &O) -> SearchResult<FittedOrders, O::Error>
    where
        O: StationarityOracle + ?Sized,
    {
        let orders =
            find_minimal_orders(x, self.window, self.mode, oracle, self.significance, &self.bounds)?;
        Ok(FittedOrders { orders })
    }

    /// Like [`fit`](Self::fit), with columns searched in parallel.
    #[cfg(feature = "parallel")]
    pub fn fit_parallel<O>(
        &self, x: ArrayView2<f64>, oracle: &O,
    ) -> SearchResult<FittedOrders, O::Error>
    where
        O: StationarityOracle + Sync + ?Sized,
        O::Error: Send,
    {
        let orders = crate::stationarity::search::find_minimal_orders_parallel(
            x,
            self.window,
            self.mode,
            oracle,
            self.significance,
            &self.bounds,
        )?;
        Ok(FittedOrders { orders })
    }

    /// Difference each column of `x` with its fitted order.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `ArrayView2<f64>`
    ///   `n_samples × n_features` input; need not be the matrix used in
    ///   `fit`, but must have the same number of columns.
    /// - `orders`: `&FittedOrders`
    ///   One order per column.
    ///
    /// Returns
    /// -------
    /// `FracdiffResult<Array2<f64>>` of shape `(output_len, n_features)`.
    ///
    /// Errors
    /// ------
    /// - `FracdiffError::FeatureMismatch` if `orders.len() != x.ncols()`.
    /// - `FracdiffError::EmptySeries` / `FracdiffError::InsufficientData` as
    ///   for the plain transform.
    pub fn transform(
        &self, x: ArrayView2<f64>, orders: &FittedOrders,
    ) -> FracdiffResult<Array2<f64>> {
        if orders.len() != x.ncols() {
            return Err(FracdiffError::FeatureMismatch { expected: x.ncols(), got: orders.len() });
        }
        validate_series_len(x.nrows(), self.window, self.mode)?;

        let reference_len = output_len(x.nrows(), self.window, self.mode);
        let mut out = Array2::<f64>::from_elem((reference_len, x.ncols()), f64::NAN);
        for ((column, &d), mut target) in
            x.axis_iter(Axis(1)).zip(orders.orders.iter()).zip(out.axis_iter_mut(Axis(1)))
        {
            if d.is_nan() {
                continue;
            }
            let diffed = fractional_diff(column, d, self.window, self.mode)?;
            debug_assert_eq!(diffed.len(), reference_len);
            target.assign(&diffed);
        }
        Ok(out)
    }

    /// Fit on `x` and transform `x` with the fitted orders.
    pub fn fit_transform<O>(
        &self, x: ArrayView2<f64>, oracle: &O,
    ) -> SearchResult<(FittedOrders, Array2<f64>), O::Error>
    where
        O: StationarityOracle + ?Sized,
    {
        let orders = self.fit(x, oracle)?;
        let out = self.transform(x, &orders)?;
        Ok((orders, out))
    }
}

impl fmt::Display for FracdiffStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FracdiffStat(window={}, mode={}, window_policy={}, pvalue={}, precision={}, \
             upper={}, lower={})",
            self.window,
            self.mode,
            self.window_policy,
            self.significance,
            self.bounds.precision(),
            self.bounds.upper(),
            self.bounds.lower()
        )
    }
}

/// Minimal stationary orders, one per feature, as returned by
/// [`FracdiffStat::fit`]. `NaN` marks a feature with no feasible order.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedOrders {
    orders: Array1<f64>,
}

impl FittedOrders {
    /// Wrap externally obtained orders (e.g. from a previous run).
    pub fn new(orders: Array1<f64>) -> Self {
        FittedOrders { orders }
    }

    pub fn orders(&self) -> ArrayView1<f64> {
        self.orders.view()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of features for which a feasible order was found.
    pub fn feasible_count(&self) -> usize {
        self.orders.iter().filter(|d| !d.is_nan()).count()
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fracdiff::convolution::fractional_diff_columns,
        stationarity::{errors::SearchError, oracle::infallible},
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults, validation, and `Display`.
    // - fit → transform on impulse columns with a synthetic threshold oracle.
    // - NaN orders producing NaN columns, and the feature-count check.
    //
    // They intentionally DO NOT cover:
    // - Bisection internals, which are tested in `search`.
    // -------------------------------------------------------------------------

    fn impulse_columns(n: usize, scales: &[f64]) -> Array2<f64> {
        let mut x = Array2::<f64>::zeros((n, scales.len()));
        for (j, &scale) in scales.iter().enumerate() {
            x[[0, j]] = scale;
        }
        x
    }

    #[test]
    fn default_and_display_match_documented_parameters() {
        let f = FracdiffStat::default();
        assert_eq!(f.window(), 10);
        assert_eq!(f.mode(), Mode::Full);
        assert_eq!(f.significance(), 0.05);
        assert_eq!(
            f.to_string(),
            "FracdiffStat(window=10, mode=full, window_policy=fixed, pvalue=0.05, \
             precision=0.01, upper=1, lower=0)"
        );
    }

    #[test]
    fn new_rejects_bad_window_and_significance() {
        let bounds = SearchBounds::default();
        assert_eq!(
            FracdiffStat::new(0, Mode::Full, WindowPolicy::Fixed, 0.05, bounds),
            Err(FracdiffError::InvalidWindow { window: 0 })
        );
        assert!(matches!(
            FracdiffStat::new(5, Mode::Full, WindowPolicy::Fixed, 0.0, bounds),
            Err(FracdiffError::InvalidSignificance { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exercise fit → transform end-to-end on synthetic features.
    //
    // Given
    // -----
    // - Two impulse columns (scales 1 and 5), window 3, full mode.
    // - An oracle accepting when −y[1] / y[0] >= 0.3 and y[0] < 2, so the
    //   second column is never stationary.
    //
    // Expect
    // ------
    // - Orders [0.3046875, NaN]; one feasible feature.
    // - Column 0 of the output equals the d = 0.3046875 transform; column 1
    //   is all NaN.
    fn fit_then_transform_applies_per_feature_orders() {
        // Arrange
        let x = impulse_columns(6, &[1.0, 5.0]);
        let oracle =
            infallible(|y: ArrayView1<f64>, _alpha: f64| y[0] < 2.0 && -y[1] / y[0] >= 0.3);
        let stat = FracdiffStat::new(3, Mode::Full, WindowPolicy::Fixed, 0.05, SearchBounds::default())
            .unwrap();

        // Act
        let (orders, out) = stat.fit_transform(x.view(), &oracle).unwrap();

        // Assert
        assert_eq!(orders.len(), 2);
        assert_eq!(orders.feasible_count(), 1);
        assert_eq!(orders.orders()[0], 0.3046875);
        assert!(orders.orders()[1].is_nan());

        assert_eq!(out.dim(), (6, 2));
        let expected = fractional_diff(x.column(0), 0.3046875, 3, Mode::Full).unwrap();
        for (got, want) in out.column(0).iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-15);
        }
        assert!(out.column(1).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn valid_mode_output_matches_reference_length() {
        let x = Array2::from_shape_fn((7, 2), |(i, j)| (i * (j + 1)) as f64);
        let stat = FracdiffStat::new(4, Mode::Valid, WindowPolicy::Fixed, 0.05, SearchBounds::default())
            .unwrap();
        let orders = FittedOrders::new(array![0.5, 0.25]);

        let out = stat.transform(x.view(), &orders).unwrap();
        let reference = fractional_diff_columns(x.view(), 0.5, 4, Mode::Valid).unwrap();

        assert_eq!(out.nrows(), reference.nrows());
        for (got, want) in out.column(0).iter().zip(reference.column(0).iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-14);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure every transformed column fills the reference length exactly,
    // in both modes and with a window larger than the series in full mode.
    //
    // Given
    // -----
    // - A 5 × 2 trend, orders [0.5, NaN].
    // - Valid mode with window 3; full mode with window usize::MAX / 4.
    //
    // Expect
    // ------
    // - Shapes (3, 2) and (5, 2); column 0 equals the fixed-order transform;
    //   column 1 is all NaN.
    fn transform_fills_reference_length_in_both_modes() {
        let x = Array2::from_shape_fn((5, 2), |(i, j)| (2 * i + j) as f64);
        let orders = FittedOrders::new(array![0.5, f64::NAN]);

        for (window, mode, rows) in [(3, Mode::Valid, 3), (usize::MAX / 4, Mode::Full, 5)] {
            let stat =
                FracdiffStat::new(window, mode, WindowPolicy::Fixed, 0.05, SearchBounds::default())
                    .unwrap();

            let out = stat.transform(x.view(), &orders).unwrap();
            let reference = fractional_diff(x.column(0), 0.5, window, mode).unwrap();

            assert_eq!(out.dim(), (rows, 2));
            assert_eq!(out.column(0), reference);
            assert!(out.column(1).iter().all(|v| v.is_nan()));
        }
    }

    #[test]
    fn transform_rejects_mismatched_feature_count() {
        let x = Array2::<f64>::zeros((5, 3));
        let orders = FittedOrders::new(array![0.1, 0.2]);
        assert_eq!(
            FracdiffStat::default().transform(x.view(), &orders),
            Err(FracdiffError::FeatureMismatch { expected: 3, got: 2 })
        );
    }

    #[test]
    fn fit_propagates_oracle_errors() {
        let x = impulse_columns(5, &[1.0]);
        let oracle = crate::stationarity::oracle::from_fn(
            |_y: ArrayView1<f64>, _alpha: f64| -> Result<bool, String> {
                Err("singular design matrix".to_string())
            },
        );
        assert_eq!(
            FracdiffStat::default().fit(x.view(), &oracle),
            Err(SearchError::Oracle("singular design matrix".to_string()))
        );
    }
}
