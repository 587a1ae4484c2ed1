//! stationarity::search — bisection for the minimal stationary order.
//!
//! Purpose
//! -------
//! Find, for a series, the smallest differencing order `d` in
//! `[lower, upper]` whose fractional difference passes a
//! [`StationarityOracle`], to within a given precision.
//!
//! Key behaviors
//! -------------
//! - Check `upper` first: if even the largest allowed order is not
//!   stationary, return `NaN` (no feasible order).
//! - Check `lower` next: if it is already stationary, return `lower`. The
//!   true infimum may be smaller; no smaller order is tried.
//! - Otherwise bisect while `upper − lower > precision`, moving `upper` down
//!   on a stationary midpoint and `lower` up otherwise, and return `upper`.
//! - [`find_minimal_orders`] runs one independent search per matrix column
//!   and returns the orders in column order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Stationarity is assumed monotone non-decreasing in `d` over the bounds.
//!   This is not verified; on non-monotone inputs the result is *a* crossing
//!   point, not necessarily the infimum.
//! - Every evaluated order costs exactly one convolution and one oracle call.
//!   The number of bisection steps is at most
//!   [`SearchBounds::bisection_steps`], independent of the data. The loop
//!   also stops once the midpoint can no longer be separated from an end in
//!   `f64`, so a precision finer than the float spacing still terminates.
//! - All parameter checks happen before the first oracle call.
//!
//! Conventions
//! -----------
//! - Progress is reported through `tracing` at `debug` (outcome) and `trace`
//!   (each step) level; no subscriber is installed by this crate.
//!
//! Testing notes
//! -------------
//! - Unit tests use an impulse series, whose full-mode transform at lag 1
//!   equals `−d`, so a threshold oracle on that element is an exact,
//!   monotone stand-in for a real test and oracle call counts are exact.
use crate::{
    fracdiff::{
        convolution::fractional_diff,
        errors::{FracdiffError, FracdiffResult},
        mode::Mode,
        validation::{validate_series_len, validate_significance, validate_window},
    },
    stationarity::{
        errors::{SearchError, SearchResult},
        oracle::StationarityOracle,
    },
};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use tracing::{debug, trace};

/// SearchBounds — interval and resolution of the order search.
///
/// Fields
/// ------
/// - `lower`, `upper`: `f64`
///   Finite interval ends with `lower <= upper`.
/// - `precision`: `f64`
///   Finite, strictly positive interval width at which bisection stops.
///
/// Notes
/// -----
/// - `Default` is `lower = 0.0, upper = 1.0, precision = 0.01`.
/// - Inverted bounds are rejected, never swapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    lower: f64,
    upper: f64,
    precision: f64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        SearchBounds { lower: 0.0, upper: 1.0, precision: 0.01 }
    }
}

impl SearchBounds {
    /// Construct validated search bounds.
    ///
    /// Errors
    /// ------
    /// - `FracdiffError::InvalidBounds` if either end is non-finite,
    ///   `lower > upper`, or `upper − lower` overflows.
    /// - `FracdiffError::InvalidPrecision` if `precision` is not finite and
    ///   strictly positive.
    pub fn new(lower: f64, upper: f64, precision: f64) -> FracdiffResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(FracdiffError::InvalidBounds {
                lower,
                upper,
                reason: "Bounds must be finite.",
            });
        }
        if lower > upper {
            return Err(FracdiffError::InvalidBounds {
                lower,
                upper,
                reason: "lower must not exceed upper.",
            });
        }
        if !(upper - lower).is_finite() {
            return Err(FracdiffError::InvalidBounds {
                lower,
                upper,
                reason: "Bound width must be finite.",
            });
        }
        if !(precision.is_finite() && precision > 0.0) {
            return Err(FracdiffError::InvalidPrecision { precision });
        }
        Ok(SearchBounds { lower, upper, precision })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of bisection steps a search over these bounds performs when
    /// neither end short-circuits it. A search never exceeds it and stops
    /// earlier only when the bracket reaches adjacent floats.
    pub fn bisection_steps(&self) -> usize {
        let mut width = self.upper - self.lower;
        let mut steps = 0;
        while width > self.precision {
            width /= 2.0;
            steps += 1;
        }
        steps
    }
}

/// Find the minimal order in `bounds` at which `series` becomes stationary.
///
/// Parameters
/// ----------
/// - `series`: `ArrayView1<f64>`
///   Observations in time order.
/// - `window`: `usize`
///   Truncation window of the differencing operator; at least 1.
/// - `mode`: [`Mode`]
///   Boundary policy used for every candidate transform.
/// - `oracle`: `&O`
///   Stationarity test.
/// - `significance`: `f64`
///   Level passed to the oracle; must lie in (0, 1).
/// - `bounds`: `&SearchBounds`
///   Search interval and precision.
///
/// Returns
/// -------
/// `SearchResult<f64, O::Error>`
///   - `Ok(NaN)` if the transform at `bounds.upper()` is not stationary.
///   - `Ok(lower)` if the transform at `bounds.lower()` is already stationary.
///   - Otherwise `Ok(d)` with `d` the upper end of the final bisection
///     interval, whose width is at most `bounds.precision()`.
///
/// Errors
/// ------
/// - `SearchError::Fracdiff` for an invalid window or significance, an empty
///   series, or (valid mode) a series shorter than the window. Raised before
///   the oracle is consulted.
/// - `SearchError::Oracle` for any error returned by the oracle.
///
/// Examples
/// --------
/// ```rust
/// use ndarray::{Array1, ArrayView1};
/// use rust_fracdiff::{
///     fracdiff::Mode,
///     stationarity::{SearchBounds, find_minimal_order, infallible},
/// };
///
/// // Impulse: the lag-1 output of the transform equals −d.
/// let mut x = Array1::<f64>::zeros(8);
/// x[0] = 1.0;
/// let oracle = infallible(|y: ArrayView1<f64>, _alpha: f64| -y[1] >= 0.3);
/// let d = find_minimal_order(x.view(), 4, Mode::Full, &oracle, 0.05, &SearchBounds::default())
///     .unwrap();
/// assert!(d >= 0.3 && d - 0.3 <= 0.01);
/// ```
pub fn find_minimal_order<O>(
    series: ArrayView1<f64>, window: usize, mode: Mode, oracle: &O, significance: f64,
    bounds: &SearchBounds,
) -> SearchResult<f64, O::Error>
where
    O: StationarityOracle + ?Sized,
{
    validate_window(window)?;
    validate_significance(significance)?;
    validate_series_len(series.len(), window, mode)?;

    let is_stationary_at = |d: f64| -> SearchResult<bool, O::Error> {
        let diffed = fractional_diff(series, d, window, mode)?;
        oracle.is_stationary(diffed.view(), significance).map_err(SearchError::Oracle)
    };

    let mut lower = bounds.lower();
    let mut upper = bounds.upper();

    if !is_stationary_at(upper)? {
        debug!(upper, "series is not stationary at the upper bound; no feasible order");
        return Ok(f64::NAN);
    }
    if is_stationary_at(lower)? {
        debug!(lower, "series is already stationary at the lower bound; infimum may be smaller");
        return Ok(lower);
    }

    for step in 0..bounds.bisection_steps() {
        if upper - lower <= bounds.precision() {
            break;
        }
        let mid = lower + (upper - lower) / 2.0;
        if mid <= lower || mid >= upper {
            trace!(step, lower, upper, "bracket reached floating-point resolution");
            break;
        }
        let stationary = is_stationary_at(mid)?;
        trace!(lower, upper, mid, stationary, "bisection step");
        if stationary {
            upper = mid;
        } else {
            lower = mid;
        }
    }

    debug!(order = upper, width = upper - lower, "minimal stationary order found");
    Ok(upper)
}

/// Run [`find_minimal_order`] independently on every column of
/// `x` (`n_samples × n_features`).
///
/// Returns the orders aligned with the column order. The first error (from
/// validation or from the oracle) aborts the remaining columns.
pub fn find_minimal_orders<O>(
    x: ArrayView2<f64>, window: usize, mode: Mode, oracle: &O, significance: f64,
    bounds: &SearchBounds,
) -> SearchResult<Array1<f64>, O::Error>
where
    O: StationarityOracle + ?Sized,
{
    validate_series_len(x.nrows(), window, mode)?;
    let mut orders = Array1::<f64>::zeros(x.ncols());
    for (feature, column) in x.axis_iter(Axis(1)).enumerate() {
        orders[feature] = find_minimal_order(column, window, mode, oracle, significance, bounds)?;
        debug!(feature, order = orders[feature], "feature searched");
    }
    Ok(orders)
}

/// Data-parallel variant of [`find_minimal_orders`] over columns.
///
/// Columns are searched on the rayon pool and reassembled in column order.
/// Requires the oracle to be `Sync` and its error to be `Send`. When several
/// columns fail, which error is reported is unspecified.
#[cfg(feature = "parallel")]
pub fn find_minimal_orders_parallel<O>(
    x: ArrayView2<f64>, window: usize, mode: Mode, oracle: &O, significance: f64,
    bounds: &SearchBounds,
) -> SearchResult<Array1<f64>, O::Error>
where
    O: StationarityOracle + Sync + ?Sized,
    O::Error: Send,
{
    use rayon::prelude::*;

    validate_series_len(x.nrows(), window, mode)?;
    let orders: Vec<f64> = (0..x.ncols())
        .into_par_iter()
        .map(|feature| {
            find_minimal_order(x.column(feature), window, mode, oracle, significance, bounds)
        })
        .collect::<SearchResult<Vec<f64>, O::Error>>()?;
    Ok(Array1::from(orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stationarity::oracle::{from_fn, infallible};
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;
    use std::cell::{Cell, RefCell};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `SearchBounds` validation and defaults.
    // - Both short-circuit exits (NaN at upper, `lower` at lower) with exact
    //   oracle call counts.
    // - The precision bound on a bisected result.
    // - Propagation of oracle errors and pre-oracle validation failures.
    // - Per-column searches on a matrix.
    //
    // They intentionally DO NOT cover:
    // - Any real stationarity test; the oracle is synthetic.
    // -------------------------------------------------------------------------

    /// Threshold oracle on the lag-1 output of an impulse transform (= −d),
    /// recording every order it is asked about.
    struct ImpulseThreshold {
        threshold: f64,
        seen: RefCell<Vec<f64>>,
    }

    impl ImpulseThreshold {
        fn new(threshold: f64) -> Self {
            ImpulseThreshold { threshold, seen: RefCell::new(Vec::new()) }
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }
    }

    impl StationarityOracle for ImpulseThreshold {
        type Error = String;

        fn is_stationary(
            &self, series: ArrayView1<f64>, _significance: f64,
        ) -> Result<bool, String> {
            let d = -series[1];
            self.seen.borrow_mut().push(d);
            Ok(d >= self.threshold)
        }
    }

    fn impulse(n: usize) -> Array1<f64> {
        let mut x = Array1::<f64>::zeros(n);
        x[0] = 1.0;
        x
    }

    #[test]
    fn search_bounds_default_matches_documented_values() {
        let b = SearchBounds::default();
        assert_eq!((b.lower(), b.upper(), b.precision()), (0.0, 1.0, 0.01));
        assert_eq!(b.bisection_steps(), 7);
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed bounds are rejected rather than repaired.
    //
    // Given
    // -----
    // - Inverted bounds, an infinite bound, and non-positive precisions.
    //
    // Expect
    // ------
    // - `InvalidBounds` or `InvalidPrecision`; equal bounds are accepted.
    fn search_bounds_reject_malformed_ranges() {
        assert!(matches!(
            SearchBounds::new(1.0, 0.0, 0.01),
            Err(FracdiffError::InvalidBounds { .. })
        ));
        assert!(matches!(
            SearchBounds::new(0.0, f64::INFINITY, 0.01),
            Err(FracdiffError::InvalidBounds { .. })
        ));
        for precision in [0.0, -0.1, f64::NAN] {
            assert!(matches!(
                SearchBounds::new(0.0, 1.0, precision),
                Err(FracdiffError::InvalidPrecision { .. })
            ));
        }
        assert!(SearchBounds::new(0.4, 0.4, 0.01).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify the infeasible exit: an oracle that never accepts yields NaN
    // after a single call at the upper bound.
    //
    // Given
    // -----
    // - Threshold 2.0 above the default upper bound 1.0.
    //
    // Expect
    // ------
    // - Result is NaN; exactly one oracle call, at d = 1.0.
    fn infeasible_series_returns_nan_after_one_call() {
        // Arrange
        let x = impulse(6);
        let oracle = ImpulseThreshold::new(2.0);

        // Act
        let d = find_minimal_order(x.view(), 3, Mode::Full, &oracle, 0.05, &SearchBounds::default())
            .unwrap();

        // Assert
        assert!(d.is_nan());
        assert_eq!(oracle.calls(), 1);
        assert_eq!(oracle.seen.borrow()[0], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the already-stationary exit: two calls (upper, then lower) and
    // the lower bound returned unchanged.
    //
    // Given
    // -----
    // - Threshold 0.1 below lower = 0.2.
    //
    // Expect
    // ------
    // - Result is 0.2; oracle saw exactly [0.9, 0.2].
    fn stationary_lower_bound_returns_lower_after_two_calls() {
        let x = impulse(6);
        let oracle = ImpulseThreshold::new(0.1);
        let bounds = SearchBounds::new(0.2, 0.9, 0.01).unwrap();

        let d = find_minimal_order(x.view(), 3, Mode::Full, &oracle, 0.05, &bounds).unwrap();

        assert_eq!(d, 0.2);
        assert_eq!(oracle.calls(), 2);
        assert_abs_diff_eq!(oracle.seen.borrow()[0], 0.9, epsilon = 1e-15);
        assert_abs_diff_eq!(oracle.seen.borrow()[1], 0.2, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Check the bisection result and its precision guarantee.
    //
    // Given
    // -----
    // - Threshold 0.3, default bounds (0, 1, 0.01).
    //
    // Expect
    // ------
    // - Result 0.3046875 (upper end of the final interval).
    // - Result is accepted, result − precision is rejected.
    // - 2 + 7 oracle calls.
    fn bisection_returns_upper_end_within_precision() {
        // Arrange
        let x = impulse(6);
        let oracle = ImpulseThreshold::new(0.3);
        let bounds = SearchBounds::default();

        // Act
        let d = find_minimal_order(x.view(), 3, Mode::Full, &oracle, 0.05, &bounds).unwrap();

        // Assert
        assert_eq!(d, 0.3046875);
        assert!(d >= 0.3);
        assert!(d - bounds.precision() < 0.3);
        assert_eq!(oracle.calls(), 2 + bounds.bisection_steps());
    }

    #[test]
    fn fine_precision_bisection_converges_to_threshold() {
        let x = impulse(5);
        let oracle = ImpulseThreshold::new(0.62);
        let bounds = SearchBounds::new(0.0, 1.0, 1e-4).unwrap();

        let d = find_minimal_order(x.view(), 2, Mode::Full, &oracle, 0.05, &bounds).unwrap();

        assert!(d >= 0.62 && d - 0.62 <= 1e-4, "got {d}");
        assert_eq!(oracle.calls(), 2 + bounds.bisection_steps());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a precision finer than the float spacing near the threshold
    // still terminates, with a bounded number of oracle calls.
    //
    // Given
    // -----
    // - Threshold 0.3, bounds (0, 1) with precision 1e-20.
    //
    // Expect
    // ------
    // - The search returns an accepted order within a few ulps of 0.3.
    // - At most 2 + `bisection_steps()` oracle calls.
    fn sub_resolution_precision_terminates() {
        // Arrange
        let x = impulse(4);
        let oracle = ImpulseThreshold::new(0.3);
        let bounds = SearchBounds::new(0.0, 1.0, 1e-20).unwrap();

        // Act
        let d = find_minimal_order(x.view(), 2, Mode::Full, &oracle, 0.05, &bounds).unwrap();

        // Assert
        assert!(d >= 0.3 && d - 0.3 <= 1e-15, "got {d}");
        assert!(oracle.calls() <= 2 + bounds.bisection_steps(), "calls = {}", oracle.calls());
        assert!(bounds.bisection_steps() < 100);
    }

    #[test]
    fn midpoint_stays_finite_for_bounds_near_f64_max() {
        let lower = 0.6 * f64::MAX;
        let upper = 0.9 * f64::MAX;
        let threshold = 0.75 * f64::MAX;
        let x = impulse(3);
        let oracle = ImpulseThreshold::new(threshold);
        let bounds = SearchBounds::new(lower, upper, 1e300).unwrap();

        let d = find_minimal_order(x.view(), 2, Mode::Full, &oracle, 0.05, &bounds).unwrap();

        assert!(d.is_finite() && d >= threshold && d <= upper, "got {d}");
        assert!(oracle.seen.borrow().iter().all(|v| v.is_finite()));
        assert!(matches!(
            SearchBounds::new(-f64::MAX, f64::MAX, 1.0),
            Err(FracdiffError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn valid_mode_oracle_receives_trimmed_series() {
        let x = impulse(5);
        let lengths = RefCell::new(Vec::new());
        let oracle = infallible(|y: ArrayView1<f64>, _alpha: f64| {
            lengths.borrow_mut().push(y.len());
            true
        });

        let d = find_minimal_order(x.view(), 2, Mode::Valid, &oracle, 0.05, &SearchBounds::default())
            .unwrap();

        assert_eq!(d, 0.0);
        assert_eq!(*lengths.borrow(), vec![4, 4]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an oracle error aborts the search and is returned unchanged.
    //
    // Given
    // -----
    // - An oracle that accepts at the upper bound, then fails.
    //
    // Expect
    // ------
    // - `SearchError::Oracle("lag selection failed")` after two calls.
    fn oracle_error_propagates_unchanged() {
        let x = impulse(6);
        let calls = Cell::new(0usize);
        let oracle = from_fn(|_y: ArrayView1<f64>, _alpha: f64| -> Result<bool, &'static str> {
            calls.set(calls.get() + 1);
            if calls.get() == 1 { Ok(true) } else { Err("lag selection failed") }
        });

        let result =
            find_minimal_order(x.view(), 3, Mode::Full, &oracle, 0.05, &SearchBounds::default());

        assert_eq!(result, Err(SearchError::Oracle("lag selection failed")));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalid_inputs_fail_before_any_oracle_call() {
        let oracle = ImpulseThreshold::new(0.3);
        let bounds = SearchBounds::default();
        let x = impulse(3);

        let bad_level = find_minimal_order(x.view(), 2, Mode::Full, &oracle, 1.5, &bounds);
        assert!(matches!(
            bad_level,
            Err(SearchError::Fracdiff(FracdiffError::InvalidSignificance { .. }))
        ));

        let short = find_minimal_order(x.view(), 4, Mode::Valid, &oracle, 0.05, &bounds);
        assert_eq!(
            short,
            Err(SearchError::Fracdiff(FracdiffError::InsufficientData { needed: 4, got: 3 }))
        );

        let no_window = find_minimal_order(x.view(), 0, Mode::Full, &oracle, 0.05, &bounds);
        assert_eq!(no_window, Err(SearchError::Fracdiff(FracdiffError::InvalidWindow { window: 0 })));

        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that each column is searched independently and results keep
    // the column order.
    //
    // Given
    // -----
    // - Three impulse columns scaled by 1, 2, and 4, and an oracle that
    //   accepts when −y[1] / y[0] >= 0.3 only for the first two columns
    //   (the third is judged non-stationary everywhere).
    //
    // Expect
    // ------
    // - Orders [0.3046875, 0.3046875, NaN].
    fn per_column_search_preserves_feature_order() {
        let mut x = Array2::<f64>::zeros((6, 3));
        x[[0, 0]] = 1.0;
        x[[0, 1]] = 2.0;
        x[[0, 2]] = 4.0;
        let oracle = infallible(|y: ArrayView1<f64>, _alpha: f64| {
            y[0] < 3.0 && -y[1] / y[0] >= 0.3
        });

        let orders =
            find_minimal_orders(x.view(), 3, Mode::Full, &oracle, 0.05, &SearchBounds::default())
                .unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0], 0.3046875);
        assert_eq!(orders[1], 0.3046875);
        assert!(orders[2].is_nan());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_search_matches_sequential_search() {
        let x = Array2::from_shape_fn((8, 5), |(i, j)| if i == 0 { 1.0 + j as f64 } else { 0.0 });
        let oracle = infallible(|y: ArrayView1<f64>, _alpha: f64| -y[1] / y[0] >= 0.45);
        let bounds = SearchBounds::default();
        let seq = find_minimal_orders(x.view(), 3, Mode::Full, &oracle, 0.05, &bounds).unwrap();
        let par =
            find_minimal_orders_parallel(x.view(), 3, Mode::Full, &oracle, 0.05, &bounds).unwrap();
        assert_eq!(seq, par);
    }
}
