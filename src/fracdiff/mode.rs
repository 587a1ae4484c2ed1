//! Boundary mode and window policy for the windowed convolution.
//!
//! - [`Mode`] decides output length and how the start of the series is handled.
//! - [`WindowPolicy`] names how the coefficient window is applied; only the
//!   fixed window is implemented.
//!
//! Both parse from and display as the lowercase names used by the Python
//! bindings (`"full"`, `"valid"`, `"fixed"`).
use crate::fracdiff::errors::{FracdiffError, FracdiffResult};
use std::{fmt, str::FromStr};

/// Boundary policy of the truncated convolution.
///
/// - `Full`: output has the input's length; the first `window - 1` outputs
///   use a shrinking prefix of the coefficients (causal, no padding).
/// - `Valid`: output has length `n - window + 1`; every output uses all
///   `window` coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Full,
    Valid,
}

impl Mode {
    /// Lowercase name used by `Display` and `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Valid => "valid",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FracdiffError;

    fn from_str(s: &str) -> FracdiffResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Mode::Full),
            "valid" => Ok(Mode::Valid),
            _ => Err(FracdiffError::UnknownMode { name: s.to_string() }),
        }
    }
}

/// How the coefficient window is applied along the series.
///
/// Only `Fixed` exists: every output is evaluated with the operator
/// truncated to `window` terms. `"expanding"` is recognized when parsing but
/// rejected with [`FracdiffError::UnsupportedWindowPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    #[default]
    Fixed,
}

impl WindowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPolicy::Fixed => "fixed",
        }
    }
}

impl fmt::Display for WindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowPolicy {
    type Err = FracdiffError;

    fn from_str(s: &str) -> FracdiffResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(WindowPolicy::Fixed),
            "expanding" => Err(FracdiffError::UnsupportedWindowPolicy { name: s.to_string() }),
            _ => Err(FracdiffError::UnknownWindowPolicy { name: s.to_string() }),
        }
    }
}
