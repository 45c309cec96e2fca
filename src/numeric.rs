//! Numeric helpers for rule transforms.
//!
//! Percentage scaling is done in integer arithmetic so that
//! `ceil(value * factor)` is exact. `50 × 110%` is `55`, never `56`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A multiplicative factor expressed in whole percent.
///
/// `Scale::percent(110)` is a factor of `1.10`.
///
/// # Examples
///
/// ```rust
/// use ascension::numeric::Scale;
///
/// let scale = Scale::percent(110);
/// assert_eq!(scale.apply_ceil(50), Some(55));
/// assert_eq!(scale.apply_ceil(101), Some(112)); // 111.1 rounds up
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scale {
    percent: u32,
}

impl Scale {
    /// Identity factor (×1.00).
    pub const IDENTITY: Scale = Scale { percent: 100 };

    /// Create a factor from whole percent.
    pub const fn percent(percent: u32) -> Self {
        Self { percent }
    }

    /// Get the factor in whole percent.
    pub fn as_percent(self) -> u32 {
        self.percent
    }

    /// Get the factor as a float, for display only.
    pub fn as_f64(self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    /// Scale `value` and round up.
    ///
    /// Returns `None` if the result does not fit in an `i32`.
    pub fn apply_ceil(self, value: i32) -> Option<i32> {
        let scaled = i64::from(value) * i64::from(self.percent);
        i32::try_from(ceil_div(scaled, 100)).ok()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "×{:.2}", self.as_f64())
    }
}

/// Ceiling division for a positive divisor.
fn ceil_div(numerator: i64, divisor: i64) -> i64 {
    (numerator + divisor - 1).div_euclid(divisor)
}

/// Add a flat amount, returning `None` on overflow.
pub fn add_flat(value: i32, amount: i32) -> Option<i32> {
    value.checked_add(amount)
}
