//! Checked integer arithmetic for counts and coefficients.

use crate::error::{Error, Result};

/// Safety bound on every intermediate and final magnitude: 2^53, the largest
/// integer range exactly representable in the coefficient-display path.
pub const MAX_MAGNITUDE: i64 = 1 << 53;

fn check(value: i64) -> Result<i64> {
    if value.unsigned_abs() >= MAX_MAGNITUDE as u64 {
        return Err(Error::Overflow);
    }
    Ok(value)
}

pub fn checked_add(x: i64, y: i64) -> Result<i64> {
    x.checked_add(y).ok_or(Error::Overflow).and_then(check)
}

pub fn checked_mul(x: i64, y: i64) -> Result<i64> {
    x.checked_mul(y).ok_or(Error::Overflow).and_then(check)
}

/// Parses a digit run, rejecting values at or above the safety bound.
pub fn parse_int(digits: &str) -> Result<i64> {
    digits
        .parse::<i64>()
        .map_err(|_| Error::Overflow)
        .and_then(check)
}

/// Greatest common divisor of the absolute values; `gcd(0, 0) == 0`.
pub fn gcd(x: i64, y: i64) -> i64 {
    let (mut x, mut y) = (x.abs(), y.abs());
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x
}
