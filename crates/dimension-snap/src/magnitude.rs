use crate::error::SnapError;

/// Absolute tolerance used for "is this float equal to that one" checks.
pub const PRECISION_VALUE: f64 = 1e-4;

/// Compare two floats with the absolute [`PRECISION_VALUE`] tolerance.
pub fn floats_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < PRECISION_VALUE
}

/// Exact power of ten for the exponents dimension values can reach.
///
/// Negative exponents divide instead of multiplying by an inexact `0.1`,
/// so `pow10(-3)` is the same float as the literal `0.001`.
pub fn pow10(exp: i32) -> f64 {
    if exp >= 0 {
        10f64.powi(exp)
    } else {
        1.0 / 10f64.powi(-exp)
    }
}

/// Base-10 exponent of the leading digit: `1 <= x / 10^e < 10`.
///
/// The raw `log10` is only a first guess; it is corrected against exact
/// powers of ten so `magnitude_exponent(1000.0)` is 3 and never 2.
pub fn magnitude_exponent(x: f64) -> Result<i32, SnapError> {
    if !x.is_finite() || x <= 0.0 {
        return Err(SnapError::NonPositiveValue(x));
    }

    let mut exp = x.log10().floor() as i32;
    while pow10(exp) > x {
        exp -= 1;
    }
    while pow10(exp + 1) <= x {
        exp += 1;
    }
    Ok(exp)
}

/// Split a positive value into `(mantissa, exponent)` with the mantissa in `[1, 10)`.
pub fn normalize(x: f64) -> Result<(f64, i32), SnapError> {
    let exp = magnitude_exponent(x)?;
    Ok((x / pow10(exp), exp))
}
