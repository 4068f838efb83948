use crate::error::SnapError;
use crate::magnitude::pow10;
use log::debug;
use serde::{Deserialize, Serialize};

/// Absolute slack under which a quotient counts as a whole number of multiples.
const QUOTIENT_EPSILON: f64 = 1e-9;

/// Rounding error of `value / multiple`, in ULPs, tolerated for large quotients.
const QUOTIENT_ULPS: f64 = 4.0;

/// Most decimals a rounded value is printed with.
const MAX_DECIMALS: i32 = 9;

/// The three rounding buttons: floor, nearest (ties up) and ceil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    Down,
    #[default]
    Nearest,
    Up,
}

impl RoundMode {
    pub fn bias(self) -> f64 {
        match self {
            RoundMode::Down => 0.0,
            RoundMode::Nearest => 0.5,
            RoundMode::Up => 1.0,
        }
    }
}

/// True when `x` is an integer up to division noise. The slack never exceeds
/// a few ULPs of `x`, so real remainders survive at any magnitude.
fn is_whole(x: f64) -> bool {
    let slack = QUOTIENT_EPSILON.max(QUOTIENT_ULPS * f64::EPSILON * x.abs());
    (x - x.round()).abs() <= slack
}

fn check_multiple(multiple: f64) -> Result<(), SnapError> {
    if !multiple.is_finite() || multiple <= 0.0 {
        return Err(SnapError::InvalidMultiple(multiple));
    }
    Ok(())
}

fn check_bias(bias: f64) -> Result<(), SnapError> {
    if !(0.0..=1.0).contains(&bias) {
        return Err(SnapError::BiasOutOfRange(bias));
    }
    Ok(())
}

/// Round a non-negative value to a multiple of `multiple`.
///
/// `bias` is the pull towards the larger multiple: 0 floors, 1 ceils and
/// 0.5 rounds to nearest with ties going up. A value already sitting on a
/// multiple is returned unchanged whatever the bias.
pub fn round_to_multiple(value: f64, multiple: f64, bias: f64) -> Result<f64, SnapError> {
    if value < 0.0 {
        return Err(SnapError::InvalidValue(value));
    }
    round_signed_to_multiple(value, multiple, bias)
}

/// Same as [`round_to_multiple`] but also accepts negative values.
///
/// Negative quotients still floor towards negative infinity, so `Down`
/// moves -30.5 to -31 and `Nearest` moves it to -30.
pub fn round_signed_to_multiple(value: f64, multiple: f64, bias: f64) -> Result<f64, SnapError> {
    if !value.is_finite() {
        return Err(SnapError::InvalidValue(value));
    }
    check_multiple(multiple)?;
    check_bias(bias)?;

    let quotient = value / multiple;
    if is_whole(quotient) {
        return Ok(quotient.round() * multiple);
    }

    let lower = quotient.floor();
    let frac = quotient - lower;
    let count = if frac < 1.0 - bias { lower } else { lower + 1.0 };
    let rounded = count * multiple;
    debug!("round {value} to multiple {multiple} (bias {bias}) -> {rounded}");
    Ok(rounded)
}

/// Decimals needed to print multiples of `multiple` without noise.
fn decimals_for(multiple: f64) -> usize {
    for places in 0..MAX_DECIMALS {
        if is_whole(multiple * pow10(places)) {
            return places as usize;
        }
    }
    MAX_DECIMALS as usize
}

/// Print a rounded value with '.' as separator and no insignificant zeros.
pub fn format_rounded(value: f64, multiple: f64) -> String {
    let places = decimals_for(multiple);
    let mut text = format!("{value:.places$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// [`round_to_multiple`] followed by [`format_rounded`].
pub fn round_to_multiple_str(value: f64, multiple: f64, bias: f64) -> Result<String, SnapError> {
    let rounded = round_to_multiple(value, multiple, bias)?;
    Ok(format_rounded(rounded, multiple))
}

/// [`round_signed_to_multiple`] followed by [`format_rounded`].
pub fn round_signed_to_multiple_str(
    value: f64,
    multiple: f64,
    bias: f64,
) -> Result<String, SnapError> {
    let rounded = round_signed_to_multiple(value, multiple, bias)?;
    Ok(format_rounded(rounded, multiple))
}

/// Swap the canonical '.' for the drawing's decimal separator.
pub fn localize(text: &str, separator: char) -> String {
    text.replace('.', separator.encode_utf8(&mut [0; 4]))
}
