use crate::error::SnapError;
use crate::magnitude::floats_equal;
use crate::rounding::{round_signed_to_multiple, round_signed_to_multiple_str};
use std::fmt;
use std::str::FromStr;

pub const DEGREE_SIGN: char = '°';

const ARC_SECONDS_PER_DEGREE: f64 = 3600.0;

/// Largest degree count whose arc-second total still fits an `i64`.
pub const MAX_DEGREES: u64 = (i64::MAX as u64 - 3599) / 3600;

/// An angle split into whole degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u64,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    pub fn from_arc_seconds(total: i64) -> Self {
        let abs = total.unsigned_abs();
        Self {
            negative: total < 0,
            degrees: abs / 3600,
            minutes: ((abs / 60) % 60) as u32,
            seconds: (abs % 60) as u32,
        }
    }

    /// Signed total in arc-seconds, or `None` when it does not fit an `i64`.
    pub fn to_arc_seconds(&self) -> Option<i64> {
        let abs = self
            .degrees
            .checked_mul(3600)?
            .checked_add(u64::from(self.minutes).checked_mul(60)?)?
            .checked_add(u64::from(self.seconds))?;
        let abs = i64::try_from(abs).ok()?;
        Some(if self.negative { -abs } else { abs })
    }

    pub fn to_degrees(&self) -> f64 {
        let abs = self.degrees as f64
            + f64::from(self.minutes) / 60.0
            + f64::from(self.seconds) / ARC_SECONDS_PER_DEGREE;
        if self.negative {
            -abs
        } else {
            abs
        }
    }
}

/// Drawing notation: `-30°30'15"`, zero minutes and seconds omitted.
///
/// The sign is written on the degree term only, so an angle with zero whole
/// degrees prints without it (`-0.5°` prints as `0°30'`).
impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative && self.degrees != 0 {
            f.write_str("-")?;
        }
        write!(f, "{}{DEGREE_SIGN}", self.degrees)?;
        if self.minutes != 0 {
            write!(f, "{}'", self.minutes)?;
        }
        if self.seconds != 0 {
            write!(f, "{}\"", self.seconds)?;
        }
        Ok(())
    }
}

impl FromStr for Dms {
    type Err = SnapError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let err = || SnapError::ParseError(format!("not a DMS angle: {text:?}"));

        let (negative, rest) = match text.trim().strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.trim()),
        };
        let (degrees, rest) = rest.split_once(DEGREE_SIGN).ok_or_else(err)?;
        let degrees: u64 = degrees.parse().map_err(|_| err())?;
        if degrees > MAX_DEGREES {
            return Err(SnapError::ParseError(format!("angle out of range: {text:?}")));
        }

        let (minutes, rest) = match rest.split_once('\'') {
            Some((minutes, rest)) => (minutes.parse::<u32>().map_err(|_| err())?, rest),
            None => (0, rest),
        };
        let seconds = match rest.strip_suffix('"') {
            Some(seconds) => seconds.parse::<u32>().map_err(|_| err())?,
            None if rest.is_empty() => 0,
            None => return Err(err()),
        };
        if minutes >= 60 || seconds >= 60 {
            return Err(err());
        }

        Ok(Self {
            negative,
            degrees,
            minutes,
            seconds,
        })
    }
}

/// Round an angle given in degrees and render it as dimension text.
///
/// Decimal mode rounds the degrees directly and appends `°`. DMS mode
/// rounds in arc-seconds (`value * 3600` to `multiple * 3600`) and then
/// splits the whole number of seconds. Both use '.' as decimal separator.
pub fn format_angle(
    value_degrees: f64,
    multiple: f64,
    bias: f64,
    use_dms: bool,
) -> Result<String, SnapError> {
    if !use_dms {
        let text = round_signed_to_multiple_str(value_degrees, multiple, bias)?;
        return Ok(format!("{text}{DEGREE_SIGN}"));
    }

    if floats_equal(value_degrees, 0.0) {
        return Ok(format!("0{DEGREE_SIGN}"));
    }

    let total = round_signed_to_multiple(
        value_degrees * ARC_SECONDS_PER_DEGREE,
        multiple * ARC_SECONDS_PER_DEGREE,
        bias,
    )?;
    Ok(Dms::from_arc_seconds(total.round() as i64).to_string())
}
