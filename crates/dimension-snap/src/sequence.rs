use crate::error::SnapError;
use crate::magnitude::{normalize, pow10, PRECISION_VALUE};
use log::debug;
use serde::{Deserialize, Serialize};

/// How close a mantissa may be to a table entry and still count as "on" it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Fraction of the mantissa, e.g. `0.02` for 2%.
    Relative(f64),
    /// Fixed offset in mantissa units.
    Absolute(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// An ascending table of "nice" mantissas for one decade, plus the
/// tolerance used to scan it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredSequence {
    values: &'static [f64],
    tolerance: Tolerance,
}

/// 0.5 / 1 / 2 / 5 / 10 with an absolute tolerance.
pub const COARSE: PreferredSequence = PreferredSequence {
    values: &[0.5, 1.0, 2.0, 5.0, 10.0],
    tolerance: Tolerance::Absolute(PRECISION_VALUE),
};

/// Finer engineering table with a 2% relative tolerance.
pub const DENSE: PreferredSequence = PreferredSequence {
    values: &[
        10.0 / 12.0,
        1.0,
        10.0 / 6.0,
        2.0,
        2.5,
        100.0 / 24.0,
        5.0,
        100.0 / 12.0,
        10.0,
    ],
    tolerance: Tolerance::Relative(0.02),
};

/// Named choice between the built-in tables, as stored in settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    #[default]
    Coarse,
    Dense,
}

impl SequenceKind {
    pub fn sequence(self) -> &'static PreferredSequence {
        match self {
            SequenceKind::Coarse => &COARSE,
            SequenceKind::Dense => &DENSE,
        }
    }
}

impl PreferredSequence {
    /// Build a custom table. Entries must be positive, finite and strictly
    /// ascending, and there must be at least one.
    pub fn new(values: &'static [f64], tolerance: Tolerance) -> Result<Self, SnapError> {
        if values.is_empty() {
            return Err(SnapError::InvalidSequence("table is empty".to_string()));
        }
        if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(SnapError::InvalidSequence(format!(
                "entries must be positive: {values:?}"
            )));
        }
        if !values.windows(2).all(|w| w[0] < w[1]) {
            return Err(SnapError::InvalidSequence(format!(
                "entries must be strictly ascending: {values:?}"
            )));
        }
        let (Tolerance::Relative(eps) | Tolerance::Absolute(eps)) = tolerance;
        if !eps.is_finite() || eps < 0.0 {
            return Err(SnapError::InvalidSequence(format!("bad tolerance {eps}")));
        }
        Ok(Self { values, tolerance })
    }

    pub fn values(&self) -> &'static [f64] {
        self.values
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn widen(&self, mantissa: f64, direction: Direction) -> f64 {
        match (self.tolerance, direction) {
            (Tolerance::Relative(eps), Direction::Next) => mantissa * (1.0 + eps),
            (Tolerance::Relative(eps), Direction::Previous) => mantissa * (1.0 - eps),
            (Tolerance::Absolute(eps), Direction::Next) => mantissa + eps,
            (Tolerance::Absolute(eps), Direction::Previous) => mantissa - eps,
        }
    }

    /// First entry strictly beyond `threshold` in `direction`.
    fn scan(&self, threshold: f64, direction: Direction) -> Option<f64> {
        match direction {
            Direction::Next => self.values.iter().copied().find(|&v| v > threshold),
            Direction::Previous => self.values.iter().rev().copied().find(|&v| v < threshold),
        }
    }

    /// Move `value` to the next or previous member of this table.
    ///
    /// The value is normalized to one decade and the table is scanned with
    /// the tolerance, so a value on (or very near) an entry moves off it.
    /// Running off either end continues in the adjacent decade, so `Next`
    /// returns something larger and `Previous` something smaller. A table
    /// too narrow to match even there stops at its boundary entry.
    pub fn step(&self, value: f64, direction: Direction) -> Result<f64, SnapError> {
        let (mantissa, exp) = normalize(value)?;
        let threshold = self.widen(mantissa, direction);

        let (entry, exp) = match self.scan(threshold, direction) {
            Some(entry) => (entry, exp),
            None => {
                let (shift, boundary) = match direction {
                    Direction::Next => (1, self.values.last()),
                    Direction::Previous => (-1, self.values.first()),
                };
                debug!("{value} is past the table end, continuing in decade {}", exp + shift);
                let entry = self
                    .scan(threshold / pow10(shift), direction)
                    .or(boundary.copied())
                    .ok_or_else(|| SnapError::InvalidSequence("table is empty".to_string()))?;
                (entry, exp + shift)
            }
        };

        let stepped = entry * pow10(exp);
        debug!("step {value} {direction:?} -> {stepped}");
        Ok(stepped)
    }
}

/// Step with one of the built-in tables.
pub fn step(value: f64, direction: Direction, kind: SequenceKind) -> Result<f64, SnapError> {
    kind.sequence().step(value, direction)
}
