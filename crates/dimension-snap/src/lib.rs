pub mod angle;
pub mod annotation;
pub mod error;
pub mod format;
pub mod magnitude;
pub mod rounding;
pub mod sequence;
pub mod settings;
pub mod toggle;

pub use angle::{format_angle, Dms};
pub use annotation::DimensionSign;
pub use error::SnapError;
pub use format::DimensionFormatter;
pub use magnitude::magnitude_exponent;
pub use rounding::{round_to_multiple, round_to_multiple_str, RoundMode};
pub use sequence::{step, Direction, PreferredSequence, SequenceKind};
pub use settings::Settings;
pub use toggle::{next_arrow_state, next_extension_line_state, PairState};

/// Which decoration cycle a toggle request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    ExtensionLines,
    Arrows,
}

/// Parse the text of a multiple field, falling back to 1 when it is not a
/// usable positive number.
pub fn parse_multiple(text: &str, decimal_separator: char) -> f64 {
    let normalized = text.trim().replace(decimal_separator, ".");
    match normalized.parse::<f64>() {
        Ok(m) if m.is_finite() && m > 0.0 => m,
        _ => {
            log::warn!("cannot use {text:?} as a multiple, falling back to 1");
            1.0
        }
    }
}

/// Parse a nominal value typed by the user: a plain number (with either
/// separator) or a DMS angle such as `-30°30'`. The flag is true for DMS
/// input, which is always an angle.
pub fn parse_nominal(text: &str, decimal_separator: char) -> Result<(f64, bool), SnapError> {
    let trimmed = text.trim();
    if trimmed.contains(angle::DEGREE_SIGN) {
        let dms: Dms = trimmed.parse()?;
        return Ok((dms.to_degrees(), true));
    }
    let value: f64 = trimmed
        .replace(decimal_separator, ".")
        .parse()
        .map_err(|_| SnapError::ParseError(format!("not a number: {text:?}")))?;
    if !value.is_finite() {
        return Err(SnapError::InvalidValue(value));
    }
    Ok((value, false))
}

/// Next packed state for the given decoration.
pub fn next_decoration_state(decoration: Decoration, current: PairState) -> PairState {
    match decoration {
        Decoration::ExtensionLines => next_extension_line_state(current),
        Decoration::Arrows => next_arrow_state(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple() {
        assert_eq!(parse_multiple("0,5", ','), 0.5);
        assert_eq!(parse_multiple(" 2.5 ", ','), 2.5);
        assert_eq!(parse_multiple("0.25", '.'), 0.25);
        assert_eq!(parse_multiple("abc", ','), 1.0);
        assert_eq!(parse_multiple("-3", ','), 1.0);
        assert_eq!(parse_multiple("0", ','), 1.0);
    }

    #[test]
    fn test_parse_nominal() {
        assert_eq!(parse_nominal("12,5", ',').unwrap(), (12.5, false));
        assert_eq!(parse_nominal("-3.25", ',').unwrap(), (-3.25, false));
        assert_eq!(parse_nominal(" 7 ", '.').unwrap(), (7.0, false));

        let (degrees, is_dms) = parse_nominal("-30°30'", ',').unwrap();
        assert!(is_dms);
        assert_eq!(degrees, -30.5);
        assert_eq!(parse_nominal("45°", '.').unwrap(), (45.0, true));

        assert!(matches!(
            parse_nominal("abc", ','),
            Err(SnapError::ParseError(_))
        ));
        assert!(parse_nominal("30°61'", ',').is_err());
        assert!(parse_nominal("inf", '.').is_err());
    }

    #[test]
    fn test_next_decoration_state() {
        let both = PairState::new(0b11);
        assert_eq!(
            next_decoration_state(Decoration::ExtensionLines, both).bits(),
            0b10
        );
        assert_eq!(next_decoration_state(Decoration::Arrows, both).bits(), 0b00);
    }
}
