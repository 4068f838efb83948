use crate::angle::format_angle;
use crate::error::SnapError;
use crate::rounding::{localize, round_to_multiple_str, RoundMode};
use crate::settings::Settings;

/// Turns nominal dimension values into the text written on the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionFormatter {
    pub multiple: f64,
    pub bias: f64,
    pub use_dms: bool,
    pub decimal_separator: char,
}

impl DimensionFormatter {
    pub fn new(settings: &Settings, mode: RoundMode) -> Self {
        Self {
            multiple: settings.multiple,
            bias: mode.bias(),
            use_dms: settings.is_angle_dms,
            decimal_separator: settings.decimal_separator,
        }
    }

    pub fn format(&self, nominal: f64, is_angle: bool) -> Result<String, SnapError> {
        let text = if is_angle {
            format_angle(nominal, self.multiple, self.bias, self.use_dms)?
        } else {
            round_to_multiple_str(nominal, self.multiple, self.bias)?
        };
        Ok(localize(&text, self.decimal_separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(multiple: f64, mode: RoundMode, use_dms: bool) -> DimensionFormatter {
        let settings = Settings {
            multiple,
            is_angle_dms: use_dms,
            ..Settings::default()
        };
        DimensionFormatter::new(&settings, mode)
    }

    #[test]
    fn test_length_uses_separator() {
        let f = formatter(0.5, RoundMode::Nearest, true);
        assert_eq!(f.format(12.3, false).unwrap(), "12,5");
        assert_eq!(f.format(12.2, false).unwrap(), "12");
    }

    #[test]
    fn test_angles() {
        assert_eq!(
            formatter(0.5, RoundMode::Down, true).format(30.7, true).unwrap(),
            "30°30'"
        );
        assert_eq!(
            formatter(0.1, RoundMode::Up, false).format(30.71, true).unwrap(),
            "30,8°"
        );
    }

    #[test]
    fn test_negative_length_is_rejected() {
        let f = formatter(1.0, RoundMode::Nearest, true);
        assert!(matches!(f.format(-3.0, false), Err(SnapError::InvalidValue(_))));
    }
}
