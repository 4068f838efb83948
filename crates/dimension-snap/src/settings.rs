use crate::error::SnapError;
use crate::sequence::SequenceKind;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Engine parameters the drawing front end keeps between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Render angles as degrees/minutes/seconds instead of decimal degrees.
    #[serde(rename = "is_angle_DMS")]
    pub is_angle_dms: bool,
    /// Rounding step, in drawing units or degrees.
    pub multiple: f64,
    pub decimal_separator: char,
    /// Table used for wheel stepping of the multiple.
    pub sequence: SequenceKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_angle_dms: true,
            multiple: 1.0,
            decimal_separator: ',',
            sequence: SequenceKind::Coarse,
        }
    }
}

impl Settings {
    /// Parse settings JSON, keeping defaults for missing or ill-typed keys.
    pub fn from_json_str(text: &str) -> Result<Self, SnapError> {
        let root: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&root))
    }

    /// Pick known keys out of a JSON object. Anything unusable falls back
    /// to its default with a warning; unknown keys are ignored.
    pub fn from_value(root: &Value) -> Self {
        let mut settings = Self::default();
        if !root.is_object() {
            warn!("settings root is not a JSON object, using defaults");
            return settings;
        }

        if let Some(v) = root.get("is_angle_DMS") {
            match v.as_bool() {
                Some(b) => settings.is_angle_dms = b,
                None => warn!("settings: is_angle_DMS must be a bool, got {v}"),
            }
        }

        if let Some(v) = root.get("multiple") {
            match v.as_f64() {
                Some(m) if m.is_finite() && m > 0.0 => settings.multiple = m,
                _ => warn!("settings: multiple must be a positive number, got {v}"),
            }
        }

        if let Some(v) = root.get("decimal_separator") {
            let mut chars = v.as_str().unwrap_or("").chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => settings.decimal_separator = c,
                _ => warn!("settings: decimal_separator must be one character, got {v}"),
            }
        }

        if let Some(v) = root.get("sequence") {
            match serde_json::from_value::<SequenceKind>(v.clone()) {
                Ok(kind) => settings.sequence = kind,
                Err(e) => warn!("settings: bad sequence {v}: {e}"),
            }
        }

        settings
    }

    /// Load settings from a file. A missing file gives the defaults; a file
    /// that is not valid JSON is reported and also gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SnapError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        match Self::from_json_str(&text) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("{}: {e}; using the default config", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dimension-snap-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.is_angle_dms);
        assert_eq!(settings.multiple, 1.0);
        assert_eq!(settings.decimal_separator, ',');
        assert_eq!(settings.sequence, SequenceKind::Coarse);
    }

    #[test]
    fn test_parse_all_keys() {
        let settings = Settings::from_json_str(
            r#"{"is_angle_DMS": false, "multiple": 0.5, "decimal_separator": ".", "sequence": "dense"}"#,
        )
        .unwrap();
        assert!(!settings.is_angle_dms);
        assert_eq!(settings.multiple, 0.5);
        assert_eq!(settings.decimal_separator, '.');
        assert_eq!(settings.sequence, SequenceKind::Dense);
    }

    #[test]
    fn test_bad_fields_fall_back() {
        let settings = Settings::from_json_str(
            r#"{"is_angle_DMS": "yes", "multiple": -2, "decimal_separator": ",,", "sequence": "fine", "icon_size": 24}"#,
        )
        .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_non_object_root() {
        assert_eq!(Settings::from_json_str("[1, 2]").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json_str("{not json"),
            Err(SnapError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_dir("missing").join("cfg.json");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir("save");
        let path = dir.join("cfg.json");
        let settings = Settings {
            is_angle_dms: false,
            multiple: 2.5,
            decimal_separator: '.',
            sequence: SequenceKind::Dense,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
