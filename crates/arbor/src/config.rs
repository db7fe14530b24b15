//! Engine configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::Size,
};

/// Tunables for the router and layout passes.
///
/// Every field has a default, so a config file only needs the values it changes:
///
/// ```toml
/// display_width = 1280.0
/// display_height = 720.0
/// long_press_duration = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Display width in pixels.
    pub display_width: f32,
    /// Display height in pixels. Host pointer coordinates are flipped against this.
    pub display_height: f32,
    /// Seconds a press must be held before a long-press fires.
    pub long_press_duration: f32,
    /// Seconds after a consumed press during which a second press becomes a double-click.
    pub double_click_duration: f32,
    /// Snap stacked and grid layout sizes to whole pixels.
    pub snap_to_pixels: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_width: 800.0,
            display_height: 600.0,
            long_press_duration: 0.5,
            double_click_duration: 0.5,
            snap_to_pixels: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check that durations are positive and the display size is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("long_press_duration", self.long_press_duration),
            ("double_click_duration", self.double_click_duration),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {v}")));
            }
        }
        for (name, v) in [
            ("display_width", self.display_width),
            ("display_height", self.display_height),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::Config(format!("{name} must not be negative, got {v}")));
            }
        }
        Ok(())
    }

    /// The display size.
    pub fn display_size(&self) -> Size {
        Size::new(self.display_width, self.display_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() -> Result<()> {
        let c = EngineConfig::from_toml_str("display_height = 720.0\nsnap_to_pixels = false\n")?;
        assert_eq!(c.display_height, 720.0);
        assert!(!c.snap_to_pixels);
        assert_eq!(c.display_width, 800.0);
        assert_eq!(c.long_press_duration, 0.5);
        assert_eq!(c.double_click_duration, 0.5);
        Ok(())
    }

    #[test]
    fn rejects_bad_values() -> Result<()> {
        assert!(matches!(
            EngineConfig::from_toml_str("long_press_duration = 0.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("display_width = -1.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("no_such_key = 1"),
            Err(Error::Config(_))
        ));
        Ok(())
    }
}
