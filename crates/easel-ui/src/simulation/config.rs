use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use easel_engine::input::Key;
use easel_engine::logging::LoggingConfig;
use easel_engine::paint::Color;
use easel_engine::platform::WindowConfig;

use super::error::ConfigError;
use crate::theme;

pub const MAX_DIMENSION: u32 = 16_384;
pub const MAX_FPS: u32 = 1_000;

/// Logger settings carried in the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `env_logger` filter, e.g. `"info,easel_ui=debug"`. Falls back to `RUST_LOG`.
    pub filter: Option<String>,
}

impl LogSettings {
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

/// Simulation window and loop settings.
///
/// ```toml
/// width = 800
/// height = 600
/// target_fps = 60
/// title = "Pinball"
/// background = [135, 206, 235]
/// pause_key = "P"
///
/// [logging]
/// filter = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    pub title: String,
    pub background: Color,
    /// TTF/OTF font for all UI text. Without one, text is not drawn.
    pub font_path: Option<PathBuf>,
    /// Toggles pause. `None` disables the shortcut.
    pub pause_key: Option<Key>,
    /// Ends the simulation. `None` disables the shortcut.
    pub quit_key: Option<Key>,
    pub logging: LogSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            target_fps: 60,
            title: "Simulation".to_string(),
            background: theme::BACKGROUND,
            font_path: None,
            pause_key: Some(Key::P),
            quit_key: Some(Key::Escape),
            logging: LogSettings::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(width: u32, height: u32, target_fps: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            target_fps,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |v: u32| (1..=MAX_DIMENSION).contains(&v);
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(ConfigError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=MAX_FPS).contains(&self.target_fps) {
            return Err(ConfigError::InvalidFrameRate(self.target_fps));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(())
    }

    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = SimulationConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!((c.width, c.height, c.target_fps), (800, 600, 60));
        assert_eq!(c.background, Color::rgb(135, 206, 235));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn zero_sizes_are_rejected() {
        let c = SimulationConfig::new(0, 600, 60, "x");
        assert!(matches!(c.validate(), Err(ConfigError::InvalidDimension { width: 0, .. })));
        let c = SimulationConfig::new(800, 0, 60, "x");
        assert!(matches!(c.validate(), Err(ConfigError::InvalidDimension { height: 0, .. })));
        let c = SimulationConfig::new(MAX_DIMENSION + 1, 600, 60, "x");
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let c = SimulationConfig::new(800, 600, 0, "x");
        assert!(matches!(c.validate(), Err(ConfigError::InvalidFrameRate(0))));
    }

    #[test]
    fn blank_title_is_rejected() {
        let c = SimulationConfig::new(800, 600, 60, "   ");
        assert!(matches!(c.validate(), Err(ConfigError::EmptyTitle)));
    }

    // ── TOML ──────────────────────────────────────────────────────────────

    #[test]
    fn partial_toml_fills_defaults() {
        let c = SimulationConfig::from_toml_str(
            r#"
            title = "Pinball"
            target_fps = 30
            background = [10, 20, 30, 40]
            pause_key = "space"
            quit_key = "Q"

            [logging]
            filter = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(c.title, "Pinball");
        assert_eq!(c.target_fps, 30);
        assert_eq!(c.width, 800);
        assert_eq!(c.background, Color::rgba(10, 20, 30, 40));
        assert_eq!(c.pause_key, Some(Key::Space));
        assert_eq!(c.quit_key, Some(Key::Q));
        assert_eq!(c.logging.to_logging_config().env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_toml_values_fail() {
        assert!(matches!(
            SimulationConfig::from_toml_str("width = 0"),
            Err(ConfigError::InvalidDimension { .. })
        ));
        assert!(matches!(
            SimulationConfig::from_toml_str("pause_key = \"NoSuchKey\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml_str("background = [1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut c = SimulationConfig::new(640, 480, 120, "Round trip");
        c.font_path = Some(PathBuf::from("/tmp/font.ttf"));
        let text = c.to_toml_string().unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimulationConfig::load("/nonexistent/easel.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("easel.toml"));
    }
}
