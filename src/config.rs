// filepath: src/config.rs
//! Configuration handling for inkpad
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.
//! The InkConfig struct contains all configurable parameters; the pen
//! section is the runtime-adjustable part (re-applied on config reload).

use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::render::{Color, PenStyle};

/// Surface appearance and sizing. A width/height of `None` stretches the
/// layer surface across the output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurfaceConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<[u8; 4]>,
}

/// Pen settings, applied to subsequent strokes (never retroactively).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PenConfig {
    pub color: Option<[u8; 4]>,
    /// Nominal stroke width before velocity modulation. Positive;
    /// 1 to 25 is the sensible range.
    pub base_width: Option<f64>,
}

/// Configuration for the pad appearance and pen behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InkConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub pen: PenConfig,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig {
                width: None,
                height: None,
                background_color: Some([221, 221, 221, 255]),
            },
            pen: PenConfig {
                color: Some([0, 0, 0, 255]),
                base_width: Some(10.0),
            },
        }
    }
}

impl InkConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("inkpad")
        } else {
            PathBuf::from(".config/inkpad")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from file, writing defaults if not found
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to_file()?;
                Ok(default_config)
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            if !Path::exists(parent) {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    /// Requested fixed surface size; (0, 0) lets the compositor assign the
    /// full output.
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.surface.width.unwrap_or(0),
            self.surface.height.unwrap_or(0),
        )
    }

    pub fn background(&self) -> Color {
        self.surface.background_color.unwrap_or([221, 221, 221, 255])
    }

    /// Resolve the pen section into a validated [`PenStyle`].
    pub fn pen_style(&self) -> PenStyle {
        PenStyle::new(
            self.pen.color.unwrap_or([0, 0, 0, 255]),
            self.pen.base_width.unwrap_or(10.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = InkConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: InkConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.background(), [221, 221, 221, 255]);
        assert_relative_eq!(parsed.pen_style().base_width(), 10.0);
        assert_eq!(parsed.pen_style().color(), [0, 0, 0, 255]);
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let parsed: InkConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.surface_size(), (0, 0));
        assert_eq!(parsed.pen_style().color(), [0, 0, 0, 255]);
    }

    #[test]
    fn partial_pen_section_is_accepted() {
        let parsed: InkConfig = toml::from_str("[pen]\ncolor = [200, 30, 30, 255]\n").unwrap();
        assert_eq!(parsed.pen_style().color(), [200, 30, 30, 255]);
        assert_relative_eq!(parsed.pen_style().base_width(), 10.0);
    }

    #[test]
    fn invalid_pen_width_is_rejected_by_the_style() {
        let parsed: InkConfig = toml::from_str("[pen]\nbase_width = -4.0\n").unwrap();
        // validation lives in PenStyle; the default width survives
        assert_relative_eq!(parsed.pen_style().base_width(), 10.0);
    }

    #[test]
    fn fixed_surface_size_is_reported() {
        let parsed: InkConfig = toml::from_str("[surface]\nwidth = 800\nheight = 600\n").unwrap();
        assert_eq!(parsed.surface_size(), (800, 600));
    }
}
