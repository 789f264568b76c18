// config.rs
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::StatePalette;
use crate::error::ConfigError;

/// RGBA color as it appears in the config file.
pub type Rgba = (f32, f32, f32, f32);

fn to_color(rgba: Rgba) -> Color {
    Color::srgba(rgba.0, rgba.1, rgba.2, rgba.3)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub normal: Rgba,
    pub hover: Rgba,
    pub select: Rgba,
    pub disabled: Rgba,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            normal: (1.0, 0.0, 0.0, 1.0),
            hover: (0.0, 0.0, 1.0, 1.0),
            select: (0.0, 1.0, 0.0, 1.0),
            disabled: (0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl From<&PaletteConfig> for StatePalette {
    fn from(config: &PaletteConfig) -> Self {
        Self {
            normal: to_color(config.normal),
            hover: to_color(config.hover),
            select: to_color(config.select),
            disabled: to_color(config.disabled),
        }
    }
}

/// Game settings, loaded from a RON file.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub palette: PaletteConfig,
    /// How long the "found" notification stays up after the latest select.
    pub notification_seconds: f32,
    /// Distance in front of the viewer for the notification panel.
    pub notification_distance: f32,
    pub win_panel_distance: f32,
    pub lose_panel_distance: f32,
    /// Applied to the win and lose panels.
    pub panel_vertical_offset: f32,
    /// `None` plays without a timer.
    pub countdown_seconds: Option<f32>,
    pub countdown_distance: f32,
    pub countdown_vertical_offset: f32,
    pub items: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            palette: PaletteConfig::default(),
            notification_seconds: 2.0,
            notification_distance: 1.0,
            win_panel_distance: 1.0,
            lose_panel_distance: 1.0,
            panel_vertical_offset: 0.5,
            countdown_seconds: None,
            countdown_distance: 1.5,
            countdown_vertical_offset: 0.4,
            items: vec!["Lantern".into(), "Compass".into(), "Map".into()],
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(source: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_ron_str(&source, &display)
    }

    /// Like [`GameConfig::load`], but a missing file falls back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(&path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::Invalid("at least one item is required".into()));
        }
        if self.items.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid("item names must not be blank".into()));
        }
        if !(self.notification_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "notification_seconds must be positive, got {}",
                self.notification_seconds
            )));
        }
        if let Some(seconds) = self.countdown_seconds {
            if !(seconds > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "countdown_seconds must be positive, got {seconds}"
                )));
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> StatePalette {
        StatePalette::from(&self.palette)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs_f32(self.notification_seconds)
    }

    pub fn countdown(&self) -> Option<Duration> {
        self.countdown_seconds.map(Duration::from_secs_f32)
    }
}
