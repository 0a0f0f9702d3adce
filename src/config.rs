//! Clock configuration
//!
//! Read from `~/.config/clockface/config.yaml`. Every field is optional;
//! a missing or unreadable file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::DEFAULT_THEME_ID;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Theme id (builtin or user theme file stem)
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub hands: HandsConfig,
}

/// Initial window placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_window_extent")]
    pub width: u32,
    #[serde(default = "default_window_extent")]
    pub height: u32,
    /// Center on the primary monitor after creation
    #[serde(default = "default_true")]
    pub center: bool,
}

/// Length (fraction of the face radius) and stroke width (pixels) of a hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandConfig {
    pub length: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "HandsData")]
pub struct HandsConfig {
    pub hour: HandConfig,
    pub minute: HandConfig,
    pub second: HandConfig,
}

/// Hands as written in the file; any field may be left out
#[derive(Debug, Default, Deserialize)]
struct HandsData {
    #[serde(default)]
    hour: HandData,
    #[serde(default)]
    minute: HandData,
    #[serde(default)]
    second: HandData,
}

#[derive(Debug, Default, Deserialize)]
struct HandData {
    length: Option<f32>,
    width: Option<f32>,
}

impl HandData {
    fn or(self, fallback: HandConfig) -> HandConfig {
        HandConfig {
            length: self.length.unwrap_or(fallback.length),
            width: self.width.unwrap_or(fallback.width),
        }
    }
}

impl From<HandsData> for HandsConfig {
    fn from(data: HandsData) -> Self {
        Self {
            hour: data.hour.or(default_hour_hand()),
            minute: data.minute.or(default_minute_hand()),
            second: data.second.or(default_second_hand()),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_title() -> String {
    "Clockface".to_string()
}

fn default_window_extent() -> u32 {
    600
}

fn default_true() -> bool {
    true
}

fn default_hour_hand() -> HandConfig {
    HandConfig {
        length: 0.6,
        width: 6.0,
    }
}

fn default_minute_hand() -> HandConfig {
    HandConfig {
        length: 0.8,
        width: 4.0,
    }
}

fn default_second_hand() -> HandConfig {
    HandConfig {
        length: 0.9,
        width: 2.0,
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_extent(),
            height: default_window_extent(),
            center: true,
        }
    }
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            hour: default_hour_hand(),
            minute: default_minute_hand(),
            second: default_second_hand(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            theme: default_theme(),
            hands: HandsConfig::default(),
        }
    }
}

const MAX_STROKE_WIDTH: f32 = 64.0;
const MIN_STROKE_WIDTH: f32 = 0.5;

impl HandConfig {
    fn sanitized(self) -> Self {
        let length = if self.length.is_finite() {
            self.length.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let width = if self.width.is_finite() {
            self.width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
        } else {
            MIN_STROKE_WIDTH
        };
        Self { length, width }
    }
}

impl ClockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Parse config from YAML, clamping out-of-range values
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ClockConfig = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.window.width = self.window.width.max(1);
        self.window.height = self.window.height.max(1);
        self.hands.hour = self.hands.hour.sanitized();
        self.hands.minute = self.hands.minute.sanitized();
        self.hands.second = self.hands.second.sanitized();
        self
    }
}
