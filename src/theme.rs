//! Clock face themes
//!
//! Provides YAML-based theming with compile-time embedded themes and
//! user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/clockface/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const CLASSIC_YAML: &str = include_str!("../themes/classic.yaml");
pub const MIDNIGHT_YAML: &str = include_str!("../themes/midnight.yaml");

/// Id of the theme used when nothing else is configured
pub const DEFAULT_THEME_ID: &str = "classic";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "classic")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "classic",
        yaml: CLASSIC_YAML,
    },
    BuiltinTheme {
        id: "midnight",
        yaml: MIDNIGHT_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_path) = crate::config_paths::theme_file(id) {
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub clock: ClockThemeData,
}

/// Clock colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct ClockThemeData {
    pub background: String,
    pub face: String,
    pub hands: String,
}

/// Resolved theme used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Color the whole surface is cleared to
    pub background: Color,
    /// Fill brush for the face ellipse
    pub face: Color,
    /// Stroke brush for all three hands
    pub hands: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Classic".to_string(),
            background: Color::rgb(0x87, 0xCE, 0xEB),
            face: Color::rgb(0xFF, 0xFF, 0x00),
            hands: Color::rgb(0x00, 0x00, 0x00),
        }
    }
}

impl Theme {
    /// Parse a theme from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse theme: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown builtin theme: {}", id))
            .and_then(|t| Self::from_yaml(t.yaml))
    }

    fn from_data(data: ThemeData) -> Result<Self, String> {
        if data.version != 1 {
            return Err(format!("Unsupported theme version: {}", data.version));
        }
        Ok(Self {
            name: data.name,
            background: Color::from_hex(&data.clock.background)?,
            face: Color::from_hex(&data.clock.face)?,
            hands: Color::from_hex(&data.clock.hands)?,
        })
    }
}
