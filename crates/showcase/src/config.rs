//! Showcase configuration (window, scene look, camera). Loaded from config.ron at startup.

use crate::hull::HullStyle;
use serde::{Deserialize, Serialize};

/// Settings read from `config.ron` in the current directory. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Start in borderless fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Ship model used for every catalog entry.
    #[serde(default)]
    pub hull_style: HullStyle,
    /// Background stars in the shell around the scene.
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Slowly orbit the camera when the user is not dragging.
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
    /// 1.0 = one orbit per minute.
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f32,
    /// Go straight to the scene without the loading screen.
    #[serde(default)]
    pub skip_loading: bool,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_star_count() -> usize {
    2000
}
fn default_auto_rotate_speed() -> f32 {
    0.5
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            fullscreen: false,
            hull_style: HullStyle::default(),
            star_count: default_star_count(),
            auto_rotate: default_true(),
            auto_rotate_speed: default_auto_rotate_speed(),
            skip_loading: false,
        }
    }
}

impl ShowcaseConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::parse(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Parse RON text. Missing fields take their defaults.
    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_struct_uses_defaults() {
        let c = ShowcaseConfig::parse("()").unwrap();
        assert_eq!(c.window_width, 1280);
        assert_eq!(c.star_count, 2000);
        assert!(c.auto_rotate);
        assert_eq!(c.hull_style, HullStyle::Fighter);
        assert!(!c.skip_loading);
    }

    #[test]
    fn fields_override_defaults() {
        let c = ShowcaseConfig::parse("(hull_style: Rocket, star_count: 500, auto_rotate_speed: 1.5)").unwrap();
        assert_eq!(c.hull_style, HullStyle::Rocket);
        assert_eq!(c.star_count, 500);
        assert_eq!(c.auto_rotate_speed, 1.5);
        assert!(c.vsync);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(ShowcaseConfig::parse("(hull_style: Submarine)").is_err());
        assert!(ShowcaseConfig::parse("not ron").is_err());
    }

    #[test]
    fn default_roundtrips_through_ron() {
        let text = ron::ser::to_string(&ShowcaseConfig::default()).unwrap();
        let back = ShowcaseConfig::parse(&text).unwrap();
        assert_eq!(back.window_height, 720);
        assert_eq!(back.auto_rotate_speed, 0.5);
    }
}
