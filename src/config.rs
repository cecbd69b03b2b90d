use std::str::FromStr;

use log::warn;

use crate::camera::DEFAULT_CAMERA_MARGIN;
use crate::error::LevelError;

pub const DEFAULT_TILE_SIZE: f32 = 1.0;
pub const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub tile_size: f32,
    pub camera_margin: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            camera_margin: DEFAULT_CAMERA_MARGIN,
        }
    }
}

impl GeneratorConfig {
    /// Reads `PACMAN_TILE_SIZE` and `PACMAN_CAMERA_MARGIN`, keeping defaults for
    /// anything unset or unusable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            tile_size: read_setting(&lookup, "PACMAN_TILE_SIZE", DEFAULT_TILE_SIZE, |v| {
                v.is_finite() && *v > 0.0
            }),
            camera_margin: read_setting(
                &lookup,
                "PACMAN_CAMERA_MARGIN",
                DEFAULT_CAMERA_MARGIN,
                |v| v.is_finite() && *v >= 0.0,
            ),
        }
    }

    /// Strict check for configs built by hand.
    pub fn validated(self) -> Result<Self, LevelError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(LevelError::InvalidSetting {
                name: "tile_size",
                value: self.tile_size.to_string(),
            });
        }
        if !(self.camera_margin.is_finite() && self.camera_margin >= 0.0) {
            return Err(LevelError::InvalidSetting {
                name: "camera_margin",
                value: self.camera_margin.to_string(),
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub render_fps: u64,
}

impl DisplaySettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            render_fps: read_setting(&lookup, "PACMAN_FPS", DEFAULT_RENDER_FPS, |v| *v > 0),
        }
    }
}

fn read_setting<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse::<T>().ok().filter(|v| valid(v)) {
        Some(value) => value,
        None => {
            warn!("ignoring {name}={raw:?}, keeping the default");
            default
        }
    }
}
