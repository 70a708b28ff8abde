use std::path::Path;
use serde::{Deserialize, Serialize};

use common::{
    log,
    utils::{Color, Vec2},
};

use crate::{
    view::MinimapView,
    shape::{MinimapBounds, OrientedRect},
};

// ----------------------------------------------
// MinimapConfigs
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // Missing fields in the config file get defaults from MinimapConfigs::default().
pub struct MinimapConfigs {
    // Resolution:
    pub pixels_per_unit: f32,

    // Background:
    pub background_color: Color,

    // Bounds:
    pub bounds_size: Vec2,
    pub bounds_rotation: f32,
    pub lock_aspect_ratio: bool,

    // View:
    pub view: MinimapView,

    // Debug Log:
    pub log_level: log::Level,
}

impl Default for MinimapConfigs {
    fn default() -> Self {
        Self {
            // Resolution:
            pixels_per_unit: 10.0,

            // Background:
            background_color: Color::transparent(),

            // Bounds:
            bounds_size: Vec2::new(10.0, 10.0),
            bounds_rotation: 0.0,
            lock_aspect_ratio: false,

            // View:
            view: MinimapView::Static,

            // Debug Log:
            log_level: log::Level::Info,
        }
    }
}

impl MinimapConfigs {
    // Horizontal bounds centered at the world origin.
    pub fn to_bounds(&self) -> MinimapBounds {
        MinimapBounds::horizontal(
            OrientedRect::new(Vec2::zero(), self.bounds_size, self.bounds_rotation)
                .with_locked_aspect_ratio(self.lock_aspect_ratio)
        )
    }

    #[inline]
    pub fn apply_log_level(&self) {
        log::set_level(self.log_level);
    }

    // Saves current configs to file as pretty JSON.
    pub fn save_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();

        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to serialize minimap configs: {err}");
                return false;
            }
        };

        if let Some(parent) = path.parent() {
            // Ignore errors here; writing the file reports anything that matters.
            let _ = std::fs::create_dir_all(parent);
        }

        if let Err(err) = std::fs::write(path, json) {
            log::error!(log::channel!("config"), "Failed to write config file {path:?}: {err}");
            return false;
        }

        true
    }

    // Either succeeds loading the config file or returns the default configs.
    pub fn load_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to read config file from path {path:?}: {err}");
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(configs) => {
                log::verbose!(log::channel!("config"), "Loaded minimap configs from {path:?}.");
                configs
            }
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to deserialize config file from path {path:?}: {err}");
                Self::default()
            }
        }
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------
