use serde::{Deserialize, Serialize};

use common::utils::Vec2;

// ----------------------------------------------
// MinimapView
// ----------------------------------------------

// How the minimap image sits inside its host panel.
//  - Static: the whole map is shown at scale 1.
//  - Centered: the map is scaled by `zoom` and shifted so the
//    follow target stays at the panel center.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MinimapView {
    #[default]
    Static,
    Centered { zoom: f32 },
}

impl MinimapView {
    #[inline]
    pub fn map_scale(&self) -> f32 {
        match self {
            Self::Static => 1.0,
            Self::Centered { zoom } => *zoom,
        }
    }

    // Offset of the map image, in panel-normalized units, for a follow
    // target at normalized position `target_uv`.
    #[inline]
    pub fn map_offset(&self, target_uv: Vec2) -> Vec2 {
        match self {
            Self::Static => Vec2::zero(),
            Self::Centered { zoom } => (target_uv * *zoom) - Vec2::splat(*zoom * 0.5),
        }
    }

    // Where a map position ends up in the panel, in panel-normalized units.
    #[inline]
    pub fn to_panel(&self, uv: Vec2, target_uv: Vec2) -> Vec2 {
        match self {
            Self::Static => uv,
            Self::Centered { zoom } => (uv * *zoom) - self.map_offset(target_uv) - Vec2::splat((*zoom - 1.0) * 0.5),
        }
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------
