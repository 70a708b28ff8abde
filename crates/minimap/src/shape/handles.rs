use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use common::utils::{RectEdges, Vec2};
use super::OrientedRect;

// ----------------------------------------------
// SizeHandle
// ----------------------------------------------

// Drag handle sitting on the midpoint of one rectangle edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SizeHandle {
    Right,
    Left,
    Up,
    Down,
}

impl SizeHandle {
    // Outward normal of the handle's edge in the unrotated rectangle.
    #[inline]
    pub const fn direction(self) -> Vec2 {
        match self {
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Left  => Vec2::new(-1.0, 0.0),
            Self::Up    => Vec2::new(0.0, 1.0),
            Self::Down  => Vec2::new(0.0, -1.0),
        }
    }

    #[inline]
    pub const fn edge(self) -> RectEdges {
        match self {
            Self::Right => RectEdges::Right,
            Self::Left  => RectEdges::Left,
            Self::Up    => RectEdges::Top,
            Self::Down  => RectEdges::Bottom,
        }
    }

    // Right/Left resize the width, Up/Down the height.
    #[inline]
    pub const fn drives_width(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }

    #[inline]
    pub fn world_direction(self, rect: &OrientedRect) -> Vec2 {
        self.direction().rotate(rect.rotation)
    }
}

// ----------------------------------------------
// Handle math
// ----------------------------------------------

// Midpoint of the handle's edge, in world space.
pub fn handle_position(rect: &OrientedRect, handle: SizeHandle) -> Vec2 {
    let half_extent = rect.size.dot(handle.direction()).abs() * 0.5;
    rect.center + handle.world_direction(rect) * half_extent
}

// Grows or shrinks `rect` by a handle drag of `world_delta`.
// Only the component of the drag along the handle direction counts.
// Each axis is clamped to at least 1 unit. Returns the size change applied.
pub fn apply_size_drag(rect: &mut OrientedRect, handle: SizeHandle, world_delta: Vec2) -> Vec2 {
    let along = world_delta.dot(handle.world_direction(rect));

    let mut delta = if handle.drives_width() {
        Vec2::new(along, 0.0)
    } else {
        Vec2::new(0.0, along)
    };

    // A degenerate rectangle has no ratio to keep.
    let ratio = rect.aspect_ratio();
    if rect.lock_aspect_ratio && ratio > 0.0 {
        if delta.x == 0.0 {
            delta.x = delta.y * ratio;
        } else if delta.y == 0.0 {
            delta.y = delta.x / ratio;
        }
    }

    let previous = rect.size;
    rect.size = Vec2::new(
        (rect.size.x + delta.x).max(1.0),
        (rect.size.y + delta.y).max(1.0),
    );

    rect.size - previous
}

// Handles sitting on the given edges, e.g. only Left/Right when the
// host keeps the height fixed.
pub fn handles_for_edges(edges: RectEdges) -> impl Iterator<Item = SizeHandle> {
    SizeHandle::iter().filter(move |handle| edges.contains(handle.edge()))
}
