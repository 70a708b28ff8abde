use serde::{Deserialize, Serialize};

use common::utils::{
    Rect, Vec2, Vec3,
    safe_div, wrap_degrees,
};

pub mod handles;

mod plane;
pub use plane::{PlaneBasis, ReferencePlane};

#[cfg(test)]
mod tests;

// ----------------------------------------------
// Helpers
// ----------------------------------------------

// Host transforms report yaw clockwise when seen from above,
// shapes rotate counter-clockwise. Result is in [0,360).
#[inline]
pub fn rotation_from_heading(heading_degrees: f32) -> f32 {
    wrap_degrees(-heading_degrees)
}

// Slack applied to containment tests so the corners themselves count as inside.
// Corners are stored as absolute positions, so their rounding error grows with
// the distance of the center from the origin as well as with the size.
#[inline]
fn containment_tolerance(center: Vec2, size: Vec2) -> f32 {
    let extent = size.x.abs().max(size.y.abs());
    let distance = center.x.abs().max(center.y.abs());
    1e-5 * (1.0 + extent) + 4.0 * f32::EPSILON * distance
}

// ----------------------------------------------
// MinimapShape
// ----------------------------------------------

pub trait MinimapShape {
    fn center(&self) -> Vec2;
    fn size(&self) -> Vec2;

    // Degrees, counter-clockwise positive, about `center()`.
    fn rotation(&self) -> f32;

    // Maps a world space point into this shape's 2D reference plane.
    fn to_plane(&self, world_point: Vec3) -> Vec2;

    // Bottom-left, top-left, top-right, bottom-right of the unrotated
    // rectangle, each rotated about the center.
    fn corners(&self) -> [Vec2; 4] {
        let center = self.center();
        let rotation = self.rotation();
        Rect::from_center_and_size(center, self.size())
            .corners_cw()
            .map(|corner| corner.rotate_around_point(center, rotation))
    }

    // Axis-aligned bounds of the rotated corners.
    fn bounding_rect(&self) -> Rect {
        Rect::from_points(&self.corners())
    }

    #[inline]
    fn min(&self) -> Vec2 {
        self.bounding_rect().min
    }

    #[inline]
    fn max(&self) -> Vec2 {
        self.bounding_rect().max
    }

    // `point` in the shape's own frame: relative to the center, rotation undone.
    #[inline]
    fn to_local(&self, point: Vec2) -> Vec2 {
        (point - self.center()).rotate(-self.rotation())
    }

    // Coordinates of `point` along the bottom edge (x) and left edge (y),
    // measured from the bottom-left corner, in world units.
    // Zero-length edges yield 0 for that component.
    fn position_relative_to_origin(&self, point: Vec2) -> Vec2 {
        let local = self.to_local(point);
        let size = self.size();
        let along = |offset: f32, edge: f32| {
            if edge.abs() <= f32::EPSILON { 0.0 } else { (offset + edge * 0.5) * edge.signum() }
        };
        Vec2::new(along(local.x, size.x), along(local.y, size.y))
    }

    // Inclusive of the edges. A zero-length axis only admits points on the
    // remaining segment; a zero-size shape only its center.
    fn contains(&self, point: Vec2) -> bool {
        let half_size = self.size().abs() * 0.5;
        let tolerance = containment_tolerance(self.center(), self.size());
        let local = self.to_local(point).abs();
        local.x <= half_size.x + tolerance && local.y <= half_size.y + tolerance
    }

    #[inline]
    fn contains_world(&self, world_point: Vec3) -> bool {
        self.contains(self.to_plane(world_point))
    }
}

// ----------------------------------------------
// OrientedRect
// ----------------------------------------------

// Rectangle in a 2D reference plane, rotated about its own center.
// Corners and extents are always derived, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientedRect {
    pub center: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub lock_aspect_ratio: bool,
}

impl OrientedRect {
    #[inline]
    pub const fn new(center: Vec2, size: Vec2, rotation: f32) -> Self {
        Self { center, size, rotation, lock_aspect_ratio: false }
    }

    #[inline]
    #[must_use]
    pub const fn with_locked_aspect_ratio(self, lock: bool) -> Self {
        Self { lock_aspect_ratio: lock, ..self }
    }

    // Width over height, 0 if the height is zero.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        safe_div(self.size.x, self.size.y)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    // Syncs center and rotation with a host transform on the horizontal plane.
    pub fn follow_transform(&mut self, position: Vec3, heading_degrees: f32) {
        self.center = position.xz();
        self.rotation = rotation_from_heading(heading_degrees);
    }
}

impl Default for OrientedRect {
    #[inline]
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::one(), 0.0)
    }
}

impl MinimapShape for OrientedRect {
    #[inline] fn center(&self) -> Vec2 { self.center }
    #[inline] fn size(&self) -> Vec2 { self.size }
    #[inline] fn rotation(&self) -> f32 { self.rotation }

    #[inline]
    fn to_plane(&self, world_point: Vec3) -> Vec2 {
        world_point.xz()
    }
}

impl std::fmt::Display for OrientedRect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(Center:{}, Size:{}, Rotation:{:.2})", self.center, self.size, self.rotation)
    }
}

// ----------------------------------------------
// MinimapBounds
// ----------------------------------------------

// The world region covered by a minimap: a rectangle plus the plane it lives on.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimapBounds {
    pub rect: OrientedRect,
    pub plane: ReferencePlane,
}

impl MinimapBounds {
    // Rectangle on the world XZ plane.
    #[inline]
    pub const fn horizontal(rect: OrientedRect) -> Self {
        Self { rect, plane: ReferencePlane::Horizontal }
    }

    // Rectangle centered on the basis origin. The basis carries the
    // orientation, so the rectangle itself is unrotated.
    #[inline]
    pub const fn on_plane(basis: PlaneBasis, size: Vec2) -> Self {
        Self {
            rect: OrientedRect::new(Vec2::zero(), size, 0.0),
            plane: ReferencePlane::Oriented(basis),
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self.plane, ReferencePlane::Horizontal)
    }

    // Moves and turns the bounds to match a host transform.
    pub fn follow_transform(&mut self, position: Vec3, heading_degrees: f32) {
        match &mut self.plane {
            ReferencePlane::Horizontal => {
                self.rect.follow_transform(position, heading_degrees);
            }
            ReferencePlane::Oriented(basis) => {
                *basis = basis.with_origin(position).with_heading(heading_degrees);
            }
        }
    }
}

impl Default for MinimapBounds {
    #[inline]
    fn default() -> Self {
        Self::horizontal(OrientedRect::default())
    }
}

impl MinimapShape for MinimapBounds {
    #[inline] fn center(&self) -> Vec2 { self.rect.center }
    #[inline] fn size(&self) -> Vec2 { self.rect.size }
    #[inline] fn rotation(&self) -> f32 { self.rect.rotation }

    #[inline]
    fn to_plane(&self, world_point: Vec3) -> Vec2 {
        self.plane.project(world_point)
    }
}
