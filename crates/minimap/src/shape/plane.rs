use serde::{Deserialize, Serialize};

use common::utils::{Vec2, Vec3};

// ----------------------------------------------
// PlaneBasis
// ----------------------------------------------

// Arbitrarily oriented plane, described by a world origin and Euler angles
// in degrees. Rotation order is roll (Z), then pitch (X), then yaw (Y).
//  - Positive yaw turns forward (+Z) towards right (+X), like a compass heading.
//  - Positive pitch tilts forward downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneBasis {
    pub origin: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl PlaneBasis {
    #[inline]
    pub const fn new(origin: Vec3, yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { origin, yaw, pitch, roll }
    }

    // Flat plane turned by a compass heading.
    #[inline]
    pub const fn from_heading(origin: Vec3, heading_degrees: f32) -> Self {
        Self::new(origin, heading_degrees, 0.0, 0.0)
    }

    #[inline]
    #[must_use]
    pub const fn with_origin(self, origin: Vec3) -> Self {
        Self { origin, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_heading(self, heading_degrees: f32) -> Self {
        Self { yaw: heading_degrees, ..self }
    }

    // Plane X axis in world space (unit length).
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orient(Vec3::right())
    }

    // Plane Y axis in world space (unit length).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orient(Vec3::forward())
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.forward().cross(self.right())
    }

    pub fn project(&self, world_point: Vec3) -> Vec2 {
        let offset = world_point - self.origin;
        Vec2::new(offset.dot(self.right()), offset.dot(self.forward()))
    }

    // World point at `height` units above the plane along its normal.
    pub fn unproject(&self, plane_point: Vec2, height: f32) -> Vec3 {
        self.origin
            + self.right() * plane_point.x
            + self.forward() * plane_point.y
            + self.normal() * height
    }

    fn orient(&self, v: Vec3) -> Vec3 {
        let v = rotate_about_z(v, self.roll);
        let v = rotate_about_x(v, self.pitch);
        rotate_about_y(v, self.yaw)
    }
}

#[inline]
fn rotate_about_x(v: Vec3, degrees: f32) -> Vec3 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec3::new(v.x, (v.y * c) - (v.z * s), (v.y * s) + (v.z * c))
}

#[inline]
fn rotate_about_y(v: Vec3, degrees: f32) -> Vec3 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec3::new((v.x * c) + (v.z * s), v.y, (v.z * c) - (v.x * s))
}

#[inline]
fn rotate_about_z(v: Vec3, degrees: f32) -> Vec3 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec3::new((v.x * c) - (v.y * s), (v.x * s) + (v.y * c), v.z)
}

// ----------------------------------------------
// ReferencePlane
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ReferencePlane {
    // World XZ plane, Y is discarded.
    #[default]
    Horizontal,
    Oriented(PlaneBasis),
}

impl ReferencePlane {
    #[inline]
    pub fn project(&self, world_point: Vec3) -> Vec2 {
        match self {
            Self::Horizontal => world_point.xz(),
            Self::Oriented(basis) => basis.project(world_point),
        }
    }

    #[inline]
    pub fn unproject(&self, plane_point: Vec2, height: f32) -> Vec3 {
        match self {
            Self::Horizontal => Vec3::new(plane_point.x, height, plane_point.y),
            Self::Oriented(basis) => basis.unproject(plane_point, height),
        }
    }
}
