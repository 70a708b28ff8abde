use common::utils::{PixelPoint, Size, Vec2, Vec3, safe_div};
use crate::shape::MinimapShape;

// ----------------------------------------------
// World => normalized minimap space
// ----------------------------------------------

// (0,0) is the shape's bottom-left corner and (1,1) its top-right corner.
// Points outside the shape map outside [0,1]. Zero-size axes map to 0.
pub fn world_to_normalized(shape: &impl MinimapShape, world_point: Vec2) -> Vec2 {
    let relative = shape.position_relative_to_origin(world_point);
    let size = shape.size();
    Vec2::new(
        safe_div(relative.x, size.x),
        safe_div(relative.y, size.y),
    )
}

// Same as `world_to_normalized`, going through the shape's reference plane first.
#[inline]
pub fn world_to_normalized_3d(shape: &impl MinimapShape, world_point: Vec3) -> Vec2 {
    world_to_normalized(shape, shape.to_plane(world_point))
}

// Normalized position => nearest pixel in a buffer of `size`.
#[inline]
pub fn normalized_to_pixel(uv: Vec2, size: Size) -> PixelPoint {
    PixelPoint::new(
        (uv.x * size.width as f32).round() as i32,
        (uv.y * size.height as f32).round() as i32,
    )
}

// Pixel dimensions of a buffer covering `shape` at `pixels_per_unit`.
#[inline]
pub fn pixel_size(shape: &impl MinimapShape, pixels_per_unit: f32) -> Size {
    Size::from_vec2_rounded(shape.size() * pixels_per_unit)
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------
