use common::utils::{PixelPoint, RectEdges, Vec2};
use super::PixelBuffer;

// ----------------------------------------------
// Stamp
// ----------------------------------------------

impl PixelBuffer {
    // Blends `stamp` into this buffer with its center at `center`.
    // Stamp pixel (sx, sy) lands on `center + (sx, sy) - stamp_size / 2`
    // (integer halves). Each destination becomes `lerp(dst, src, src.a)`.
    // Pixels falling outside are dropped; the returned edges tell which
    // sides clipped anything.
    pub fn stamp(&mut self, stamp: &PixelBuffer, center: PixelPoint) -> RectEdges {
        if stamp.is_empty() {
            return RectEdges::empty();
        }

        let origin = PixelPoint::new(
            center.x - (stamp.width() / 2),
            center.y - (stamp.height() / 2),
        );

        let mut clipped = RectEdges::empty();
        if origin.x < 0 {
            clipped |= RectEdges::Left;
        }
        if origin.x + stamp.width() > self.width() {
            clipped |= RectEdges::Right;
        }
        if origin.y < 0 {
            clipped |= RectEdges::Bottom;
        }
        if origin.y + stamp.height() > self.height() {
            clipped |= RectEdges::Top;
        }

        // Visible part of the stamp, in target coordinates.
        let x_range = origin.x.max(0)..(origin.x + stamp.width()).min(self.width());
        let y_range = origin.y.max(0)..(origin.y + stamp.height()).min(self.height());

        for ty in y_range {
            for tx in x_range.clone() {
                let sx = tx - origin.x;
                let sy = ty - origin.y;

                let src = stamp.pixels[(sx + sy * stamp.width()) as usize];
                if src.a <= 0.0 {
                    continue;
                }

                let dst_index = (tx + ty * self.width()) as usize;
                self.pixels[dst_index] = self.pixels[dst_index].lerp(src, src.a);
            }
        }

        clipped
    }

    // Stamp centered at a normalized [0,1] position, rounded to the nearest pixel.
    // Positions outside [0,1] are valid and clip.
    pub fn stamp_relative(&mut self, stamp: &PixelBuffer, uv: Vec2) -> RectEdges {
        let center = PixelPoint::new(
            (uv.x * self.width() as f32).round() as i32,
            (uv.y * self.height() as f32).round() as i32,
        );
        self.stamp(stamp, center)
    }
}
