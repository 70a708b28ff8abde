use arrayvec::ArrayVec;

use common::utils::{Color, PixelPoint, Size, wrap_degrees};
use super::PixelBuffer;

// sin/cos values this close to 0 or 1 are snapped so that
// multiples of 90 degrees map pixel centers exactly.
const TRIG_SNAP: f64 = 1e-9;

// Sample positions within this distance of a pixel center land on it alone.
const CENTER_SNAP: f64 = 1e-6;

// Slack when rounding up the rotated extents.
const EXTENT_TOLERANCE: f64 = 1e-6;

// ----------------------------------------------
// Splat accumulation
// ----------------------------------------------

// Running alpha-weighted sums for one destination pixel.
#[derive(Copy, Clone, Default)]
struct Accumulator {
    alpha: f64,
    r: f64,
    g: f64,
    b: f64,
}

impl Accumulator {
    #[inline]
    fn add(&mut self, color: Color, weight: f64) {
        let w = weight * color.a as f64;
        self.alpha += w;
        self.r += w * color.r as f64;
        self.g += w * color.g as f64;
        self.b += w * color.b as f64;
    }

    #[inline]
    fn resolve(&self) -> Color {
        if self.alpha <= 0.0 {
            return Color::transparent();
        }
        Color::new(
            (self.r / self.alpha) as f32,
            (self.g / self.alpha) as f32,
            (self.b / self.alpha) as f32,
            self.alpha.min(1.0) as f32,
        )
    }
}

// ----------------------------------------------
// Rotate
// ----------------------------------------------

impl PixelBuffer {
    // Counter-clockwise rotation about the buffer center. Every source pixel is
    // splatted into the (up to four) destination pixels around its rotated
    // center with bilinear weights. The result is sized to fit the rotated
    // extents; 0 and 360 degrees return an identical copy.
    pub fn rotated(&self, angle_degrees: f32) -> PixelBuffer {
        if self.is_empty() {
            return PixelBuffer::empty();
        }

        let (sin, cos) = snapped_sin_cos(wrap_degrees(angle_degrees) as f64);

        let src_w = self.width() as f64;
        let src_h = self.height() as f64;
        let dst_size = Size::new(
            ceil_extent(src_w * cos.abs() + src_h * sin.abs()),
            ceil_extent(src_w * sin.abs() + src_h * cos.abs()),
        );

        let dst_w = dst_size.width as f64;
        let dst_h = dst_size.height as f64;

        let mut accumulators = vec![Accumulator::default(); dst_size.area()];

        for (index, &color) in self.pixels().iter().enumerate() {
            if color.a <= 0.0 {
                continue;
            }

            let src_x = (index % self.width() as usize) as f64;
            let src_y = (index / self.width() as usize) as f64;

            // Pixel center relative to the source center.
            let dx = src_x + 0.5 - (src_w * 0.5);
            let dy = src_y + 0.5 - (src_h * 0.5);

            // Back to a pixel index space position in the destination.
            let x = (dx * cos) - (dy * sin) + (dst_w * 0.5) - 0.5;
            let y = (dx * sin) + (dy * cos) + (dst_h * 0.5) - 0.5;

            for (point, weight) in splat_targets(x, y) {
                if point.x < 0 || point.x >= dst_size.width || point.y < 0 || point.y >= dst_size.height {
                    continue;
                }
                let dst_index = (point.x + point.y * dst_size.width) as usize;
                accumulators[dst_index].add(color, weight);
            }
        }

        let pixels = accumulators.iter().map(Accumulator::resolve).collect();
        PixelBuffer { size: dst_size, pixels }
    }
}

// ----------------------------------------------
// Internal helpers
// ----------------------------------------------

fn snapped_sin_cos(degrees: f64) -> (f64, f64) {
    let snap = |v: f64| {
        if v.abs() < TRIG_SNAP {
            0.0
        } else if (v.abs() - 1.0).abs() < TRIG_SNAP {
            v.signum()
        } else {
            v
        }
    };
    let (sin, cos) = degrees.to_radians().sin_cos();
    (snap(sin), snap(cos))
}

#[inline]
fn ceil_extent(extent: f64) -> i32 {
    (extent - EXTENT_TOLERANCE).ceil().max(0.0) as i32
}

// Destination pixels and bilinear weights for a sample at (x, y) in pixel index
// space. Samples on a pixel center hit one pixel, samples on a row or column
// line hit two, anything else hits four.
fn splat_targets(x: f64, y: f64) -> ArrayVec<(PixelPoint, f64), 4> {
    let (x0, fx) = split_coord(x);
    let (y0, fy) = split_coord(y);

    let mut targets = ArrayVec::new();
    match (fx == 0.0, fy == 0.0) {
        (true, true) => {
            targets.push((PixelPoint::new(x0, y0), 1.0));
        }
        (true, false) => {
            targets.push((PixelPoint::new(x0, y0), 1.0 - fy));
            targets.push((PixelPoint::new(x0, y0 + 1), fy));
        }
        (false, true) => {
            targets.push((PixelPoint::new(x0, y0), 1.0 - fx));
            targets.push((PixelPoint::new(x0 + 1, y0), fx));
        }
        (false, false) => {
            targets.push((PixelPoint::new(x0, y0), (1.0 - fx) * (1.0 - fy)));
            targets.push((PixelPoint::new(x0 + 1, y0), fx * (1.0 - fy)));
            targets.push((PixelPoint::new(x0, y0 + 1), (1.0 - fx) * fy));
            targets.push((PixelPoint::new(x0 + 1, y0 + 1), fx * fy));
        }
    }
    targets
}

// Integer part and fraction, with fractions near 0 or 1 snapped to the pixel.
#[inline]
fn split_coord(v: f64) -> (i32, f64) {
    let floor = v.floor();
    let fraction = v - floor;
    if fraction < CENTER_SNAP {
        (floor as i32, 0.0)
    } else if fraction > 1.0 - CENTER_SNAP {
        (floor as i32 + 1, 0.0)
    } else {
        (floor as i32, fraction)
    }
}
