use smallvec::SmallVec;

use common::{
    log,
    utils::Color,
};
use super::{PixelBuffer, RasterError, checked_size};

// Source pixel index and the share of the destination pixel it covers.
type Taps = SmallVec<[(usize, f32); 4]>;

// ----------------------------------------------
// Resize
// ----------------------------------------------

impl PixelBuffer {
    // Box (area-average) resampling, one axis at a time.
    // Every destination pixel averages the source area it covers, so a uniform
    // scale keeps the mean color. An empty source or a zero target size yields
    // an empty buffer.
    pub fn resized(&self, width: i32, height: i32) -> Result<PixelBuffer, RasterError> {
        let target = checked_size(width, height)?;

        if self.is_empty() {
            log::verbose!(log::channel!("raster"), "Resizing an empty buffer to {target}, result is empty.");
            return Ok(PixelBuffer::empty());
        }

        if !target.is_valid() {
            return Ok(PixelBuffer::empty());
        }

        if target == self.size() {
            return Ok(self.clone());
        }

        let src_w = self.width() as usize;
        let src_h = self.height() as usize;
        let dst_w = target.width as usize;
        let dst_h = target.height as usize;

        // Horizontal pass: src_w x src_h => dst_w x src_h.
        let column_taps = area_taps(src_w, dst_w);
        let mut horizontal = Vec::with_capacity(dst_w * src_h);
        for row in self.pixels().chunks_exact(src_w) {
            for taps in &column_taps {
                horizontal.push(weighted_sum(taps.iter().map(|&(x, weight)| (row[x], weight))));
            }
        }

        // Vertical pass: dst_w x src_h => dst_w x dst_h.
        let row_taps = area_taps(src_h, dst_h);
        let mut pixels = Vec::with_capacity(dst_w * dst_h);
        for taps in &row_taps {
            for x in 0..dst_w {
                pixels.push(weighted_sum(taps.iter().map(|&(y, weight)| (horizontal[x + y * dst_w], weight))));
            }
        }

        PixelBuffer::from_pixels(target, pixels)
    }
}

// ----------------------------------------------
// Internal helpers
// ----------------------------------------------

// For each destination pixel along an axis, the source pixels overlapping
// its footprint and the fraction of the footprint each one covers.
fn area_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len).map(|dst| {
        let start = dst as f64 * scale;
        let end = (start + scale).min(src_len as f64);

        let first = start.floor() as usize;
        let last = (end.ceil() as usize).min(src_len);

        let mut taps = Taps::new();
        for src in first..last {
            let overlap = end.min((src + 1) as f64) - start.max(src as f64);
            if overlap > 1e-9 {
                taps.push((src, (overlap / scale) as f32));
            }
        }
        taps
    }).collect()
}

#[inline]
fn weighted_sum(samples: impl Iterator<Item = (Color, f32)>) -> Color {
    samples
        .fold(Color::transparent(), |acc, (color, weight)| acc + color * weight)
        .clamp()
}
