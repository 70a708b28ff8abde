use thiserror::Error;

use common::utils::{Color, PixelPoint, Size};

mod image_io;
mod resample;
mod rotate;
mod stamp;


// ----------------------------------------------
// RasterError
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("invalid pixel buffer dimensions {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    #[error("pixel buffer {width}x{height} exceeds the limit of {} pixels", MAX_PIXELS)]
    TooLarge { width: i32, height: i32 },

    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

// Upper bound on pixels per buffer (1 GiB of f32 RGBA).
pub const MAX_PIXELS: usize = 1 << 26;

// Rejects negative and oversized dimensions.
pub(crate) fn checked_size(width: i32, height: i32) -> Result<Size, RasterError> {
    let size = Size::new(width, height);
    if size.is_negative() {
        return Err(RasterError::InvalidDimension { width, height });
    }
    if size.area() > MAX_PIXELS {
        return Err(RasterError::TooLarge { width, height });
    }
    Ok(size)
}

// ----------------------------------------------
// PixelBuffer
// ----------------------------------------------

// Row-major RGBA grid. Row 0 is the bottom row (Y grows upward),
// the same orientation as normalized minimap space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelBuffer {
    size: Size,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    // Zero-sized buffers are allowed, negative or oversized ones are not.
    // A missing fill color leaves every pixel transparent.
    pub fn new(width: i32, height: i32, fill: Option<Color>) -> Result<Self, RasterError> {
        let size = checked_size(width, height)?;

        Ok(Self {
            size,
            pixels: vec![fill.unwrap_or_default(); size.area()],
        })
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pixels(size: Size, pixels: Vec<Color>) -> Result<Self, RasterError> {
        let size = checked_size(size.width, size.height)?;
        if pixels.len() != size.area() {
            return Err(RasterError::PixelCountMismatch { expected: size.area(), actual: pixels.len() });
        }
        Ok(Self { size, pixels })
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(PixelPoint::new(x, y)).map(|index| self.pixels[index])
    }

    // Out of range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(PixelPoint::new(x, y)) {
            self.pixels[index] = color;
        }
    }

    #[inline]
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    // Straight per-channel mean, transparent for an empty buffer.
    pub fn average_color(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::transparent();
        }
        let sum = self.pixels.iter().fold(Color::transparent(), |acc, pixel| acc + *pixel);
        sum * (1.0 / self.pixels.len() as f32)
    }

    #[inline]
    fn is_in_bounds(&self, point: PixelPoint) -> bool {
        point.x >= 0 && point.x < self.size.width
        && point.y >= 0 && point.y < self.size.height
    }

    #[inline]
    fn index(&self, point: PixelPoint) -> Option<usize> {
        if !self.is_in_bounds(point) {
            return None;
        }
        Some((point.x + (point.y * self.size.width)) as usize)
    }
}

impl std::fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "PixelBuffer{}", self.size)
    }
}
