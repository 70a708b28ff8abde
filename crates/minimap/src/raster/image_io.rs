use image::{Rgba, RgbaImage};

use common::utils::{Color, Size};
use super::PixelBuffer;

// ----------------------------------------------
// Host image interop
// ----------------------------------------------

// Image rows run top to bottom, buffer rows bottom to top,
// so both conversions flip vertically.
impl PixelBuffer {
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let size = Size::new(width as i32, height as i32);

        let mut pixels = Vec::with_capacity(size.area());
        for y in (0..height).rev() {
            for x in 0..width {
                pixels.push(Color::from_rgba8(image.get_pixel(x, y).0));
            }
        }

        Self { size, pixels }
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.width().max(0) as u32;
        let height = self.height().max(0) as u32;

        RgbaImage::from_fn(width, height, |x, y| {
            let color = self.get(x as i32, (height - 1 - y) as i32).unwrap_or_default();
            Rgba(color.to_rgba8())
        })
    }
}
