use common::{
    log,
    utils::{Color, Size, wrap_degrees},
};

use crate::{
    projector,
    raster::{PixelBuffer, RasterError},
    shape::{MinimapShape, OrientedRect},
};


// ----------------------------------------------
// MinimapElement
// ----------------------------------------------

// A static scene object baked into the minimap background.
// Footprints live in the same reference plane as the minimap bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum MinimapElement {
    // Solid color rectangle.
    Box { footprint: OrientedRect, color: Color },
    // Texture stretched over the footprint.
    Sprite { footprint: OrientedRect, texture: PixelBuffer },
}

impl MinimapElement {
    #[inline]
    pub fn footprint(&self) -> &OrientedRect {
        match self {
            Self::Box { footprint, .. } => footprint,
            Self::Sprite { footprint, .. } => footprint,
        }
    }

    #[inline]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "Box",
            Self::Sprite { .. } => "Sprite",
        }
    }
}

// Element plus its draw order. Higher orders draw later (on top),
// equal orders keep their insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementEntry {
    pub element: MinimapElement,
    pub draw_order: i32,
}

impl ElementEntry {
    #[inline]
    pub fn new(element: MinimapElement, draw_order: i32) -> Self {
        Self { element, draw_order }
    }
}

// ----------------------------------------------
// Element textures
// ----------------------------------------------

// Texture of `element` at the map resolution, turned to match its rotation
// relative to the map.
pub fn element_texture(element: &MinimapElement,
                       bounds: &impl MinimapShape,
                       pixels_per_unit: f32) -> Result<PixelBuffer, RasterError> {
    let footprint = element.footprint();
    let size = Size::from_vec2_rounded(footprint.size * pixels_per_unit);

    let texture = match element {
        MinimapElement::Box { color, .. } => {
            PixelBuffer::new(size.width, size.height, Some(*color))?
        }
        MinimapElement::Sprite { texture, .. } => {
            texture.resized(size.width, size.height)?
        }
    };

    let relative_rotation = wrap_degrees(footprint.rotation - bounds.rotation());
    if relative_rotation != 0.0 {
        Ok(texture.rotated(relative_rotation))
    } else {
        Ok(texture)
    }
}

// ----------------------------------------------
// BackgroundTexture
// ----------------------------------------------

// Where the background starts from before elements are drawn.
#[derive(Copy, Clone, Debug)]
pub enum BackgroundSource<'a> {
    // Solid fill, transparent when `None`.
    Color(Option<Color>),
    // Stretched to the background size.
    Image(&'a PixelBuffer),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundTexture {
    buffer: PixelBuffer,
}

impl BackgroundTexture {
    pub fn with_color(size: Size, color: Option<Color>) -> Result<Self, RasterError> {
        Ok(Self { buffer: PixelBuffer::new(size.width, size.height, color)? })
    }

    pub fn with_image(size: Size, image: &PixelBuffer) -> Result<Self, RasterError> {
        if image.is_empty() {
            log::warn!(log::channel!("minimap"), "Background image is empty, using a transparent background.");
            return Self::with_color(size, None);
        }
        Ok(Self { buffer: image.resized(size.width, size.height)? })
    }

    pub fn from_source(size: Size, source: BackgroundSource) -> Result<Self, RasterError> {
        match source {
            BackgroundSource::Color(color) => Self::with_color(size, color),
            BackgroundSource::Image(image) => Self::with_image(size, image),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[inline]
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    // Stamps one element at its projected footprint center.
    // Returns false if the element had nothing to draw.
    pub fn draw_element(&mut self,
                        element: &MinimapElement,
                        bounds: &impl MinimapShape,
                        pixels_per_unit: f32) -> Result<bool, RasterError> {
        let texture = element_texture(element, bounds, pixels_per_unit)?;
        if texture.is_empty() {
            log::warn!(log::channel!("minimap"),
                       "Skipping {} element at {}: texture is empty.",
                       element.kind_name(), element.footprint().center);
            return Ok(false);
        }

        let uv = projector::world_to_normalized(bounds, element.footprint().center);
        let clipped = self.buffer.stamp_relative(&texture, uv);

        if !clipped.is_empty() {
            log::verbose!(log::channel!("minimap"),
                          "{} element at {} clipped on edges: {clipped}.",
                          element.kind_name(), element.footprint().center);
        }

        Ok(true)
    }

    // Draws all entries sorted by draw order (stable), so later entries cover
    // earlier ones. Elements that fail or have nothing to draw are skipped.
    // Returns the number of elements drawn.
    pub fn compose(&mut self,
                   bounds: &impl MinimapShape,
                   entries: &[ElementEntry],
                   pixels_per_unit: f32) -> usize {
        let mut ordered: Vec<&ElementEntry> = entries.iter().collect();
        ordered.sort_by_key(|entry| entry.draw_order);

        let mut drawn = 0;
        for entry in ordered {
            match self.draw_element(&entry.element, bounds, pixels_per_unit) {
                Ok(true) => drawn += 1,
                Ok(false) => {}
                Err(err) => {
                    log::warn!(log::channel!("minimap"),
                               "Skipping {} element with draw order {}: {err}",
                               entry.element.kind_name(), entry.draw_order);
                }
            }
        }

        log::info!(log::channel!("minimap"), "Composed {drawn} of {} background elements.", entries.len());
        drawn
    }
}
