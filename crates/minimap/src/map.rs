use common::{
    log,
    utils::{Color, Size, Vec2, Vec3},
};

use crate::{
    projector,
    config::MinimapConfigs,
    view::MinimapView,
    raster::RasterError,
    shape::{MinimapBounds, MinimapShape},
    background::{BackgroundSource, BackgroundTexture, ElementEntry},
    icons::{IconHandle, IconPlacement, IconRegistry, MinimapIcon, place_icon},
};

// ----------------------------------------------
// MinimapFrame
// ----------------------------------------------

// Everything the host needs to draw the minimap for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinimapFrame {
    pub map_scale: f32,
    pub map_offset: Vec2,
    pub icons: Vec<(IconHandle, IconPlacement)>,
}

// ----------------------------------------------
// Minimap
// ----------------------------------------------

pub struct Minimap {
    bounds: MinimapBounds,
    pixels_per_unit: f32,
    view: MinimapView,
    background_color: Color,
    background: Option<BackgroundTexture>,
    icons: IconRegistry,
}

impl Minimap {
    pub fn new(bounds: MinimapBounds, pixels_per_unit: f32) -> Self {
        debug_assert!(pixels_per_unit > 0.0);
        Self {
            bounds,
            pixels_per_unit,
            view: MinimapView::Static,
            background_color: Color::transparent(),
            background: None,
            icons: IconRegistry::new(),
        }
    }

    // Also applies the configured log level.
    pub fn from_configs(configs: &MinimapConfigs) -> Self {
        configs.apply_log_level();

        Self::new(configs.to_bounds(), configs.pixels_per_unit)
            .with_view(configs.view)
            .with_background_color(configs.background_color)
    }

    #[inline]
    #[must_use]
    pub fn with_view(mut self, view: MinimapView) -> Self {
        self.view = view;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    // ----------------------
    // Geometry:
    // ----------------------

    #[inline]
    pub fn bounds(&self) -> &MinimapBounds {
        &self.bounds
    }

    // Moving the bounds does not rebuild the background.
    #[inline]
    pub fn bounds_mut(&mut self) -> &mut MinimapBounds {
        &mut self.bounds
    }

    #[inline]
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    #[inline]
    pub fn pixel_size(&self) -> Size {
        projector::pixel_size(&self.bounds, self.pixels_per_unit)
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.bounds.rotation()
    }

    #[inline]
    pub fn in_map(&self, world_position: Vec3) -> bool {
        self.bounds.contains_world(world_position)
    }

    #[inline]
    pub fn minimap_position(&self, world_position: Vec3) -> Vec2 {
        projector::world_to_normalized_3d(&self.bounds, world_position)
    }

    // ----------------------
    // View:
    // ----------------------

    #[inline]
    pub fn view(&self) -> MinimapView {
        self.view
    }

    #[inline]
    pub fn set_view(&mut self, view: MinimapView) {
        self.view = view;
    }

    // ----------------------
    // Background:
    // ----------------------

    // Builds the background once from a base fill or image plus the static
    // scene elements. Replaces any previous background.
    pub fn build_background(&mut self,
                            source: BackgroundSource,
                            entries: &[ElementEntry]) -> Result<&BackgroundTexture, RasterError> {
        let size = self.pixel_size();
        let mut background = BackgroundTexture::from_source(size, source)?;
        background.compose(&self.bounds, entries, self.pixels_per_unit);

        log::info!(log::channel!("minimap"), "Built minimap background {size}.");
        Ok(&*self.background.insert(background))
    }

    // Same as `build_background` over a fill of `background_color()`.
    pub fn build_default_background(&mut self, entries: &[ElementEntry]) -> Result<&BackgroundTexture, RasterError> {
        self.build_background(BackgroundSource::Color(Some(self.background_color)), entries)
    }

    #[inline]
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    #[inline]
    pub fn background(&self) -> Option<&BackgroundTexture> {
        self.background.as_ref()
    }

    // ----------------------
    // Icons:
    // ----------------------

    #[inline]
    pub fn add_icon(&mut self, icon: MinimapIcon) -> IconHandle {
        self.icons.add(icon)
    }

    #[inline]
    pub fn remove_icon(&mut self, handle: IconHandle) -> bool {
        self.icons.remove(handle)
    }

    #[inline]
    pub fn update_icon(&mut self, handle: IconHandle, position: Vec3, heading: f32) -> bool {
        self.icons.update_transform(handle, position, heading)
    }

    #[inline]
    pub fn icon(&self, handle: IconHandle) -> Option<&MinimapIcon> {
        self.icons.get(handle)
    }

    #[inline]
    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    // Per-frame placement of every icon. A centered view keeps
    // `follow_target` in the middle; without a target the map center is used.
    pub fn icon_placements(&self, follow_target: Option<Vec3>) -> MinimapFrame {
        let target_uv = follow_target
            .map(|target| self.minimap_position(target))
            .unwrap_or(Vec2::splat(0.5));

        MinimapFrame {
            map_scale: self.view.map_scale(),
            map_offset: self.view.map_offset(target_uv),
            icons: self.icons
                .iter()
                .map(|(handle, icon)| (handle, place_icon(icon, &self.bounds, &self.view, self.pixels_per_unit)))
                .collect(),
        }
    }
}

impl Default for Minimap {
    fn default() -> Self {
        Self::from_configs(&MinimapConfigs::default())
    }
}
