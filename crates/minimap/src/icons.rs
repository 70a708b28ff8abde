use slab::Slab;
use serde::{Deserialize, Serialize};

use common::{
    log,
    utils::{Size, Vec2, Vec3, wrap_degrees},
};

use crate::{
    projector,
    view::MinimapView,
    shape::{MinimapShape, rotation_from_heading},
};

// ----------------------------------------------
// IconSize
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IconSize {
    // Size in pixels. Stays the same on screen when the map zooms.
    Fixed(Size),
    // Size in world units, converted with the map's pixels per unit.
    // Zooms together with the map.
    Relative(Vec2),
}

impl IconSize {
    #[inline]
    pub fn pixel_size(&self, pixels_per_unit: f32) -> Size {
        match self {
            Self::Fixed(size) => *size,
            Self::Relative(world_size) => Size::from_vec2_rounded(*world_size * pixels_per_unit),
        }
    }

    #[inline]
    pub fn scales_with_map(&self) -> bool {
        matches!(self, Self::Relative(_))
    }
}

impl Default for IconSize {
    #[inline]
    fn default() -> Self {
        Self::Fixed(Size::new(10, 10))
    }
}

// ----------------------------------------------
// MinimapIcon
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapIcon {
    pub position: Vec3,
    // Compass heading of the tracked object, clockwise degrees.
    pub heading: f32,
    // Turn the icon with the tracked object. Otherwise it stays upright.
    pub rotate_with_map: bool,
    pub size: IconSize,
}

impl MinimapIcon {
    #[inline]
    pub fn new(position: Vec3, size: IconSize) -> Self {
        Self { position, size, ..Default::default() }
    }
}

impl Default for MinimapIcon {
    #[inline]
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            heading: 0.0,
            rotate_with_map: true,
            size: IconSize::default(),
        }
    }
}

// ----------------------------------------------
// IconPlacement
// ----------------------------------------------

// Where and how to draw an icon this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IconPlacement {
    // Normalized minimap position. May fall outside [0,1].
    pub anchor: Vec2,
    // Counter-clockwise degrees relative to the map image.
    pub rotation: f32,
    // Cancels the map zoom for fixed size icons.
    pub scale: f32,
    pub pixel_size: Size,
    pub in_map: bool,
}

pub fn place_icon(icon: &MinimapIcon,
                  bounds: &impl MinimapShape,
                  view: &MinimapView,
                  pixels_per_unit: f32) -> IconPlacement {
    let rotation = {
        if icon.rotate_with_map {
            wrap_degrees(rotation_from_heading(icon.heading) - bounds.rotation())
        } else {
            0.0
        }
    };

    let scale = {
        if icon.size.scales_with_map() {
            1.0
        } else {
            let map_scale = view.map_scale();
            if map_scale > 0.0 { 1.0 / map_scale } else { 1.0 }
        }
    };

    IconPlacement {
        anchor: projector::world_to_normalized_3d(bounds, icon.position),
        rotation,
        scale,
        pixel_size: icon.size.pixel_size(pixels_per_unit),
        in_map: bounds.contains_world(icon.position),
    }
}

// ----------------------------------------------
// IconHandle
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconHandle {
    index: u32,
    generation: u32,
}

impl IconHandle {
    #[inline]
    fn new(index: usize, generation: u32) -> Self {
        debug_assert!(index < u32::MAX as usize);
        debug_assert!(generation != 0);
        Self { index: index as u32, generation }
    }

    #[inline]
    pub const fn invalid() -> Self {
        Self { index: u32::MAX, generation: 0 }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.index < u32::MAX && self.generation != 0
    }
}

impl Default for IconHandle {
    #[inline]
    fn default() -> Self {
        Self::invalid()
    }
}

// ----------------------------------------------
// IconRegistry
// ----------------------------------------------

// Icons tracked by a minimap. Handles of removed icons are rejected,
// even if their slot gets reused.
#[derive(Default)]
pub struct IconRegistry {
    icons: Slab<(u32, MinimapIcon)>,
    generation: u32,
}

impl IconRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, icon: MinimapIcon) -> IconHandle {
        // Generation 0 is reserved for invalid handles.
        self.generation = self.generation.wrapping_add(1).max(1);
        let index = self.icons.insert((self.generation, icon));
        IconHandle::new(index, self.generation)
    }

    pub fn remove(&mut self, handle: IconHandle) -> bool {
        if self.get(handle).is_none() {
            log::warn!(log::channel!("minimap"), "Ignoring removal of stale icon handle {handle:?}.");
            return false;
        }
        self.icons.remove(handle.index as usize);
        true
    }

    #[inline]
    pub fn get(&self, handle: IconHandle) -> Option<&MinimapIcon> {
        if !handle.is_valid() {
            return None;
        }
        match self.icons.get(handle.index as usize) {
            Some((generation, icon)) if *generation == handle.generation => Some(icon),
            _ => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, handle: IconHandle) -> Option<&mut MinimapIcon> {
        if !handle.is_valid() {
            return None;
        }
        match self.icons.get_mut(handle.index as usize) {
            Some((generation, icon)) if *generation == handle.generation => Some(icon),
            _ => None,
        }
    }

    // Syncs an icon with its tracked object. False for a stale handle.
    pub fn update_transform(&mut self, handle: IconHandle, position: Vec3, heading: f32) -> bool {
        match self.get_mut(handle) {
            Some(icon) => {
                icon.position = position;
                icon.heading = heading;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.icons.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (IconHandle, &MinimapIcon)> {
        self.icons
            .iter()
            .map(|(index, (generation, icon))| (IconHandle::new(index, *generation), icon))
    }
}

// ----------------------------------------------
// Unit Tests
// ----------------------------------------------
