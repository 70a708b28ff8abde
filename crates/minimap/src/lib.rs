#![allow(clippy::collapsible_if)]

pub mod shape;
pub mod raster;
pub mod projector;
pub mod background;
pub mod icons;
pub mod view;
pub mod config;

mod map;

pub use map::{Minimap, MinimapFrame};
pub use common::utils::{Color, PixelPoint, Rect, RectEdges, Size, Vec2, Vec3};
