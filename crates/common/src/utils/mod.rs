use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign, Neg};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

// ----------------------------------------------
// Macros
// ----------------------------------------------

// Defines a bitflags struct with a Display implementation.
#[macro_export]
macro_rules! bitflags_with_display {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                const $flag:ident = $value:expr;
            )+
        }
    ) => {
        $crate::bitflags::bitflags! {
            $(#[$meta])*
            $vis struct $name: $ty {
                $(
                    const $flag = $value;
                )+
            }
        }
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let mut first = true;
                $(
                    if self.contains($name::$flag) {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, stringify!($flag))?;
                        first = false;
                    }
                )+
                if first {
                    write!(f, "(empty)")
                } else {
                    Ok(())
                }
            }
        }
    };
}

// Componentwise `+ - += -=`, scalar `* / *= /=` and negation for
// plain f32 structs.
macro_rules! impl_componentwise_ops {
    ($name:ident { $($field:ident),+ }) => {
        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }
        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }
        impl Mul<f32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }
        impl Div<f32> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }
        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }
        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }
        impl MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }
        impl DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }
    };
}

// ----------------------------------------------
// Vec2
// ----------------------------------------------

// 2D point or vector (f32) in a minimap reference plane.
// Also used for normalized [0,1] minimap coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub const fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    #[must_use]
    pub fn dot(&self, other: Self) -> f32 {
        (self.x * other.x) + (self.y * other.y)
    }

    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self { x: self.x.abs(), y: self.y.abs() }
    }

    // Rotates counter-clockwise around `pivot`.
    #[inline]
    #[must_use]
    pub fn rotate_around_point(&self, pivot: Self, angle_degrees: f32) -> Self {
        let (x, y) = rotate_about_pivot(self.x, self.y, pivot.x, pivot.y, angle_degrees);
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub fn rotate(&self, angle_degrees: f32) -> Self {
        self.rotate_around_point(Self::zero(), angle_degrees)
    }

    #[inline]
    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    #[inline]
    #[must_use]
    pub fn approx_eq(&self, other: Self, epsilon: f32) -> bool {
        approx_equal(self.x, other.x, epsilon) && approx_equal(self.y, other.y, epsilon)
    }
}

impl_componentwise_ops!(Vec2 { x, y });

// Per-axis scale.
impl Mul for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{:.2},{:.2}]", self.x, self.y)
    }
}

// ----------------------------------------------
// Vec3
// ----------------------------------------------

// 3D world space point or direction (f32). Y is the vertical axis.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    #[inline] pub const fn right()   -> Self { Self { x: 1.0, y: 0.0, z: 0.0 } }
    #[inline] pub const fn up()      -> Self { Self { x: 0.0, y: 1.0, z: 0.0 } }
    #[inline] pub const fn forward() -> Self { Self { x: 0.0, y: 0.0, z: 1.0 } }

    // Drops the vertical axis: (x, y, z) => (x, z).
    #[inline]
    pub const fn xz(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    #[inline]
    #[must_use]
    pub fn dot(&self, other: Self) -> f32 {
        (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
    }

    #[inline]
    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: (self.y * other.z) - (self.z * other.y),
            y: (self.z * other.x) - (self.x * other.z),
            z: (self.x * other.y) - (self.y * other.x),
        }
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    // Returns zero for a zero-length vector instead of NaNs.
    #[inline]
    #[must_use]
    pub fn normalize_or_zero(&self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::zero();
        }
        *self * (1.0 / len)
    }
}

impl_componentwise_ops!(Vec3 { x, y, z });

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{:.2},{:.2},{:.2}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------
// Color
// ----------------------------------------------

// Normalized RGBA color (f32, [0,1] range), linear channels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline] pub const fn transparent() -> Self { Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 } }
    #[inline] pub const fn white()       -> Self { Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 } }
    #[inline] pub const fn black()       -> Self { Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 } }
    #[inline] pub const fn red()         -> Self { Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 } }
    #[inline] pub const fn green()       -> Self { Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 } }
    #[inline] pub const fn blue()        -> Self { Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 } }
    #[inline] pub const fn yellow()      -> Self { Self { r: 1.0, g: 1.0, b: 0.0, a: 1.0 } }
    #[inline] pub const fn gray()        -> Self { Self { r: 0.7, g: 0.7, b: 0.7, a: 1.0 } }

    #[inline]
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r as f32, g as f32, b as f32, a as f32) / 255.0
    }

    // Clamps to [0,1] first, then rounds to the nearest step.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let Self { r, g, b, a } = self.clamp() * 255.0;
        [r, g, b, a].map(|channel| channel.round() as u8)
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn clamp(&self) -> Self {
        let unit = |v: f32| v.clamp(0.0, 1.0);
        Self::new(unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }

    // Per-channel linear interpolation, alpha included.
    // `t = 0` returns `self` unchanged, `t = 1` returns `other`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        match t {
            t if t <= 0.0 => self,
            t if t >= 1.0 => other,
            t => self + (other - self) * t,
        }
    }

    #[inline]
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        approx_equal(self.r, other.r, epsilon)
        && approx_equal(self.g, other.g, epsilon)
        && approx_equal(self.b, other.b, epsilon)
        && approx_equal(self.a, other.a, epsilon)
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Color::transparent()
    }
}

impl_componentwise_ops!(Color { r, g, b, a });

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{},{},{}]", self.r, self.g, self.b, self.a)
    }
}

// ----------------------------------------------
// Size
// ----------------------------------------------

// Integer width & height pair (pixel dimensions).
#[derive(Copy, Clone, Debug, Default, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { width: 0, height: 0 }
    }

    // Rounds each axis to the nearest integer.
    #[inline]
    pub fn from_vec2_rounded(s: Vec2) -> Self {
        Self { width: s.x.round() as i32, height: s.y.round() as i32 }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.width < 0 || self.height < 0
    }

    #[inline]
    pub fn area(&self) -> usize {
        if self.is_negative() {
            return 0;
        }
        (self.width as usize) * (self.height as usize)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{}]", self.width, self.height)
    }
}

// ----------------------------------------------
// PixelPoint
// ----------------------------------------------

// X,Y integer pixel coordinates. Y grows upward, row 0 is the bottom row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl std::fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

// ----------------------------------------------
// Rect
// ----------------------------------------------

// Axis-aligned rectangle defined by min and max extents (f32).
// Y grows upward: `min` is the bottom-left corner and `max` the top-right.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub fn from_center_and_size(center: Vec2, size: Vec2) -> Self {
        let half_size = size * 0.5;
        Self { min: center - half_size, max: center + half_size }
    }

    #[inline]
    pub fn from_points(points: &[Vec2]) -> Self {
        let empty = Self { min: Vec2::splat(f32::MAX), max: Vec2::splat(f32::MIN) };
        points.iter().fold(empty, |rect, point| Self {
            min: rect.min.min(*point),
            max: rect.max.max(*point),
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    // Inclusive of both min and max.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    // Clockwise corners, from bottom left to bottom right.
    #[inline]
    pub fn corners_cw(&self) -> [Vec2; 4] {
        let Self { min, max } = *self;
        [min, Vec2::new(min.x, max.y), max, Vec2::new(max.x, min.y)]
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(Min:{}, Max:{})", self.min, self.max)
    }
}

// Top is the +Y side.
bitflags_with_display! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct RectEdges: u32 {
        const Top    = 1 << 0;
        const Right  = 1 << 1;
        const Bottom = 1 << 2;
        const Left   = 1 << 3;
    }
}

// ----------------------------------------------
// Point rotation
// ----------------------------------------------

// Rotates (x, y) counter-clockwise about (pivot_x, pivot_y) by `angle_degrees`:
//  x' = (x - px) * cos - (y - py) * sin + px
//  y' = (x - px) * sin + (y - py) * cos + py
#[inline]
pub fn rotate_about_pivot(x: f32, y: f32, pivot_x: f32, pivot_y: f32, angle_degrees: f32) -> (f32, f32) {
    let (s, c) = angle_degrees.to_radians().sin_cos();
    let dx = x - pivot_x;
    let dy = y - pivot_y;
    (
        (dx * c) - (dy * s) + pivot_x,
        (dx * s) + (dy * c) + pivot_y,
    )
}

#[inline]
pub fn rotate_about_origin(x: f32, y: f32, angle_degrees: f32) -> (f32, f32) {
    rotate_about_pivot(x, y, 0.0, 0.0, angle_degrees)
}

// Wraps an angle into the [0,360) range.
#[inline]
pub fn wrap_degrees(angle_degrees: f32) -> f32 {
    let wrapped = angle_degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

// ----------------------------------------------
// Conversion & math helpers
// ----------------------------------------------

// Linear interpolation.
#[inline]
pub fn lerp<T>(a: T, b: T, t: f32) -> T
    where T: Mul<f32, Output = T> + Add<Output = T> + Copy
{
    a * (1.0 - t) + b * t
}

#[inline]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

// Division that yields zero instead of inf/NaN for a zero denominator.
#[inline]
pub fn safe_div(numerator: f32, denominator: f32) -> f32 {
    if denominator.abs() <= f32::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}
