use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::{Matrix4x4, Quaternion, Vector3};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const UNIT_W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v, w: v }
    }

    pub const fn from_vector3(v: Vector3, w: f32) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Zero-length input yields NaN components; infinite-length input
    /// collapses to zero through float overflow.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn min(self, other: Self) -> Self {
        Self {
            x: if self.x < other.x { self.x } else { other.x },
            y: if self.y < other.y { self.y } else { other.y },
            z: if self.z < other.z { self.z } else { other.z },
            w: if self.w < other.w { self.w } else { other.w },
        }
    }

    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
            z: if self.z > other.z { self.z } else { other.z },
            w: if self.w > other.w { self.w } else { other.w },
        }
    }

    /// Clamps against `max` first, then `min`, so `min` wins per component
    /// when `min > max`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let mut x = self.x;
        x = if x > max.x { max.x } else { x };
        x = if x < min.x { min.x } else { x };

        let mut y = self.y;
        y = if y > max.y { max.y } else { y };
        y = if y < min.y { min.y } else { y };

        let mut z = self.z;
        z = if z > max.z { max.z } else { z };
        z = if z < min.z { min.z } else { z };

        let mut w = self.w;
        w = if w > max.w { max.w } else { w };
        w = if w < min.w { min.w } else { w };

        Self { x, y, z, w }
    }

    /// Unclamped: `amount` outside [0, 1] extrapolates.
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        self * (1.0 - amount) + other * amount
    }

    /// Full row-vector product `v * M`.
    pub fn transform(self, m: &Matrix4x4) -> Self {
        Self {
            x: self.x * m.m11 + self.y * m.m21 + self.z * m.m31 + self.w * m.m41,
            y: self.x * m.m12 + self.y * m.m22 + self.z * m.m32 + self.w * m.m42,
            z: self.x * m.m13 + self.y * m.m23 + self.z * m.m33 + self.w * m.m43,
            w: self.x * m.m14 + self.y * m.m24 + self.z * m.m34 + self.w * m.m44,
        }
    }

    /// Rotates the xyz part by a quaternion; w passes through.
    pub fn rotate(self, rotation: Quaternion) -> Self {
        let v = Vector3::new(self.x, self.y, self.z).rotate(rotation);
        Self::from_vector3(v, self.w)
    }
}

impl Add for Vector4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Vector4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Mul for Vector4 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

impl Div for Vector4 {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Self::new(
            self.x / other.x,
            self.y / other.y,
            self.z / other.z,
            self.w / other.w,
        )
    }
}

impl Div<f32> for Vector4 {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        let inv = 1.0 / scalar;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }
}

impl Neg for Vector4 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Vector4 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X:{} Y:{} Z:{} W:{}}}", self.x, self.y, self.z, self.w)
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        [v.x, v.y, v.z, v.w]
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

unsafe impl bytemuck::Pod for Vector4 {}
unsafe impl bytemuck::Zeroable for Vector4 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_laws() {
        let v = Vector4::new(1.0, -2.0, 3.0, 0.5);
        assert_eq!(v + Vector4::ZERO, v);
        assert_eq!(v * Vector4::ONE, v);
    }

    #[test]
    fn transform_by_identity() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.transform(&Matrix4x4::IDENTITY), v);
    }

    #[test]
    fn transform_applies_translation_scaled_by_w() {
        let m = Matrix4x4::from_translation(Vector3::new(10.0, 20.0, 30.0));
        let point = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(point.transform(&m), Vector4::new(11.0, 22.0, 33.0, 1.0));

        // direction (w = 0) ignores the translation row
        let dir = Vector4::new(1.0, 2.0, 3.0, 0.0);
        assert_eq!(dir.transform(&m), dir);
    }

    #[test]
    fn rotate_preserves_w() {
        let q = Quaternion::from_axis_angle(Vector3::UNIT_Z, crate::PI / 2.0);
        let r = Vector4::new(1.0, 0.0, 0.0, 7.0).rotate(q);
        assert!(r.x.abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
        assert_eq!(r.w, 7.0);
    }

    #[test]
    fn clamp_min_wins_when_ranges_cross() {
        let min = Vector4::splat(1.0);
        let max = Vector4::splat(0.0);
        assert_eq!(Vector4::splat(0.5).clamp(min, max), min);
    }

    #[test]
    fn nan_equality_asymmetry() {
        let v = Vector4::new(0.0, 0.0, 0.0, f32::NAN);
        assert!(v != v);
    }

    #[test]
    fn display_layout() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.to_string(), "{X:1 Y:2 Z:3 W:4}");
    }
}
