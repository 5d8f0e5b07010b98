use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::Quaternion;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
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
        }
    }

    pub fn max(self, other: Self) -> Self {
        Self {
            x: if self.x > other.x { self.x } else { other.x },
            y: if self.y > other.y { self.y } else { other.y },
        }
    }

    /// Clamps against `max` first, then `min`, so `min` wins per component
    /// when `min > max` (shader-language clamp order).
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let mut x = self.x;
        x = if x > max.x { max.x } else { x };
        x = if x < min.x { min.x } else { x };

        let mut y = self.y;
        y = if y > max.y { max.y } else { y };
        y = if y < min.y { min.y } else { y };

        Self { x, y }
    }

    /// Unclamped: `amount` outside [0, 1] extrapolates.
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        self * (1.0 - amount) + other * amount
    }

    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Rotates the vector in the xy-plane by a quaternion (z treated as 0).
    pub fn rotate(self, rotation: Quaternion) -> Self {
        let x2 = rotation.x + rotation.x;
        let y2 = rotation.y + rotation.y;
        let z2 = rotation.z + rotation.z;

        let wz2 = rotation.w * z2;
        let xx2 = rotation.x * x2;
        let xy2 = rotation.x * y2;
        let yy2 = rotation.y * y2;
        let zz2 = rotation.z * z2;

        Self {
            x: self.x * (1.0 - yy2 - zz2) + self.y * (xy2 - wz2),
            y: self.x * (xy2 + wz2) + self.y * (1.0 - xx2 - zz2),
        }
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul for Vector2 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div for Vector2 {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        let inv = 1.0 / scalar;
        Self::new(self.x * inv, self.y * inv)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X:{} Y:{}}}", self.x, self.y)
    }
}

impl From<Vector2> for [f32; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(a: [f32; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

unsafe impl bytemuck::Pod for Vector2 {}
unsafe impl bytemuck::Zeroable for Vector2 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_laws() {
        let v = Vector2::new(3.5, -2.0);
        assert_eq!(v + Vector2::ZERO, v);
        assert_eq!(v * Vector2::ONE, v);
    }

    #[test]
    fn distance_concrete() {
        let d = Vector2::new(1.0, 2.0).distance(Vector2::new(3.0, 4.0));
        assert_eq!(d, 8.0_f32.sqrt());
    }

    #[test]
    fn normalize_unit_length() {
        let n = Vector2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_is_nan() {
        let n = Vector2::ZERO.normalize();
        assert!(n.x.is_nan());
        assert!(n.y.is_nan());
    }

    #[test]
    fn clamp_min_wins_when_ranges_cross() {
        let min = Vector2::new(1.0, 1.1);
        let max = Vector2::new(0.0, 0.1);
        let clamped = Vector2::new(0.5, 0.5).clamp(min, max);
        assert_eq!(clamped, min);
    }

    #[test]
    fn lerp_extrapolates() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(10.0, 10.0);
        assert_eq!(a.lerp(b, 0.5), Vector2::new(5.0, 5.0));
        assert_eq!(a.lerp(b, 2.0), Vector2::new(20.0, 20.0));
        assert_eq!(a.lerp(b, -1.0), Vector2::new(-10.0, -10.0));
    }

    #[test]
    fn reflect_across_axis() {
        let v = Vector2::new(1.0, -1.0);
        let r = v.reflect(Vector2::UNIT_Y);
        assert!((r.x - 1.0).abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn min_max_componentwise() {
        let a = Vector2::new(1.0, 4.0);
        let b = Vector2::new(2.0, 3.0);
        assert_eq!(a.min(b), Vector2::new(1.0, 3.0));
        assert_eq!(a.max(b), Vector2::new(2.0, 4.0));
    }

    #[test]
    fn nan_equality_asymmetry() {
        let v = Vector2::new(f32::NAN, 1.0);
        assert!(v != v);
        assert!(!(v == v));
    }

    #[test]
    fn division_by_zero_scalar() {
        let v = Vector2::new(1.0, -1.0) / 0.0;
        assert!(v.x.is_infinite() && v.x > 0.0);
        assert!(v.y.is_infinite() && v.y < 0.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let q = Quaternion::from_axis_angle(crate::Vector3::UNIT_Z, crate::PI / 2.0);
        let r = Vector2::UNIT_X.rotate(q);
        assert!(r.x.abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn display_layout() {
        assert_eq!(Vector2::new(1.0, 2.5).to_string(), "{X:1 Y:2.5}");
    }
}
