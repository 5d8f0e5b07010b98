use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::{DET_EPSILON, PI, TAU, Vector2};

/// Row-major 2D affine transform. The linear part sits in the first two
/// rows, `(m31, m32)` is the translation row.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x2 {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

// Angles this close to an axis-aligned rotation snap to the exact matrix
// (0.1% of a degree, in radians).
const ROTATION_SNAP: f32 = 0.001 * PI / 180.0;

fn ieee_remainder(x: f32, y: f32) -> f32 {
    x - (x / y).round() * y
}

impl Matrix3x2 {
    pub const IDENTITY: Self = Self {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        m31: 0.0,
        m32: 0.0,
    };

    /// All-NaN matrix, the poison value a failed inversion propagates.
    pub const NAN: Self = Self {
        m11: f32::NAN,
        m12: f32::NAN,
        m21: f32::NAN,
        m22: f32::NAN,
        m31: f32::NAN,
        m32: f32::NAN,
    };

    pub const fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Self {
        Self {
            m11,
            m12,
            m21,
            m22,
            m31,
            m32,
        }
    }

    pub const fn from_translation(position: Vector2) -> Self {
        Self::from_translation_xy(position.x, position.y)
    }

    pub const fn from_translation_xy(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    pub const fn from_scale(scale: f32) -> Self {
        Self::from_nonuniform_scale(scale, scale)
    }

    pub const fn from_nonuniform_scale(x: f32, y: f32) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Scales around `center` instead of the origin.
    pub fn from_scale_centered(scale: f32, center: Vector2) -> Self {
        Self::from_nonuniform_scale_centered(scale, scale, center)
    }

    pub fn from_nonuniform_scale_centered(x: f32, y: f32, center: Vector2) -> Self {
        Self::new(x, 0.0, 0.0, y, center.x * (1.0 - x), center.y * (1.0 - y))
    }

    pub fn from_skew(radians_x: f32, radians_y: f32) -> Self {
        Self::new(1.0, radians_y.tan(), radians_x.tan(), 1.0, 0.0, 0.0)
    }

    pub fn from_skew_centered(radians_x: f32, radians_y: f32, center: Vector2) -> Self {
        let x_tan = radians_x.tan();
        let y_tan = radians_y.tan();
        Self::new(1.0, y_tan, x_tan, 1.0, -center.y * x_tan, -center.x * y_tan)
    }

    /// Counter-clockwise rotation. Angles within 0.1% of a degree of an
    /// axis-aligned rotation snap to the exact 0/90/180/270 matrix so that
    /// sin/cos drift never leaks into "nice" transforms; anything farther
    /// out keeps the trig-computed values.
    pub fn from_rotation(radians: f32) -> Self {
        let radians = ieee_remainder(radians, TAU);

        let (c, s) = if radians > -ROTATION_SNAP && radians < ROTATION_SNAP {
            (1.0, 0.0)
        } else if radians > PI / 2.0 - ROTATION_SNAP && radians < PI / 2.0 + ROTATION_SNAP {
            (0.0, 1.0)
        } else if radians < -PI + ROTATION_SNAP || radians > PI - ROTATION_SNAP {
            (-1.0, 0.0)
        } else if radians > -PI / 2.0 - ROTATION_SNAP && radians < -PI / 2.0 + ROTATION_SNAP {
            (0.0, -1.0)
        } else {
            (radians.cos(), radians.sin())
        };

        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    pub fn from_rotation_centered(radians: f32, center: Vector2) -> Self {
        let mut result = Self::from_rotation(radians);
        let (c, s) = (result.m11, result.m12);
        result.m31 = center.x * (1.0 - c) + center.y * s;
        result.m32 = center.y * (1.0 - c) - center.x * s;
        result
    }

    /// Exact comparison, so a NaN component never counts as identity.
    pub fn is_identity(self) -> bool {
        self.m11 == 1.0
            && self.m12 == 0.0
            && self.m21 == 0.0
            && self.m22 == 1.0
            && self.m31 == 0.0
            && self.m32 == 0.0
    }

    pub fn translation(self) -> Vector2 {
        Vector2::new(self.m31, self.m32)
    }

    pub fn determinant(self) -> f32 {
        self.m11 * self.m22 - self.m21 * self.m12
    }

    /// Closed-form inverse. `None` when the determinant is zero (or
    /// subnormal-tiny); combine with [`Matrix3x2::NAN`] to get the
    /// propagate-NaN-on-failure behavior.
    pub fn inverse(self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < DET_EPSILON {
            log::trace!("singular 3x2 matrix, determinant {det}");
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Self::new(
            self.m22 * inv_det,
            -self.m12 * inv_det,
            -self.m21 * inv_det,
            self.m11 * inv_det,
            (self.m21 * self.m32 - self.m31 * self.m22) * inv_det,
            (self.m31 * self.m12 - self.m11 * self.m32) * inv_det,
        ))
    }

    pub fn lerp(self, other: Self, amount: f32) -> Self {
        Self::new(
            self.m11 + (other.m11 - self.m11) * amount,
            self.m12 + (other.m12 - self.m12) * amount,
            self.m21 + (other.m21 - self.m21) * amount,
            self.m22 + (other.m22 - self.m22) * amount,
            self.m31 + (other.m31 - self.m31) * amount,
            self.m32 + (other.m32 - self.m32) * amount,
        )
    }

    pub fn transform_point(self, point: Vector2) -> Vector2 {
        Vector2::new(
            point.x * self.m11 + point.y * self.m21 + self.m31,
            point.x * self.m12 + point.y * self.m22 + self.m32,
        )
    }

    /// Linear part only, translation row ignored.
    pub fn transform_vector(self, vector: Vector2) -> Vector2 {
        Vector2::new(
            vector.x * self.m11 + vector.y * self.m21,
            vector.x * self.m12 + vector.y * self.m22,
        )
    }
}

impl Default for Matrix3x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-vector composition: `a * b` applies `a` first.
impl Mul for Matrix3x2 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.m11 * other.m11 + self.m12 * other.m21,
            self.m11 * other.m12 + self.m12 * other.m22,
            self.m21 * other.m11 + self.m22 * other.m21,
            self.m21 * other.m12 + self.m22 * other.m22,
            self.m31 * other.m11 + self.m32 * other.m21 + other.m31,
            self.m31 * other.m12 + self.m32 * other.m22 + other.m32,
        )
    }
}

impl Mul<f32> for Matrix3x2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.m11 * scalar,
            self.m12 * scalar,
            self.m21 * scalar,
            self.m22 * scalar,
            self.m31 * scalar,
            self.m32 * scalar,
        )
    }
}

impl Add for Matrix3x2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(
            self.m11 + other.m11,
            self.m12 + other.m12,
            self.m21 + other.m21,
            self.m22 + other.m22,
            self.m31 + other.m31,
            self.m32 + other.m32,
        )
    }
}

impl Sub for Matrix3x2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.m11 - other.m11,
            self.m12 - other.m12,
            self.m21 - other.m21,
            self.m22 - other.m22,
            self.m31 - other.m31,
            self.m32 - other.m32,
        )
    }
}

impl Neg for Matrix3x2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.m11, -self.m12, -self.m21, -self.m22, -self.m31, -self.m32)
    }
}

impl fmt::Display for Matrix3x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {{M11:{} M12:{}}} {{M21:{} M22:{}}} {{M31:{} M32:{}}} }}",
            self.m11, self.m12, self.m21, self.m22, self.m31, self.m32
        )
    }
}

impl From<Matrix3x2> for [f32; 6] {
    fn from(m: Matrix3x2) -> Self {
        [m.m11, m.m12, m.m21, m.m22, m.m31, m.m32]
    }
}

impl From<[f32; 6]> for Matrix3x2 {
    fn from(a: [f32; 6]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4], a[5])
    }
}

unsafe impl bytemuck::Pod for Matrix3x2 {}
unsafe impl bytemuck::Zeroable for Matrix3x2 {}
