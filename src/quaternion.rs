use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::{Matrix4x4, Vector3};

/// Rotation stored as (x, y, z, w) with w the scalar part. Unit length is
/// expected for rotation use but never enforced.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Exact comparison, so a NaN component never counts as identity.
    pub fn is_identity(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.w == 1.0
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn normalize(self) -> Self {
        let inv = 1.0 / self.length();
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Conjugate over squared length. The zero quaternion inverts to NaN.
    pub fn inverse(self) -> Self {
        let inv_norm = 1.0 / self.length_squared();
        Self::new(
            -self.x * inv_norm,
            -self.y * inv_norm,
            -self.z * inv_norm,
            self.w * inv_norm,
        )
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// `axis` must be normalized by the caller.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        let c = half.cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Yaw about y, pitch about x, roll about z (radians).
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let half_roll = roll * 0.5;
        let sr = half_roll.sin();
        let cr = half_roll.cos();

        let half_pitch = pitch * 0.5;
        let sp = half_pitch.sin();
        let cp = half_pitch.cos();

        let half_yaw = yaw * 0.5;
        let sy = half_yaw.sin();
        let cy = half_yaw.cos();

        Self {
            x: cy * sp * cr + sy * cp * sr,
            y: sy * cp * cr - cy * sp * sr,
            z: cy * cp * sr - sy * sp * cr,
            w: cy * cp * cr + sy * sp * sr,
        }
    }

    /// Extracts the rotation from the upper 3x3 of a row-major rotation
    /// matrix. Branches on the trace, reading the largest of w/x/y/z first
    /// to keep the division well conditioned.
    pub fn from_rotation_matrix(m: &Matrix4x4) -> Self {
        let trace = m.m11 + m.m22 + m.m33;

        if trace > 0.0 {
            let mut s = (trace + 1.0).sqrt();
            let w = s * 0.5;
            s = 0.5 / s;
            Self {
                x: (m.m23 - m.m32) * s,
                y: (m.m31 - m.m13) * s,
                z: (m.m12 - m.m21) * s,
                w,
            }
        } else if m.m11 >= m.m22 && m.m11 >= m.m33 {
            let s = (1.0 + m.m11 - m.m22 - m.m33).sqrt();
            let inv_s = 0.5 / s;
            Self {
                x: 0.5 * s,
                y: (m.m12 + m.m21) * inv_s,
                z: (m.m13 + m.m31) * inv_s,
                w: (m.m23 - m.m32) * inv_s,
            }
        } else if m.m22 > m.m33 {
            let s = (1.0 + m.m22 - m.m11 - m.m33).sqrt();
            let inv_s = 0.5 / s;
            Self {
                x: (m.m21 + m.m12) * inv_s,
                y: 0.5 * s,
                z: (m.m32 + m.m23) * inv_s,
                w: (m.m31 - m.m13) * inv_s,
            }
        } else {
            let s = (1.0 + m.m33 - m.m11 - m.m22).sqrt();
            let inv_s = 0.5 / s;
            Self {
                x: (m.m31 + m.m13) * inv_s,
                y: (m.m32 + m.m23) * inv_s,
                z: 0.5 * s,
                w: (m.m12 - m.m21) * inv_s,
            }
        }
    }

    /// Spherical interpolation along the shorter arc, with a linear
    /// fallback when the inputs are nearly parallel.
    pub fn slerp(self, other: Self, amount: f32) -> Self {
        const EPSILON: f32 = 1e-6;

        let mut cos_omega = self.dot(other);
        let flip = cos_omega < 0.0;
        if flip {
            cos_omega = -cos_omega;
        }

        let (s1, s2) = if cos_omega > 1.0 - EPSILON {
            (1.0 - amount, if flip { -amount } else { amount })
        } else {
            let omega = cos_omega.acos();
            let inv_sin_omega = 1.0 / omega.sin();
            let s2 = ((amount * omega).sin()) * inv_sin_omega;
            (
                ((1.0 - amount) * omega).sin() * inv_sin_omega,
                if flip { -s2 } else { s2 },
            )
        };

        Self {
            x: self.x * s1 + other.x * s2,
            y: self.y * s1 + other.y * s2,
            z: self.z * s1 + other.z * s2,
            w: self.w * s1 + other.w * s2,
        }
    }

    /// Normalized linear interpolation, flipped onto the shorter arc.
    pub fn lerp(self, other: Self, amount: f32) -> Self {
        let t1 = 1.0 - amount;
        let raw = if self.dot(other) >= 0.0 {
            Self {
                x: t1 * self.x + amount * other.x,
                y: t1 * self.y + amount * other.y,
                z: t1 * self.z + amount * other.z,
                w: t1 * self.w + amount * other.w,
            }
        } else {
            Self {
                x: t1 * self.x - amount * other.x,
                y: t1 * self.y - amount * other.y,
                z: t1 * self.z - amount * other.z,
                w: t1 * self.w - amount * other.w,
            }
        };
        raw.normalize()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product. `a * b` rotates by `b` first, then `a`, matching the
/// row-vector composition direction of the matrix types.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let cx = self.y * other.z - self.z * other.y;
        let cy = self.z * other.x - self.x * other.z;
        let cz = self.x * other.y - self.y * other.x;
        let dot = self.x * other.x + self.y * other.y + self.z * other.z;

        Self {
            x: self.x * other.w + other.x * self.w + cx,
            y: self.y * other.w + other.y * self.w + cy,
            z: self.z * other.w + other.z * self.w + cz,
            w: self.w * other.w - dot,
        }
    }
}

impl Mul<f32> for Quaternion {
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

impl Add for Quaternion {
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

impl Sub for Quaternion {
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

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X:{} Y:{} Z:{} W:{}}}", self.x, self.y, self.z, self.w)
    }
}

impl From<Quaternion> for [f32; 4] {
    fn from(q: Quaternion) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

unsafe impl bytemuck::Pod for Quaternion {}
unsafe impl bytemuck::Zeroable for Quaternion {}
