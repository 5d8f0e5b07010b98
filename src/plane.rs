use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Matrix4x4, Quaternion, Vector3, Vector4};

/// Plane in constant-normal form: `normal . p + d = 0`. A unit normal is
/// expected after [`Plane::normalize`] but never enforced at construction.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3,
    pub d: f32,
}

impl Plane {
    pub const fn new(x: f32, y: f32, z: f32, d: f32) -> Self {
        Self {
            normal: Vector3::new(x, y, z),
            d,
        }
    }

    pub const fn from_normal_d(normal: Vector3, d: f32) -> Self {
        Self { normal, d }
    }

    pub const fn from_vector4(v: Vector4) -> Self {
        Self {
            normal: Vector3::new(v.x, v.y, v.z),
            d: v.w,
        }
    }

    /// Plane through three points. The winding `p1 -> p2 -> p3` fixes the
    /// normal direction by the right-hand rule.
    pub fn from_vertices(p1: Vector3, p2: Vector3, p3: Vector3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self {
            normal,
            d: -normal.dot(p1),
        }
    }

    /// Scales all four components so the normal has unit length. Already
    /// normalized planes (within f32::EPSILON of 1) are returned untouched.
    pub fn normalize(self) -> Self {
        let len_sq = self.normal.length_squared();
        if (len_sq - 1.0).abs() < f32::EPSILON {
            return self;
        }
        let inv = 1.0 / len_sq.sqrt();
        Self {
            normal: self.normal * inv,
            d: self.d * inv,
        }
    }

    pub fn dot(self, value: Vector4) -> f32 {
        self.normal.x * value.x + self.normal.y * value.y + self.normal.z * value.z
            + self.d * value.w
    }

    /// Signed distance term for a point: `normal . value + d`.
    pub fn dot_coordinate(self, value: Vector3) -> f32 {
        self.normal.dot(value) + self.d
    }

    pub fn dot_normal(self, value: Vector3) -> f32 {
        self.normal.dot(value)
    }

    /// Transforms the plane by multiplying `(x, y, z, d)` with the
    /// inverse-transpose of `matrix`, which keeps the normal correct under
    /// non-uniform scale. A singular matrix yields an all-NaN plane.
    pub fn transform(self, matrix: &Matrix4x4) -> Self {
        let m = matrix.inverse().unwrap_or(Matrix4x4::NAN);
        let (x, y, z, d) = (self.normal.x, self.normal.y, self.normal.z, self.d);

        Self {
            normal: Vector3::new(
                x * m.m11 + y * m.m12 + z * m.m13 + d * m.m14,
                x * m.m21 + y * m.m22 + z * m.m23 + d * m.m24,
                x * m.m31 + y * m.m32 + z * m.m33 + d * m.m34,
            ),
            d: x * m.m41 + y * m.m42 + z * m.m43 + d * m.m44,
        }
    }

    /// Rigid rotation: the normal turns with the quaternion, d is unchanged.
    pub fn rotate(self, rotation: Quaternion) -> Self {
        Self {
            normal: self.normal.rotate(rotation),
            d: self.d,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Normal:{} D:{}}}", self.normal, self.d)
    }
}

unsafe impl bytemuck::Pod for Plane {}
unsafe impl bytemuck::Zeroable for Plane {}
