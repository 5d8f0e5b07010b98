use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::{DET_EPSILON, Matrix3x2, PI, ProjectionError, Quaternion, Vector2, Vector3};

/// Row-major 4x4 transform. Rows one to three hold the (possibly scaled)
/// basis vectors, row four the translation; transforming computes `v * M`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

// Near-zero scale / non-SRT residual tolerance for decompose.
const DECOMPOSE_EPSILON: f32 = 1e-4;

impl Matrix4x4 {
    pub const IDENTITY: Self = Self::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );

    /// All-NaN matrix, the poison value a failed inversion propagates.
    pub const NAN: Self = Self::new(
        f32::NAN, f32::NAN, f32::NAN, f32::NAN, //
        f32::NAN, f32::NAN, f32::NAN, f32::NAN, //
        f32::NAN, f32::NAN, f32::NAN, f32::NAN, //
        f32::NAN, f32::NAN, f32::NAN, f32::NAN,
    );

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f32, m12: f32, m13: f32, m14: f32,
        m21: f32, m22: f32, m23: f32, m24: f32,
        m31: f32, m32: f32, m33: f32, m34: f32,
        m41: f32, m42: f32, m43: f32, m44: f32,
    ) -> Self {
        Self {
            m11, m12, m13, m14,
            m21, m22, m23, m24,
            m31, m32, m33, m34,
            m41, m42, m43, m44,
        }
    }

    /// Embeds a 2D affine transform into the xy-plane.
    pub const fn from_matrix3x2(value: Matrix3x2) -> Self {
        Self::new(
            value.m11, value.m12, 0.0, 0.0,
            value.m21, value.m22, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            value.m31, value.m32, 0.0, 1.0,
        )
    }

    pub const fn from_translation(position: Vector3) -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            position.x, position.y, position.z, 1.0,
        )
    }

    pub const fn from_scale(scale: f32) -> Self {
        Self::from_nonuniform_scale(scale, scale, scale)
    }

    pub const fn from_nonuniform_scale(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Scales around `center` instead of the origin.
    pub fn from_scale_centered(scale: f32, center: Vector3) -> Self {
        Self::from_nonuniform_scale_centered(scale, scale, scale, center)
    }

    pub fn from_nonuniform_scale_centered(x: f32, y: f32, z: f32, center: Vector3) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            center.x * (1.0 - x), center.y * (1.0 - y), center.z * (1.0 - z), 1.0,
        )
    }

    pub fn from_rotation_x(radians: f32) -> Self {
        let c = radians.cos();
        let s = radians.sin();
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn from_rotation_x_centered(radians: f32, center: Vector3) -> Self {
        let mut m = Self::from_rotation_x(radians);
        let (c, s) = (m.m22, m.m23);
        m.m42 = center.y * (1.0 - c) + center.z * s;
        m.m43 = center.z * (1.0 - c) - center.y * s;
        m
    }

    pub fn from_rotation_y(radians: f32) -> Self {
        let c = radians.cos();
        let s = radians.sin();
        Self::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn from_rotation_y_centered(radians: f32, center: Vector3) -> Self {
        let mut m = Self::from_rotation_y(radians);
        let (c, s) = (m.m11, m.m31);
        m.m41 = center.x * (1.0 - c) - center.z * s;
        m.m43 = center.z * (1.0 - c) + center.x * s;
        m
    }

    pub fn from_rotation_z(radians: f32) -> Self {
        let c = radians.cos();
        let s = radians.sin();
        Self::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn from_rotation_z_centered(radians: f32, center: Vector3) -> Self {
        let mut m = Self::from_rotation_z(radians);
        let (c, s) = (m.m11, m.m12);
        m.m41 = center.x * (1.0 - c) + center.y * s;
        m.m42 = center.y * (1.0 - c) - center.x * s;
        m
    }

    /// `axis` must be normalized by the caller.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let sa = angle.sin();
        let ca = angle.cos();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);

        Self::new(
            xx + ca * (1.0 - xx),
            xy - ca * xy + sa * z,
            xz - ca * xz - sa * y,
            0.0,
            xy - ca * xy - sa * z,
            yy + ca * (1.0 - yy),
            yz - ca * yz + sa * x,
            0.0,
            xz - ca * xz + sa * y,
            yz - ca * yz - sa * x,
            zz + ca * (1.0 - zz),
            0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn from_quaternion(q: Quaternion) -> Self {
        let xx = q.x * q.x;
        let yy = q.y * q.y;
        let zz = q.z * q.z;
        let xy = q.x * q.y;
        let wz = q.z * q.w;
        let xz = q.z * q.x;
        let wy = q.y * q.w;
        let yz = q.y * q.z;
        let wx = q.x * q.w;

        Self::new(
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (zz + xx),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (yy + xx),
            0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::from_quaternion(Quaternion::from_yaw_pitch_roll(yaw, pitch, roll))
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let zaxis = (eye - target).normalize();
        let xaxis = up.cross(zaxis).normalize();
        let yaxis = zaxis.cross(xaxis);

        Self::new(
            xaxis.x, yaxis.x, zaxis.x, 0.0,
            xaxis.y, yaxis.y, zaxis.y, 0.0,
            xaxis.z, yaxis.z, zaxis.z, 0.0,
            -xaxis.dot(eye), -yaxis.dot(eye), -zaxis.dot(eye), 1.0,
        )
    }

    /// Right-handed perspective projection from a vertical field of view
    /// (radians, exclusive (0, pi)) and width/height aspect ratio.
    pub fn perspective_fov(
        field_of_view: f32,
        aspect_ratio: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Result<Self, ProjectionError> {
        if field_of_view <= 0.0 || field_of_view >= PI {
            return Err(ProjectionError::FieldOfView(field_of_view));
        }
        Self::check_planes(near_plane, far_plane)?;

        let y_scale = 1.0 / (field_of_view * 0.5).tan();
        let x_scale = y_scale / aspect_ratio;
        let neg_far_range = far_plane / (near_plane - far_plane);

        Ok(Self::new(
            x_scale, 0.0, 0.0, 0.0,
            0.0, y_scale, 0.0, 0.0,
            0.0, 0.0, neg_far_range, -1.0,
            0.0, 0.0, near_plane * neg_far_range, 0.0,
        ))
    }

    /// Right-handed perspective projection from near-plane view volume
    /// dimensions.
    pub fn perspective(
        width: f32,
        height: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Result<Self, ProjectionError> {
        Self::check_planes(near_plane, far_plane)?;

        let neg_far_range = far_plane / (near_plane - far_plane);
        Ok(Self::new(
            2.0 * near_plane / width, 0.0, 0.0, 0.0,
            0.0, 2.0 * near_plane / height, 0.0, 0.0,
            0.0, 0.0, neg_far_range, -1.0,
            0.0, 0.0, near_plane * neg_far_range, 0.0,
        ))
    }

    pub fn perspective_off_center(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Result<Self, ProjectionError> {
        Self::check_planes(near_plane, far_plane)?;

        let neg_far_range = far_plane / (near_plane - far_plane);
        Ok(Self::new(
            2.0 * near_plane / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 * near_plane / (top - bottom), 0.0, 0.0,
            (left + right) / (right - left),
            (top + bottom) / (top - bottom),
            neg_far_range,
            -1.0,
            0.0, 0.0, near_plane * neg_far_range, 0.0,
        ))
    }

    fn check_planes(near_plane: f32, far_plane: f32) -> Result<(), ProjectionError> {
        if near_plane <= 0.0 {
            return Err(ProjectionError::NearPlane(near_plane));
        }
        if far_plane <= 0.0 {
            return Err(ProjectionError::FarPlane(far_plane));
        }
        if near_plane >= far_plane {
            return Err(ProjectionError::PlaneOrder {
                near: near_plane,
                far: far_plane,
            });
        }
        Ok(())
    }

    /// Orthographic projection centered on the origin. No preconditions;
    /// degenerate dimensions produce IEEE infinities.
    pub fn orthographic(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(
            2.0 / width, 0.0, 0.0, 0.0,
            0.0, 2.0 / height, 0.0, 0.0,
            0.0, 0.0, 1.0 / (z_near - z_far), 0.0,
            0.0, 0.0, z_near / (z_near - z_far), 1.0,
        )
    }

    pub fn orthographic_off_center(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::new(
            2.0 / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 / (top - bottom), 0.0, 0.0,
            0.0, 0.0, 1.0 / (z_near - z_far), 0.0,
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            z_near / (z_near - z_far),
            1.0,
        )
    }

    /// Exact comparison, so a NaN component never counts as identity.
    pub fn is_identity(self) -> bool {
        self.m11 == 1.0 && self.m22 == 1.0 && self.m33 == 1.0 && self.m44 == 1.0
            && self.m12 == 0.0 && self.m13 == 0.0 && self.m14 == 0.0
            && self.m21 == 0.0 && self.m23 == 0.0 && self.m24 == 0.0
            && self.m31 == 0.0 && self.m32 == 0.0 && self.m34 == 0.0
            && self.m41 == 0.0 && self.m42 == 0.0 && self.m43 == 0.0
    }

    pub fn translation(self) -> Vector3 {
        Vector3::new(self.m41, self.m42, self.m43)
    }

    pub fn transpose(self) -> Self {
        Self::new(
            self.m11, self.m21, self.m31, self.m41,
            self.m12, self.m22, self.m32, self.m42,
            self.m13, self.m23, self.m33, self.m43,
            self.m14, self.m24, self.m34, self.m44,
        )
    }

    /// Cofactor expansion along the first row, sharing the six 2x2
    /// sub-determinants of the lower rows.
    pub fn determinant(self) -> f32 {
        let (a, b, c, d) = (self.m11, self.m12, self.m13, self.m14);
        let (e, f, g, h) = (self.m21, self.m22, self.m23, self.m24);
        let (i, j, k, l) = (self.m31, self.m32, self.m33, self.m34);
        let (m, n, o, p) = (self.m41, self.m42, self.m43, self.m44);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn)
            - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Adjugate-based inverse with shared 2x2 sub-products. `None` when the
    /// determinant is zero (or subnormal-tiny); combine with
    /// [`Matrix4x4::NAN`] to get the propagate-NaN-on-failure behavior.
    pub fn inverse(self) -> Option<Self> {
        let (a, b, c, d) = (self.m11, self.m12, self.m13, self.m14);
        let (e, f, g, h) = (self.m21, self.m22, self.m23, self.m24);
        let (i, j, k, l) = (self.m31, self.m32, self.m33, self.m34);
        let (m, n, o, p) = (self.m41, self.m42, self.m43, self.m44);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        let a11 = f * kp_lo - g * jp_ln + h * jo_kn;
        let a12 = -(e * kp_lo - g * ip_lm + h * io_km);
        let a13 = e * jp_ln - f * ip_lm + h * in_jm;
        let a14 = -(e * jo_kn - f * io_km + g * in_jm);

        let det = a * a11 + b * a12 + c * a13 + d * a14;
        if det.abs() < DET_EPSILON {
            log::trace!("singular 4x4 matrix, determinant {det}");
            return None;
        }
        let inv_det = 1.0 / det;

        let gp_ho = g * p - h * o;
        let fp_hn = f * p - h * n;
        let fo_gn = f * o - g * n;
        let ep_hm = e * p - h * m;
        let eo_gm = e * o - g * m;
        let en_fm = e * n - f * m;

        let gl_hk = g * l - h * k;
        let fl_hj = f * l - h * j;
        let fk_gj = f * k - g * j;
        let el_hi = e * l - h * i;
        let ek_gi = e * k - g * i;
        let ej_fi = e * j - f * i;

        Some(Self::new(
            a11 * inv_det,
            -(b * kp_lo - c * jp_ln + d * jo_kn) * inv_det,
            (b * gp_ho - c * fp_hn + d * fo_gn) * inv_det,
            -(b * gl_hk - c * fl_hj + d * fk_gj) * inv_det,
            a12 * inv_det,
            (a * kp_lo - c * ip_lm + d * io_km) * inv_det,
            -(a * gp_ho - c * ep_hm + d * eo_gm) * inv_det,
            (a * gl_hk - c * el_hi + d * ek_gi) * inv_det,
            a13 * inv_det,
            -(a * jp_ln - b * ip_lm + d * in_jm) * inv_det,
            (a * fp_hn - b * ep_hm + d * en_fm) * inv_det,
            -(a * fl_hj - b * el_hi + d * ej_fi) * inv_det,
            a14 * inv_det,
            (a * jo_kn - b * io_km + c * in_jm) * inv_det,
            -(a * fo_gn - b * eo_gm + c * en_fm) * inv_det,
            (a * fk_gj - b * ek_gi + c * ej_fi) * inv_det,
        ))
    }

    /// Splits the matrix into scale, rotation and translation.
    ///
    /// Scales are the lengths of the first three rows. The rows are
    /// normalized in order of decreasing scale; a near-zero row falls back
    /// to the matching canonical axis (or a cross product of the already
    /// recovered rows) so the basis stays usable. A negative basis
    /// determinant marks a left-handed system and is repaired by negating
    /// one scale and its row. Returns `None` when the cleaned-up basis is
    /// still not a pure rotation (shear or perspective terms).
    pub fn decompose(self) -> Option<(Vector3, Quaternion, Vector3)> {
        const CANONICAL: [Vector3; 3] = [Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::UNIT_Z];

        let translation = self.translation();

        let mut basis = [
            Vector3::new(self.m11, self.m12, self.m13),
            Vector3::new(self.m21, self.m22, self.m23),
            Vector3::new(self.m31, self.m32, self.m33),
        ];
        let mut scales = [basis[0].length(), basis[1].length(), basis[2].length()];

        // rank rows so the most reliable one is normalized first
        let (x, y, z) = (scales[0], scales[1], scales[2]);
        let (a, b, c) = if x < y {
            if y < z {
                (2, 1, 0)
            } else if x < z {
                (1, 2, 0)
            } else {
                (1, 0, 2)
            }
        } else if x < z {
            (2, 0, 1)
        } else if y < z {
            (0, 2, 1)
        } else {
            (0, 1, 2)
        };

        if scales[a] < DECOMPOSE_EPSILON {
            basis[a] = CANONICAL[a];
        }
        basis[a] = basis[a].normalize();

        if scales[b] < DECOMPOSE_EPSILON {
            // rebuild from the canonical axis least aligned with basis[a]
            let abs_x = basis[a].x.abs();
            let abs_y = basis[a].y.abs();
            let abs_z = basis[a].z.abs();
            let cc = if abs_x < abs_y {
                if abs_y < abs_z {
                    0
                } else if abs_x < abs_z {
                    0
                } else {
                    2
                }
            } else if abs_x < abs_z {
                1
            } else if abs_y < abs_z {
                1
            } else {
                2
            };
            basis[b] = basis[a].cross(CANONICAL[cc]);
        }
        basis[b] = basis[b].normalize();

        if scales[c] < DECOMPOSE_EPSILON {
            basis[c] = basis[a].cross(basis[b]);
        }
        basis[c] = basis[c].normalize();

        let mut det = basis[0].dot(basis[1].cross(basis[2]));

        // negative determinant means a left-handed basis; flip one axis
        if det < 0.0 {
            scales[a] = -scales[a];
            basis[a] = -basis[a];
            det = -det;
        }

        let residual = (det - 1.0) * (det - 1.0);
        if residual > DECOMPOSE_EPSILON {
            log::debug!("decompose: non-SRT matrix, residual {residual}");
            return None;
        }

        let rotation_matrix = Self::new(
            basis[0].x, basis[0].y, basis[0].z, 0.0,
            basis[1].x, basis[1].y, basis[1].z, 0.0,
            basis[2].x, basis[2].y, basis[2].z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let rotation = Quaternion::from_rotation_matrix(&rotation_matrix);

        Some((
            Vector3::new(scales[0], scales[1], scales[2]),
            rotation,
            translation,
        ))
    }

    /// Applies the quaternion's rotation after this transform.
    pub fn rotate_by(self, rotation: Quaternion) -> Self {
        self * Self::from_quaternion(rotation)
    }

    /// Affine point transform (`w` = 1 row), no perspective divide.
    pub fn transform_point(self, point: Vector3) -> Vector3 {
        Vector3::new(
            point.x * self.m11 + point.y * self.m21 + point.z * self.m31 + self.m41,
            point.x * self.m12 + point.y * self.m22 + point.z * self.m32 + self.m42,
            point.x * self.m13 + point.y * self.m23 + point.z * self.m33 + self.m43,
        )
    }

    /// Direction transform: linear part only, translation row ignored.
    pub fn transform_vector(self, vector: Vector3) -> Vector3 {
        Vector3::new(
            vector.x * self.m11 + vector.y * self.m21 + vector.z * self.m31,
            vector.x * self.m12 + vector.y * self.m22 + vector.z * self.m32,
            vector.x * self.m13 + vector.y * self.m23 + vector.z * self.m33,
        )
    }

    /// 2D point transform through the embedded xy-plane.
    pub fn transform_point2(self, point: Vector2) -> Vector2 {
        Vector2::new(
            point.x * self.m11 + point.y * self.m21 + self.m41,
            point.x * self.m12 + point.y * self.m22 + self.m42,
        )
    }

    pub fn lerp(self, other: Self, amount: f32) -> Self {
        let a: [[f32; 4]; 4] = self.into();
        let b: [[f32; 4]; 4] = other.into();
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = a[row][col] + (b[row][col] - a[row][col]) * amount;
            }
        }
        out.into()
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-vector composition: `a * b` applies `a` first.
impl Mul for Matrix4x4 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let a: [[f32; 4]; 4] = self.into();
        let b: [[f32; 4]; 4] = other.into();
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = a[row][0] * b[0][col]
                    + a[row][1] * b[1][col]
                    + a[row][2] * b[2][col]
                    + a[row][3] * b[3][col];
            }
        }
        out.into()
    }
}

impl Mul<f32> for Matrix4x4 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        let a: [[f32; 4]; 4] = self.into();
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = a[row][col] * scalar;
            }
        }
        out.into()
    }
}

impl Add for Matrix4x4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let a: [[f32; 4]; 4] = self.into();
        let b: [[f32; 4]; 4] = other.into();
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = a[row][col] + b[row][col];
            }
        }
        out.into()
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        let a: [[f32; 4]; 4] = self.into();
        let b: [[f32; 4]; 4] = other.into();
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = a[row][col] - b[row][col];
            }
        }
        out.into()
    }
}

impl Neg for Matrix4x4 {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {{M11:{} M12:{} M13:{} M14:{}}} {{M21:{} M22:{} M23:{} M24:{}}} \
             {{M31:{} M32:{} M33:{} M34:{}}} {{M41:{} M42:{} M43:{} M44:{}}} }}",
            self.m11, self.m12, self.m13, self.m14,
            self.m21, self.m22, self.m23, self.m24,
            self.m31, self.m32, self.m33, self.m34,
            self.m41, self.m42, self.m43, self.m44,
        )
    }
}

impl From<Matrix4x4> for [[f32; 4]; 4] {
    fn from(m: Matrix4x4) -> Self {
        [
            [m.m11, m.m12, m.m13, m.m14],
            [m.m21, m.m22, m.m23, m.m24],
            [m.m31, m.m32, m.m33, m.m34],
            [m.m41, m.m42, m.m43, m.m44],
        ]
    }
}

impl From<[[f32; 4]; 4]> for Matrix4x4 {
    fn from(d: [[f32; 4]; 4]) -> Self {
        Self::new(
            d[0][0], d[0][1], d[0][2], d[0][3],
            d[1][0], d[1][1], d[1][2], d[1][3],
            d[2][0], d[2][1], d[2][2], d[2][3],
            d[3][0], d[3][1], d[3][2], d[3][3],
        )
    }
}

unsafe impl bytemuck::Pod for Matrix4x4 {}
unsafe impl bytemuck::Zeroable for Matrix4x4 {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_close(a: Matrix4x4, b: Matrix4x4, tolerance: f32) {
        let a: [[f32; 4]; 4] = a.into();
        let b: [[f32; 4]; 4] = b.into();
        for row in 0..4 {
            for col in 0..4 {
                assert!(
                    (a[row][col] - b[row][col]).abs() < tolerance,
                    "[{row}][{col}]: {} vs {}",
                    a[row][col],
                    b[row][col]
                );
            }
        }
    }

    fn affine_sample() -> Matrix4x4 {
        Matrix4x4::from_nonuniform_scale(2.0, 3.0, 0.5)
            * Matrix4x4::from_yaw_pitch_roll(0.4, -0.2, 0.9)
            * Matrix4x4::from_translation(Vector3::new(5.0, -1.0, 2.5))
    }

    #[test]
    fn identity_laws() {
        let m = affine_sample();
        assert_eq!(m * Matrix4x4::IDENTITY, m);
        assert_eq!(Matrix4x4::IDENTITY * m, m);
        assert!(Matrix4x4::IDENTITY.is_identity());
        assert!(!m.is_identity());
    }

    #[test]
    fn inverse_round_trips() {
        let cases = [
            Matrix4x4::from_rotation_y(0.8),
            Matrix4x4::from_nonuniform_scale(2.0, 0.25, 8.0),
            Matrix4x4::from_translation(Vector3::new(-3.0, 6.0, 1.0)),
            affine_sample(),
        ];
        for m in cases {
            let inv = m.inverse().unwrap();
            assert_close(m * inv, Matrix4x4::IDENTITY, 1e-4);
        }
    }

    #[test]
    fn inverse_round_trips_random_affine() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let m = Matrix4x4::from_nonuniform_scale(
                rng.random_range(0.2..4.0),
                rng.random_range(0.2..4.0),
                rng.random_range(0.2..4.0),
            ) * Matrix4x4::from_yaw_pitch_roll(
                rng.random_range(-3.0..3.0),
                rng.random_range(-1.5..1.5),
                rng.random_range(-3.0..3.0),
            ) * Matrix4x4::from_translation(Vector3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            ));
            let inv = m.inverse().unwrap();
            assert_close(m * inv, Matrix4x4::IDENTITY, 1e-3);
        }
    }

    #[test]
    fn determinant_of_inverse_is_reciprocal() {
        let m = affine_sample();
        let inv = m.inverse().unwrap();
        assert!((inv.determinant() - 1.0 / m.determinant()).abs() < 1e-3);
    }

    #[test]
    fn determinant_of_scale_is_product() {
        let m = Matrix4x4::from_nonuniform_scale(2.0, 3.0, 4.0);
        assert!((m.determinant() - 24.0).abs() < 1e-5);
    }

    #[test]
    fn singular_matrix_detected() {
        // third row is twice the first
        let m = Matrix4x4::new(
            1.0, 2.0, 3.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            2.0, 4.0, 6.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverse().is_none());
        assert!(Matrix4x4::NAN.m44.is_nan());
    }

    #[test]
    fn transpose_is_involution() {
        let m = affine_sample();
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn transform_point_vs_vector() {
        let m = Matrix4x4::from_translation(Vector3::new(10.0, 20.0, 30.0));
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(p), Vector3::new(11.0, 22.0, 33.0));
        assert_eq!(m.transform_vector(p), p);
    }

    #[test]
    fn matrix3x2_embedding_matches_2d_transform() {
        let flat = Matrix3x2::from_rotation(0.6) * Matrix3x2::from_translation_xy(2.0, -1.0);
        let lifted = Matrix4x4::from_matrix3x2(flat);
        let p = Vector2::new(3.0, 4.0);
        let expected = flat.transform_point(p);
        let got = lifted.transform_point2(p);
        assert!((got - expected).length() < 1e-6);
    }

    #[test]
    fn rotation_constructors_agree() {
        let angle = 0.77;
        assert_close(
            Matrix4x4::from_rotation_x(angle),
            Matrix4x4::from_axis_angle(Vector3::UNIT_X, angle),
            1e-6,
        );
        assert_close(
            Matrix4x4::from_rotation_y(angle),
            Matrix4x4::from_axis_angle(Vector3::UNIT_Y, angle),
            1e-6,
        );
        assert_close(
            Matrix4x4::from_rotation_z(angle),
            Matrix4x4::from_axis_angle(Vector3::UNIT_Z, angle),
            1e-6,
        );
    }

    #[test]
    fn quaternion_and_matrix_rotation_agree() {
        let q = Quaternion::from_yaw_pitch_roll(0.3, -0.6, 1.2);
        let m = Matrix4x4::from_quaternion(q);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!((m.transform_vector(v) - v.rotate(q)).length() < 1e-5);
    }

    #[test]
    fn rotation_centered_keeps_center_fixed() {
        let center = Vector3::new(1.0, 2.0, 3.0);
        for m in [
            Matrix4x4::from_rotation_x_centered(0.9, center),
            Matrix4x4::from_rotation_y_centered(-1.3, center),
            Matrix4x4::from_rotation_z_centered(2.1, center),
            Matrix4x4::from_scale_centered(2.5, center),
        ] {
            assert!((m.transform_point(center) - center).length() < 1e-5);
        }
    }

    #[test]
    fn decompose_recovers_srt() {
        let scale = Vector3::new(2.0, 3.0, 0.5);
        let rotation = Quaternion::from_yaw_pitch_roll(0.5, -0.4, 1.1);
        let translation = Vector3::new(4.0, -2.0, 7.0);

        let m = Matrix4x4::from_nonuniform_scale(scale.x, scale.y, scale.z)
            * Matrix4x4::from_quaternion(rotation)
            * Matrix4x4::from_translation(translation);

        let (s, r, t) = m.decompose().unwrap();
        assert!((s - scale).length() < 1e-4);
        assert!((t - translation).length() < 1e-4);
        // q and -q encode the same rotation
        let aligned = if r.dot(rotation) < 0.0 { -r } else { r };
        assert!((aligned.x - rotation.x).abs() < 1e-3);
        assert!((aligned.y - rotation.y).abs() < 1e-3);
        assert!((aligned.z - rotation.z).abs() < 1e-3);
        assert!((aligned.w - rotation.w).abs() < 1e-3);
    }

    #[test]
    fn decompose_compose_round_trip() {
        let m = affine_sample();
        let (s, r, t) = m.decompose().unwrap();
        let rebuilt = Matrix4x4::from_nonuniform_scale(s.x, s.y, s.z)
            * Matrix4x4::from_quaternion(r)
            * Matrix4x4::from_translation(t);
        assert_close(rebuilt, m, 1e-3);
    }

    #[test]
    fn decompose_repairs_left_handed_basis() {
        let m = Matrix4x4::from_nonuniform_scale(-2.0, 3.0, 4.0);
        let (s, r, _) = m.decompose().unwrap();
        // one scale carries the sign, the rotation stays proper
        assert!((s.x.abs() * s.y.abs() * s.z.abs() - 24.0).abs() < 1e-3);
        assert!(s.x < 0.0 || s.y < 0.0 || s.z < 0.0);
        let rebuilt = Matrix4x4::from_nonuniform_scale(s.x, s.y, s.z)
            * Matrix4x4::from_quaternion(r);
        assert_close(rebuilt, m, 1e-3);
    }

    #[test]
    fn decompose_rejects_shear() {
        let mut m = Matrix4x4::IDENTITY;
        m.m21 = 1.5; // shear x by y
        assert!(m.decompose().is_none());
    }

    #[test]
    fn decompose_zero_scale_falls_back_to_canonical_axis() {
        let m = Matrix4x4::from_nonuniform_scale(3.0, 0.0, 2.0);
        let (s, r, _) = m.decompose().unwrap();
        // the rebuilt basis may flip a sign to stay right-handed, so only
        // the magnitudes are pinned down
        assert!(s.y.abs() < 1e-6);
        assert!((s.x.abs() - 3.0).abs() < 1e-4 && (s.z.abs() - 2.0).abs() < 1e-4);
        // degenerate row is replaced, rotation must still be a unit quaternion
        assert!((r.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_fov_validates_parameters() {
        assert_eq!(
            Matrix4x4::perspective_fov(0.0, 1.0, 0.1, 10.0),
            Err(ProjectionError::FieldOfView(0.0))
        );
        assert_eq!(
            Matrix4x4::perspective_fov(PI, 1.0, 0.1, 10.0),
            Err(ProjectionError::FieldOfView(PI))
        );
        assert_eq!(
            Matrix4x4::perspective_fov(1.0, 1.0, -0.1, 10.0),
            Err(ProjectionError::NearPlane(-0.1))
        );
        assert_eq!(
            Matrix4x4::perspective_fov(1.0, 1.0, 0.1, -10.0),
            Err(ProjectionError::FarPlane(-10.0))
        );
        assert_eq!(
            Matrix4x4::perspective_fov(1.0, 1.0, 10.0, 0.1),
            Err(ProjectionError::PlaneOrder { near: 10.0, far: 0.1 })
        );
    }

    #[test]
    fn perspective_fov_maps_near_and_far_planes() {
        let m = Matrix4x4::perspective_fov(PI / 2.0, 1.0, 1.0, 100.0).unwrap();
        // points on the near/far planes land on z = 0 and z = depth * w
        let near = crate::Vector4::new(0.0, 0.0, -1.0, 1.0).transform(&m);
        assert!((near.z / near.w).abs() < 1e-5);
        let far = crate::Vector4::new(0.0, 0.0, -100.0, 1.0).transform(&m);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
        // unit fov at aspect 1: x and y scales match
        assert!((m.m11 - m.m22).abs() < 1e-6);
    }

    #[test]
    fn perspective_validates_planes() {
        assert!(Matrix4x4::perspective(2.0, 2.0, 1.0, 10.0).is_ok());
        assert_eq!(
            Matrix4x4::perspective(2.0, 2.0, 0.0, 10.0),
            Err(ProjectionError::NearPlane(0.0))
        );
        assert!(Matrix4x4::perspective_off_center(-1.0, 1.0, -1.0, 1.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn orthographic_maps_extents_to_unit_box() {
        let m = Matrix4x4::orthographic(8.0, 6.0, 1.0, 11.0);
        let p = m.transform_point(Vector3::new(4.0, -3.0, -11.0));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);

        let off = Matrix4x4::orthographic_off_center(-4.0, 4.0, -3.0, 3.0, 1.0, 11.0);
        assert_close(off, m, 1e-6);
    }

    #[test]
    fn look_at_puts_eye_at_origin_facing_negative_z() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let m = Matrix4x4::look_at(eye, Vector3::ZERO, Vector3::UNIT_Y);
        assert!((m.transform_point(eye)).length() < 1e-6);
        let target_in_view = m.transform_point(Vector3::ZERO);
        assert!((target_in_view - Vector3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn rotate_by_composes_after() {
        let m = Matrix4x4::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let q = Quaternion::from_axis_angle(Vector3::UNIT_Z, PI / 2.0);
        let p = m.rotate_by(q).transform_point(Vector3::ZERO);
        // translate to (1, 0, 0), then rotate onto the y axis
        assert!((p - Vector3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn nan_matrix_is_never_identity() {
        let mut m = Matrix4x4::IDENTITY;
        m.m23 = f32::NAN;
        assert!(m != m);
        assert!(!m.is_identity());
    }

    #[test]
    fn lerp_halfway() {
        let a = Matrix4x4::from_scale(1.0);
        let b = Matrix4x4::from_scale(3.0);
        assert_close(a.lerp(b, 0.5), Matrix4x4::from_scale(2.0), 1e-6);
    }
}
