//! Row-vector 2D/3D math for canvas-style renderers.
//!
//! Plain `#[repr(C)]` float structs with value semantics: vectors, a 2D
//! affine matrix, a full 4x4 matrix, quaternions and planes. Vectors are
//! rows, so transforming computes `v * M` and `A * B` applies `A` first.
//!
//! There is no input validation outside the projection constructors;
//! division by zero, zero-length normalization and NaN inputs follow IEEE
//! 754 rules and propagate through downstream math.

mod error;
mod matrix3x2;
mod matrix4x4;
mod plane;
mod quaternion;
mod vector2;
mod vector3;
mod vector4;

pub use error::ProjectionError;
pub use matrix3x2::Matrix3x2;
pub use matrix4x4::Matrix4x4;
pub use plane::Plane;
pub use quaternion::Quaternion;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;

pub const PI: f32 = std::f32::consts::PI;
pub const TAU: f32 = std::f32::consts::TAU;

// Smallest positive f32 (~1.4e-45). Deliberately permissive singularity
// threshold: only a determinant that is exactly zero (or subnormal-tiny)
// counts as singular.
pub(crate) const DET_EPSILON: f32 = f32::from_bits(1);
