use thiserror::Error;

/// Rejected parameters for the perspective projection constructors.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    #[error("field of view must be in (0, pi), got {0}")]
    FieldOfView(f32),

    #[error("near plane distance must be positive, got {0}")]
    NearPlane(f32),

    #[error("far plane distance must be positive, got {0}")]
    FarPlane(f32),

    #[error("near plane must be closer than far plane ({near} >= {far})")]
    PlaneOrder { near: f32, far: f32 },
}
