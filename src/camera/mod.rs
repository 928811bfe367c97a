//! Camera frustums and object visibility.
//!
//! Builds a perspective frustum from a camera object's pose, field of view,
//! and resolution, then samples object bounding-box corners against it.

/// View frustum extraction and containment tests.
pub mod frustum;
/// Camera pose and projection matrices.
pub mod projection;
/// Point and object visibility queries.
pub mod visibility;

pub use frustum::{Frustum, Plane};
pub use projection::CameraProjection;
pub use visibility::{
    camera_visibility, is_visible, is_visible_in, point_in_frustum,
    visibility_fraction, CameraVisibility,
};
