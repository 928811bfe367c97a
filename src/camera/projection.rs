use glam::{EulerRot, Mat4, Quat, Vec3};

use super::frustum::Frustum;
use crate::options::VisionOptions;
use crate::scene::SceneObject;

/// Perspective camera defined by a world pose and projection parameters.
///
/// The camera looks down its local −Z axis with +Y up; the pose rotation is
/// Euler XYZ, the same convention every other object uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjection {
    /// Camera position in world space.
    pub position: Vec3,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl CameraProjection {
    /// Projection for a scene object. Camera objects contribute their own
    /// field of view and resolution; anything else uses the defaults from
    /// `options`.
    #[must_use]
    pub fn for_object(object: &SceneObject, options: &VisionOptions) -> Self {
        let (fovy, aspect) = object.as_camera().map_or(
            (options.default_fov, options.default_aspect()),
            |camera| (camera.fov, camera.resolution.aspect()),
        );
        Self {
            position: object.position,
            rotation: object.rotation,
            aspect,
            fovy,
            znear: options.near,
            zfar: options.far,
        }
    }

    /// Orientation as a quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// World-space viewing direction (unit length).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// World-to-camera transform.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
            .inverse()
    }

    /// Projection matrix ([0,1] depth range).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Six-plane frustum of this camera.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.build_matrix())
    }
}
