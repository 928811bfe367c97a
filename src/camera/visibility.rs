//! Camera visibility of scene objects.
//!
//! An object counts as visible when at least one corner of its AABB lies in
//! the camera frustum. A box that straddles the frustum with every corner
//! outside reads as not visible; that gap is accepted.

use super::frustum::Frustum;
use super::projection::CameraProjection;
use crate::geometry::bounding_box_of;
use crate::options::VisionOptions;
use crate::scene::{ObjectType, SceneObject};

/// Visible object ids for one camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraVisibility {
    /// Camera object id.
    pub camera_id: String,
    /// Ids of visible objects, in scene order.
    pub visible_ids: Vec<String>,
}

fn frustum_of(camera: &SceneObject) -> Frustum {
    CameraProjection::for_object(camera, &VisionOptions::default()).frustum()
}

/// Whether `point` is inside `camera`'s frustum (default near/far).
#[must_use]
pub fn point_in_frustum(point: glam::Vec3, camera: &SceneObject) -> bool {
    frustum_of(camera).contains_point(point)
}

/// Corner-sampled visibility against a prebuilt frustum.
#[must_use]
pub fn is_visible_in(object: &SceneObject, frustum: &Frustum) -> bool {
    frustum.contains_any(&bounding_box_of(object).corners())
}

/// Whether any AABB corner of `object` is inside `camera`'s frustum.
#[must_use]
pub fn is_visible(object: &SceneObject, camera: &SceneObject) -> bool {
    is_visible_in(object, &frustum_of(camera))
}

/// Visible share of `object`. Binary for now: 1.0 when [`is_visible`],
/// otherwise 0.0.
#[must_use]
pub fn visibility_fraction(object: &SceneObject, camera: &SceneObject) -> f32 {
    if is_visible(object, camera) {
        1.0
    } else {
        0.0
    }
}

/// Visibility of every non-camera object from every camera, in camera
/// order. Cameras never see other cameras (or themselves).
#[must_use]
pub fn camera_visibility(
    objects: &[SceneObject],
    options: &VisionOptions,
) -> Vec<CameraVisibility> {
    objects
        .iter()
        .filter(|o| o.is(ObjectType::Camera))
        .map(|camera| {
            let frustum =
                CameraProjection::for_object(camera, options).frustum();
            let visible_ids = objects
                .iter()
                .filter(|o| !o.is(ObjectType::Camera))
                .filter(|o| is_visible_in(o, &frustum))
                .map(|o| o.id.clone())
                .collect();
            CameraVisibility {
                camera_id: camera.id.clone(),
                visible_ids,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::ObjectKind;

    fn object(id: &str, object_type: ObjectType, position: Vec3) -> SceneObject {
        SceneObject::new(id, ObjectKind::default_for(object_type), position)
    }

    fn camera() -> SceneObject {
        object("cam", ObjectType::Camera, Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn point_ahead_is_inside() {
        assert!(point_in_frustum(Vec3::new(0.0, 1.0, -5.0), &camera()));
    }

    #[test]
    fn point_past_far_plane_is_outside() {
        assert!(!point_in_frustum(Vec3::new(0.0, 1.0, -12.0), &camera()));
    }

    #[test]
    fn object_in_front_is_visible() {
        let bin = object("bin", ObjectType::Bin, Vec3::new(0.0, 1.0, -4.0));
        assert!(is_visible(&bin, &camera()));
        assert_eq!(visibility_fraction(&bin, &camera()), 1.0);
    }

    #[test]
    fn object_directly_behind_is_not_visible() {
        let cam = camera();
        let forward =
            CameraProjection::for_object(&cam, &VisionOptions::default())
                .forward();
        let behind =
            object("bin", ObjectType::Obstacle, cam.position - forward);
        assert!(!is_visible(&behind, &cam));
        assert_eq!(visibility_fraction(&behind, &cam), 0.0);
    }

    #[test]
    fn rotated_camera_sees_along_its_axis() {
        // Camera turned to face +X.
        let cam = camera().with_rotation(Vec3::new(0.0, -std::f32::consts::FRAC_PI_2, 0.0));
        let ahead = object("a", ObjectType::Bin, Vec3::new(4.0, 1.0, 0.0));
        let old_ahead = object("b", ObjectType::Bin, Vec3::new(0.0, 1.0, -4.0));
        assert!(is_visible(&ahead, &cam));
        assert!(!is_visible(&old_ahead, &cam));
    }

    #[test]
    fn huge_box_around_camera_reads_invisible() {
        // Every corner lies outside the frustum even though the box
        // contains the camera.
        let wall = object("wall", ObjectType::Obstacle, Vec3::new(0.0, 1.0, 0.0))
            .with_scale(Vec3::splat(100.0));
        assert!(!is_visible(&wall, &camera()));
    }

    #[test]
    fn per_frame_visibility_skips_cameras() {
        let objects = vec![
            camera(),
            object("cam2", ObjectType::Camera, Vec3::new(0.0, 1.0, -3.0)),
            object("bin", ObjectType::Bin, Vec3::new(0.0, 1.0, -4.0)),
            object("far", ObjectType::Bin, Vec3::new(0.0, 1.0, -40.0)),
        ];
        let result = camera_visibility(&objects, &VisionOptions::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].camera_id, "cam");
        assert_eq!(result[0].visible_ids, vec!["bin".to_owned()]);
        // cam2 looks down -Z from z=-3: bin at z=-4 is ahead of it.
        assert_eq!(result[1].visible_ids, vec!["bin".to_owned()]);
    }

    #[test]
    fn far_option_extends_range() {
        let objects = vec![
            camera(),
            object("far", ObjectType::Bin, Vec3::new(0.0, 1.0, -40.0)),
        ];
        let options = VisionOptions {
            far: 50.0,
            ..VisionOptions::default()
        };
        let result = camera_visibility(&objects, &options);
        assert_eq!(result[0].visible_ids, vec!["far".to_owned()]);
    }
}
