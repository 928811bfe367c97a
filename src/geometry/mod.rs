//! Bounding-box oracle.
//!
//! Every object is approximated by an axis-aligned box centered on its
//! position. Half-extents are fixed per object type and scaled per axis;
//! rotation is ignored.

mod aabb;

pub use aabb::Aabb;
use glam::Vec3;

use crate::scene::{ObjectKind, ObjectType, SceneObject};

/// Half-extents used for objects of unknown type.
pub const DEFAULT_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);

/// Unscaled half-extents for a known object type.
#[must_use]
pub fn half_extents_for(object_type: ObjectType) -> Vec3 {
    match object_type {
        ObjectType::Camera => Vec3::splat(0.25),
        ObjectType::Bin | ObjectType::Obstacle => Vec3::splat(0.5),
        ObjectType::Robot => Vec3::new(0.4, 0.75, 0.4),
        ObjectType::Gripper => Vec3::new(0.15, 0.15, 0.3),
    }
}

/// Unscaled half-extents for an object kind, falling back to
/// [`DEFAULT_HALF_EXTENTS`] for unknown types.
#[must_use]
pub fn half_extents_of(kind: &ObjectKind) -> Vec3 {
    kind.object_type()
        .map_or(DEFAULT_HALF_EXTENTS, half_extents_for)
}

/// World-space AABB of an object: type half-extents scaled by
/// `object.scale`, centered at `object.position`.
#[must_use]
pub fn bounding_box_of(object: &SceneObject) -> Aabb {
    let half = half_extents_of(&object.kind) * object.scale;
    Aabb::from_center_half_extents(object.position, half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(object_type: ObjectType, position: Vec3) -> SceneObject {
        SceneObject::new("o", ObjectKind::default_for(object_type), position)
    }

    #[test]
    fn robot_box_uses_robot_extents() {
        let bb = bounding_box_of(&object(ObjectType::Robot, Vec3::ZERO));
        assert_eq!(bb.min(), Vec3::new(-0.4, -0.75, -0.4));
        assert_eq!(bb.max(), Vec3::new(0.4, 0.75, 0.4));
    }

    #[test]
    fn scale_applies_per_axis() {
        let o = object(ObjectType::Bin, Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 1.0, 0.5));
        let bb = bounding_box_of(&o);
        assert_eq!(bb.min(), Vec3::new(0.0, -0.5, -0.25));
        assert_eq!(bb.max(), Vec3::new(2.0, 0.5, 0.25));
    }

    #[test]
    fn unknown_type_uses_default_extents() {
        let kind = ObjectKind::Other {
            type_name: "conveyor".to_owned(),
            properties: serde_json::Value::Null,
        };
        let o = SceneObject::new("c", kind, Vec3::ZERO);
        assert_eq!(bounding_box_of(&o).max(), DEFAULT_HALF_EXTENTS);
    }

    #[test]
    fn rotation_does_not_change_box() {
        let o = object(ObjectType::Gripper, Vec3::ZERO)
            .with_rotation(Vec3::new(0.0, 1.2, 0.0));
        let bb = bounding_box_of(&o);
        assert_eq!(bb.max(), Vec3::new(0.15, 0.15, 0.3));
    }

    #[test]
    fn zero_scale_gives_degenerate_box() {
        let o = object(ObjectType::Camera, Vec3::ONE).with_scale(Vec3::ZERO);
        let bb = bounding_box_of(&o);
        assert_eq!(bb.min(), bb.max());
    }
}
