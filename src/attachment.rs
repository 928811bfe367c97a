//! End-effector propagation to attached grippers and eye-in-hand cameras.
//!
//! Attachments are one level deep and resolved by id through a robot index
//! built per pass. A dependent whose parent id is missing or dangling is left
//! where it is.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::scene::{CameraType, ObjectKind, SceneObject};
use crate::util::interpolation::Pose;

/// World-space end-effector position of `robot`.
///
/// The offset is added in world axes; robot rotation does not turn it.
/// Non-robot objects report their own position.
#[must_use]
pub fn end_effector_position(robot: &SceneObject) -> Vec3 {
    robot
        .as_robot()
        .map_or(robot.position, |props| {
            robot.position + props.end_effector_offset()
        })
}

/// End-effector pose of `robot`: end-effector position, robot rotation.
#[must_use]
pub fn end_effector_pose(robot: &SceneObject) -> Pose {
    Pose::new(end_effector_position(robot), robot.rotation)
}

fn parent_of(object: &SceneObject) -> Option<&str> {
    match &object.kind {
        ObjectKind::Gripper(props) => props.parent_robot_id.as_deref(),
        ObjectKind::Camera(props)
            if props.camera_type == CameraType::EyeInHand =>
        {
            props.parent_robot_id.as_deref()
        }
        _ => None,
    }
}

/// Poses to apply to every attached gripper and eye-in-hand camera, keyed by
/// dependent id, in scene order.
#[must_use]
pub fn attachment_updates(objects: &[SceneObject]) -> Vec<(String, Pose)> {
    let robots: FxHashMap<&str, Pose> = objects
        .iter()
        .filter(|o| o.as_robot().is_some())
        .map(|robot| (robot.id.as_str(), end_effector_pose(robot)))
        .collect();
    if robots.is_empty() {
        return Vec::new();
    }

    objects
        .iter()
        .filter_map(|object| {
            let parent = parent_of(object)?;
            let pose = robots.get(parent)?;
            Some((object.id.clone(), *pose))
        })
        .collect()
}

/// Apply [`attachment_updates`] in place.
pub fn propagate(objects: &mut [SceneObject]) {
    let updates: FxHashMap<String, Pose> =
        attachment_updates(objects).into_iter().collect();
    for object in objects.iter_mut() {
        if let Some(pose) = updates.get(&object.id) {
            object.position = pose.position;
            object.rotation = pose.rotation;
        }
    }
}
