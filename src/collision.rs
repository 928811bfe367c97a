//! AABB collision queries.
//!
//! The per-frame policy is robot-centric: only robots and the objects they
//! touch are reported. Two obstacles overlapping each other is not a
//! collision as far as the frame report is concerned.

use rustc_hash::FxHashSet;

use crate::geometry::{bounding_box_of, Aabb};
use crate::scene::{ObjectType, SceneObject};

/// Closed-interval overlap test on all three axes.
#[inline]
#[must_use]
pub fn boxes_intersect(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Whether the bounding boxes of two objects overlap or touch.
#[must_use]
pub fn objects_collide(a: &SceneObject, b: &SceneObject) -> bool {
    boxes_intersect(&bounding_box_of(a), &bounding_box_of(b))
}

/// Every object in `all` (other than `object` itself, by id) whose box
/// touches `object`'s box, in input order.
#[must_use]
pub fn colliders_of<'a>(
    object: &SceneObject,
    all: &'a [SceneObject],
) -> Vec<&'a SceneObject> {
    let bb = bounding_box_of(object);
    all.iter()
        .filter(|other| other.id != object.id)
        .filter(|other| boxes_intersect(&bb, &bounding_box_of(other)))
        .collect()
}

/// Ids to flag as colliding this frame: for every robot that touches
/// anything, the robot itself plus each object it touches.
///
/// Ids appear once, in first-seen order (robots in input order, each
/// followed by its colliders).
#[must_use]
pub fn robot_colliding_ids(objects: &[SceneObject]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut ids = Vec::new();
    for robot in objects.iter().filter(|o| o.is(ObjectType::Robot)) {
        let colliders = colliders_of(robot, objects);
        if colliders.is_empty() {
            continue;
        }
        let hit_ids = colliders.iter().map(|c| &c.id);
        for id in std::iter::once(&robot.id).chain(hit_ids) {
            if seen.insert(id.as_str()) {
                ids.push(id.clone());
            }
        }
    }
    ids
}
