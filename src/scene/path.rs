use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::util::interpolation::Pose;
use crate::util::serde_vec3;

/// One pose on a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathWaypoint {
    /// Waypoint id, unique within its path.
    pub id: String,
    /// World-space position.
    #[serde(with = "serde_vec3")]
    pub position: Vec3,
    /// Euler XYZ rotation in radians.
    #[serde(with = "serde_vec3")]
    pub rotation: Vec3,
}

impl PathWaypoint {
    /// Waypoint at `position` with the given rotation.
    #[must_use]
    pub fn new(id: impl Into<String>, position: Vec3, rotation: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            rotation,
        }
    }

    /// The waypoint as a [`Pose`].
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// Ordered waypoints a robot follows during simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Unique path id.
    pub id: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Waypoints in traversal order.
    #[serde(default)]
    pub waypoints: Vec<PathWaypoint>,
    /// Whether the last waypoint connects back to the first.
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Traversal speed in units per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

impl Path {
    /// Empty, non-looping path at unit speed.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            waypoints: Vec::new(),
            looping: false,
            speed: default_speed(),
        }
    }

    /// Builder: append a waypoint with a generated id.
    #[must_use]
    pub fn with_waypoint(mut self, position: Vec3, rotation: Vec3) -> Self {
        let id = format!("{}-wp{}", self.id, self.waypoints.len());
        self.waypoints.push(PathWaypoint::new(id, position, rotation));
        self
    }

    /// Builder: set the loop flag.
    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Builder: set the speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the path has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_flag_uses_wire_name() {
        let path = Path::new("p").looping(true);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["loop"], true);
        assert!(json.get("looping").is_none());
    }

    #[test]
    fn speed_defaults_to_one() {
        let path: Path =
            serde_json::from_str(r#"{"id":"p","waypoints":[]}"#).unwrap();
        assert_eq!(path.speed, 1.0);
        assert!(!path.looping);
        assert!(path.is_empty());
    }

    #[test]
    fn builder_generates_waypoint_ids() {
        let path = Path::new("p")
            .with_waypoint(Vec3::ZERO, Vec3::ZERO)
            .with_waypoint(Vec3::X, Vec3::ZERO);
        assert_eq!(path.len(), 2);
        assert_eq!(path.waypoints[1].id, "p-wp1");
    }
}
