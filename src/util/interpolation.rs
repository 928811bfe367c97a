//! Interpolation primitives shared by the path interpolator and the
//! attachment propagator.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Position plus Euler XYZ rotation (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
}

impl Pose {
    /// Pose from a position and rotation.
    #[must_use]
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

/// Lerp two positions component-wise.
#[inline]
#[must_use]
pub fn lerp_position(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Lerp two angles (radians) along the shorter arc.
///
/// A raw delta larger than π is reduced by 2π (and a delta below −π is
/// raised by 2π) before interpolating, so `3.0 → -3.0` crosses the ±π seam
/// instead of sweeping through zero. The result is not re-wrapped.
#[inline]
#[must_use]
pub fn lerp_angle(start: f32, end: f32, t: f32) -> f32 {
    let mut delta = end - start;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    start + delta * t
}

/// Per-axis [`lerp_angle`] over an Euler rotation.
#[inline]
#[must_use]
pub fn lerp_rotation(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        lerp_angle(start.x, end.x, t),
        lerp_angle(start.y, end.y, t),
        lerp_angle(start.z, end.z, t),
    )
}

/// Interpolate both halves of a pose.
#[must_use]
pub fn lerp_pose(start: &Pose, end: &Pose, t: f32) -> Pose {
    Pose {
        position: lerp_position(start.position, end.position, t),
        rotation: lerp_rotation(start.rotation, end.rotation, t),
    }
}
