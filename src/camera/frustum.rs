//! Camera frustum as six inward-facing planes.

use glam::{Mat4, Vec3, Vec4};

/// Half-space boundary `normal · p + offset = 0`. Points with a positive
/// signed distance are on the inner side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the frustum.
    pub normal: Vec3,
    /// Plane offset along the normal.
    pub offset: f32,
}

impl Plane {
    /// Plane from raw `(a, b, c, d)` coefficients, normalized. A zero normal
    /// yields a plane that contains every point.
    #[must_use]
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self {
                normal: normal / len,
                offset: coefficients.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                offset: 0.0,
            }
        }
    }

    /// Signed distance from `point` (positive = inside).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }
}

/// Perspective view volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Gribb/Hartmann plane extraction from a right-handed view-projection
    /// matrix with [0,1] depth.
    pub fn from_view_projection(vp: Mat4) -> Self {
        let [x, y, z, w] = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];
        // [0,1] depth: the near plane is the z row alone.
        Self {
            planes: [w + x, w - x, w + y, w - y, z, w - z]
                .map(Plane::from_coefficients),
        }
    }

    /// Whether `point` is inside all six planes. Points on a plane count.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Whether at least one of `points` is inside.
    #[must_use]
    pub fn contains_any(&self, points: &[Vec3]) -> bool {
        points.iter().any(|&p| self.contains_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_at_origin() -> Frustum {
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn origin_inside_and_behind_outside() {
        let frustum = looking_at_origin();
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn planes_face_inward() {
        let frustum = looking_at_origin();
        for plane in &frustum.planes {
            assert!(plane.distance_to_point(Vec3::ZERO) > 0.0);
            assert!((plane.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_plane_contains_everything() {
        let plane = Plane::from_coefficients(Vec4::new(0.0, 0.0, 0.0, 3.0));
        assert_eq!(plane.distance_to_point(Vec3::splat(100.0)), 0.0);
    }

    #[test]
    fn point_beyond_far_plane() {
        let frustum = looking_at_origin();
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -200.0)));
    }

    #[test]
    fn any_point_inside() {
        let frustum = looking_at_origin();
        let behind = Vec3::new(0.0, 0.0, 20.0);
        assert!(frustum.contains_any(&[behind, Vec3::ZERO]));
        assert!(!frustum.contains_any(&[behind]));
        assert!(!frustum.contains_any(&[]));
    }
}
