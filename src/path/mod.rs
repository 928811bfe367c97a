//! Path interpolation.
//!
//! A path with `N` waypoints is split into `N - 1` equal slices of progress
//! (`N` when looping, the extra slice closing last → first). Progress within
//! a slice blends position linearly and rotation along the shorter arc per
//! axis. Slices are equal in progress regardless of their length in world
//! units.

pub mod clock;

use crate::error::VisionLabError;
use crate::scene::Path;
use crate::util::interpolation::{lerp_pose, Pose};

/// Wrap (looping) or clamp (one-shot) raw progress into `[0, 1]`.
#[must_use]
pub fn normalize_progress(progress: f32, looping: bool) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    if looping {
        progress.rem_euclid(1.0)
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Pose along `path` at `progress`.
///
/// # Errors
/// [`VisionLabError::EmptyPath`] when the path has no waypoints. A single
/// waypoint is returned as-is for any progress.
pub fn interpolate(path: &Path, progress: f32) -> Result<Pose, VisionLabError> {
    let waypoints = &path.waypoints;
    let (first, last) = match (waypoints.first(), waypoints.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(VisionLabError::EmptyPath {
                path_id: path.id.clone(),
            })
        }
    };
    let count = waypoints.len();
    if count == 1 {
        return Ok(first.pose());
    }

    let progress = normalize_progress(progress, path.looping);
    if !path.looping && progress >= 1.0 {
        return Ok(last.pose());
    }

    let segments = if path.looping { count } else { count - 1 };
    let scaled = progress * segments as f32;
    let mut index = scaled.floor() as usize;
    let mut t = scaled - scaled.floor();
    // Rounding can push `scaled` onto the segment count.
    if index >= segments {
        index = segments - 1;
        t = 1.0;
    }

    let start = &waypoints[index % count];
    let end = &waypoints[(index + 1) % count];
    Ok(lerp_pose(&start.pose(), &end.pose(), t))
}

/// Total straight-line length of the path.
///
/// Looping paths with more than two waypoints include the closing segment.
#[must_use]
pub fn path_length(path: &Path) -> f32 {
    let waypoints = &path.waypoints;
    let open: f32 = waypoints
        .windows(2)
        .map(|pair| pair[0].position.distance(pair[1].position))
        .sum();
    match (path.looping, waypoints.first(), waypoints.last()) {
        (true, Some(first), Some(last)) if waypoints.len() > 2 => {
            open + last.position.distance(first.position)
        }
        _ => open,
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;

    fn square(looping: bool) -> Path {
        Path::new("square")
            .with_waypoint(Vec3::ZERO, Vec3::ZERO)
            .with_waypoint(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO)
            .with_waypoint(Vec3::new(4.0, 0.0, 4.0), Vec3::ZERO)
            .with_waypoint(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO)
            .looping(looping)
    }

    #[test]
    fn empty_path_is_an_error() {
        for progress in [0.0, 0.5, 1.0, 7.0] {
            let err = interpolate(&Path::new("empty"), progress).unwrap_err();
            assert!(matches!(err, VisionLabError::EmptyPath { .. }));
        }
    }

    #[test]
    fn single_waypoint_ignores_progress() {
        let path = Path::new("one")
            .with_waypoint(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        for progress in [0.0, 0.3, 1.0] {
            let pose = interpolate(&path, progress).unwrap();
            assert_eq!(pose, path.waypoints[0].pose());
        }
    }

    #[test]
    fn open_path_midpoints() {
        let path = square(false);
        // Three segments; progress 0.5 sits halfway through the second.
        let pose = interpolate(&path, 0.5).unwrap();
        assert!((pose.position - Vec3::new(4.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn open_path_clamps_progress() {
        let path = square(false);
        assert_eq!(interpolate(&path, -1.0).unwrap(), path.waypoints[0].pose());
        assert_eq!(interpolate(&path, 3.0).unwrap(), path.waypoints[3].pose());
    }

    #[test]
    fn looping_path_closes_back_to_start() {
        let path = square(true);
        // Four segments; 0.875 is halfway along the closing segment.
        let pose = interpolate(&path, 0.875).unwrap();
        assert!((pose.position - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        // Progress wraps.
        let wrapped = interpolate(&path, 1.25).unwrap();
        assert!((wrapped.position - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_takes_short_arc() {
        let path = Path::new("spin")
            .with_waypoint(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0))
            .with_waypoint(Vec3::X, Vec3::new(0.0, -3.0, 0.0));
        let pose = interpolate(&path, 0.5).unwrap();
        assert!((pose.rotation.y.abs() - PI).abs() < 0.01);
    }

    #[test]
    fn length_of_open_and_closed_paths() {
        assert!((path_length(&square(false)) - 12.0).abs() < 1e-5);
        assert!((path_length(&square(true)) - 16.0).abs() < 1e-5);
    }

    #[test]
    fn two_point_loop_has_no_closing_length() {
        let path = Path::new("pair")
            .with_waypoint(Vec3::ZERO, Vec3::ZERO)
            .with_waypoint(Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO)
            .looping(true);
        assert!((path_length(&path) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_lengths_are_zero() {
        assert_eq!(path_length(&Path::new("empty")), 0.0);
        let one = Path::new("one").with_waypoint(Vec3::ONE, Vec3::ZERO);
        assert_eq!(path_length(&one), 0.0);
    }

    fn arb_open_path() -> impl Strategy<Value = Path> {
        prop::collection::vec(
            (
                prop::array::uniform3(-100.0f32..100.0),
                prop::array::uniform3(-PI..PI),
            ),
            2..8,
        )
        .prop_map(|poses| {
            poses.into_iter().fold(Path::new("p"), |path, (p, r)| {
                path.with_waypoint(Vec3::from(p), Vec3::from(r))
            })
        })
    }

    proptest! {
        #[test]
        fn open_path_endpoints_match_waypoints(path in arb_open_path()) {
            let first = path.waypoints[0].pose();
            let last = path.waypoints[path.len() - 1].pose();
            prop_assert_eq!(interpolate(&path, 0.0).unwrap(), first);
            prop_assert_eq!(interpolate(&path, 1.0).unwrap(), last);
        }

        #[test]
        fn interpolated_positions_stay_finite(
            path in arb_open_path(),
            progress in -2.0f32..3.0,
        ) {
            let pose = interpolate(&path, progress).unwrap();
            prop_assert!(pose.position.is_finite());
            prop_assert!(pose.rotation.is_finite());
        }
    }
}
