//! Per-frame scheduler.
//!
//! One frame runs, in order: playback clock, robot motion along the current
//! path, attachment propagation, collision set, per-camera visibility. Each
//! stage reads the scene as the previous stage left it.

use crate::attachment::attachment_updates;
use crate::camera::{camera_visibility, CameraVisibility};
use crate::collision::robot_colliding_ids;
use crate::options::Options;
use crate::path::{clock, interpolate};
use crate::scene::{ObjectUpdate, Path, SceneStore};
use crate::util::frame_timing::FrameTiming;

/// What one frame did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Seconds the frame advanced after clamping.
    pub elapsed: f32,
    /// Playback progress written this frame; `None` when nothing played.
    pub progress: Option<f32>,
    /// A one-shot path finished this frame and playback stopped.
    pub completed: bool,
    /// Robots moved along the current path.
    pub moved_robots: Vec<String>,
    /// Ids flagged as colliding.
    pub colliding_ids: Vec<String>,
    /// Visible ids per camera, in camera order.
    pub visibility: Vec<CameraVisibility>,
}

/// Drives a [`SceneStore`] one frame at a time.
#[derive(Debug)]
pub struct FrameDriver {
    options: Options,
    timing: FrameTiming,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl FrameDriver {
    /// Create a driver with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let timing = FrameTiming::new(options.simulation.max_frame_delta);
        Self { options, timing }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second seen by [`frame`](Self::frame).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Restart wall-clock timing, e.g. after the view was hidden.
    pub fn reset_timing(&mut self) {
        self.timing.reset();
    }

    /// Run one frame using the wall-clock time since the previous frame.
    pub fn frame<S: SceneStore + ?Sized>(&mut self, store: &mut S) -> FrameReport {
        let elapsed = self.timing.tick();
        self.tick(store, elapsed)
    }

    /// Run one frame that advances playback by `elapsed` seconds.
    pub fn tick<S: SceneStore + ?Sized>(
        &self,
        store: &mut S,
        elapsed: f32,
    ) -> FrameReport {
        let mut report = FrameReport {
            elapsed: self.options.simulation.clamp_frame_delta(elapsed),
            ..FrameReport::default()
        };

        self.advance_playback(store, &mut report);

        for (id, pose) in attachment_updates(store.objects()) {
            store.update_object(&id, ObjectUpdate::pose(pose));
        }

        report.colliding_ids = robot_colliding_ids(store.objects());
        store.set_colliding_ids(report.colliding_ids.clone());

        report.visibility =
            camera_visibility(store.objects(), &self.options.vision);
        for camera in &report.visibility {
            store.set_visibility(&camera.camera_id, camera.visible_ids.clone());
        }

        report
    }

    /// Clock, robot motion, and completion.
    fn advance_playback<S: SceneStore + ?Sized>(
        &self,
        store: &mut S,
        report: &mut FrameReport,
    ) {
        let simulation = store.simulation();
        if !simulation.is_playing() {
            return;
        }
        let (current, speed) = (simulation.progress, simulation.speed);
        let Some(path) = store.current_path().cloned() else {
            log::debug!("playing without a resolvable path; clock held");
            return;
        };

        let step = clock::advance(current, report.elapsed, speed, &path);
        store.set_simulation_progress(step.progress);
        report.progress = Some(step.progress);

        report.moved_robots = move_robots(store, &path, step.progress);

        if step.completed {
            log::info!("path '{}' complete", path.id);
            store.stop_simulation();
            report.completed = true;
        }
    }
}

/// Pose every robot assigned to `path` at `progress`. Returns the moved ids.
fn move_robots<S: SceneStore + ?Sized>(
    store: &mut S,
    path: &Path,
    progress: f32,
) -> Vec<String> {
    let pose = match interpolate(path, progress) {
        Ok(pose) => pose,
        Err(e) => {
            log::warn!("{e}; robots hold position this frame");
            return Vec::new();
        }
    };
    let robots: Vec<String> = store
        .objects()
        .iter()
        .filter(|o| {
            o.as_robot()
                .is_some_and(|r| r.path_id.as_deref() == Some(path.id.as_str()))
        })
        .map(|o| o.id.clone())
        .collect();
    for id in &robots {
        store.update_object(id, ObjectUpdate::pose(pose));
    }
    robots
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::options::SimulationOptions;
    use crate::scene::{
        GripperProperties, ObjectKind, ObjectType, RobotProperties, Scene,
        SceneObject, SimulationState,
    };

    fn robot_on(id: &str, path_id: Option<&str>, gripper: Option<&str>) -> SceneObject {
        SceneObject::new(
            id,
            ObjectKind::Robot(RobotProperties {
                end_effector_offset: Some(Vec3::Y),
                path_id: path_id.map(str::to_owned),
                gripper_id: gripper.map(str::to_owned),
                ..RobotProperties::default()
            }),
            Vec3::ZERO,
        )
    }

    fn gripper_of(id: &str, robot: &str) -> SceneObject {
        SceneObject::new(
            id,
            ObjectKind::Gripper(GripperProperties {
                parent_robot_id: Some(robot.to_owned()),
                ..GripperProperties::default()
            }),
            Vec3::new(0.0, -20.0, 0.0),
        )
    }

    fn line() -> Path {
        Path::new("line")
            .with_waypoint(Vec3::ZERO, Vec3::ZERO)
            .with_waypoint(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO)
    }

    fn capped(max_frame_delta: f32) -> FrameDriver {
        FrameDriver::new(Options {
            simulation: SimulationOptions {
                max_frame_delta: Some(max_frame_delta),
                ..SimulationOptions::default()
            },
            ..Options::default()
        })
    }

    fn playing_scene() -> Scene {
        let mut scene = Scene::new();
        assert!(scene.insert_object(robot_on("r", Some("line"), Some("g"))));
        assert!(scene.insert_object(gripper_of("g", "r")));
        let _ = scene.add_path(line());
        assert!(scene.play("line"));
        scene
    }

    #[test]
    fn long_frame_finishes_one_shot_path() {
        let mut scene = playing_scene();
        let report = FrameDriver::default().tick(&mut scene, 5.0);

        assert!(report.completed);
        assert_eq!(report.progress, Some(1.0));
        assert_eq!(report.moved_robots, vec!["r".to_owned()]);
        assert_eq!(scene.object("r").unwrap().position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(scene.simulation().state, SimulationState::Idle);
        assert_eq!(scene.simulation().progress, 0.0);
        // Gripper follows the final pose in the same frame.
        assert_eq!(scene.object("g").unwrap().position, Vec3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn elapsed_is_clamped_to_max_frame_delta() {
        let mut scene = playing_scene();
        let report = capped(0.1).tick(&mut scene, 5.0);
        assert!((report.elapsed - 0.1).abs() < 1e-6);
        assert!(!report.completed);
        assert!((scene.simulation().progress - 0.1).abs() < 1e-6);
        let x = scene.object("r").unwrap().position.x;
        assert!((x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn only_robots_on_current_path_move() {
        let mut scene = playing_scene();
        assert!(scene.insert_object(
            robot_on("other", Some("elsewhere"), None)
                .with_rotation(Vec3::new(0.0, 0.0, 0.5))
        ));
        assert!(scene.insert_object(robot_on("idle", None, None)));
        let report = FrameDriver::default().tick(&mut scene, 0.5);
        assert_eq!(report.moved_robots, vec!["r".to_owned()]);
        assert_eq!(scene.object("other").unwrap().position, Vec3::ZERO);
        assert_eq!(scene.object("idle").unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn paused_playback_holds_progress() {
        let mut scene = playing_scene();
        let driver = FrameDriver::default();
        let _ = driver.tick(&mut scene, 0.05);
        scene.pause();
        let held = scene.simulation().progress;
        let report = driver.tick(&mut scene, 0.05);
        assert!(report.progress.is_none());
        assert_eq!(scene.simulation().progress, held);
    }

    #[test]
    fn empty_path_skips_robot_motion() {
        let mut scene = Scene::new();
        assert!(scene.insert_object(robot_on("r", Some("empty"), None)));
        let _ = scene.add_path(Path::new("empty"));
        assert!(scene.play("empty"));
        let report = FrameDriver::default().tick(&mut scene, 0.05);
        assert!(report.moved_robots.is_empty());
        assert!(report.progress.is_some());
        assert_eq!(scene.object("r").unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn looping_path_never_stops() {
        let mut scene = playing_scene();
        let _ = scene.add_path(line().looping(true));
        let driver = FrameDriver::default();
        for _ in 0..5 {
            let report = driver.tick(&mut scene, 0.7);
            assert!(!report.completed);
        }
        assert!(scene.simulation().is_playing());
    }

    #[test]
    fn collisions_and_visibility_are_written_back() {
        let mut scene = Scene::new();
        assert!(scene.insert_object(robot_on("r", None, None)));
        assert!(scene.insert_object(SceneObject::new(
            "box",
            ObjectKind::default_for(ObjectType::Obstacle),
            Vec3::new(0.5, 0.0, 0.0),
        )));
        assert!(scene.insert_object(SceneObject::new(
            "cam",
            ObjectKind::default_for(ObjectType::Camera),
            Vec3::new(0.0, 0.0, 5.0),
        )));

        let report = FrameDriver::default().tick(&mut scene, 0.016);
        assert!(report.progress.is_none());
        assert_eq!(report.colliding_ids, vec!["r".to_owned(), "box".to_owned()]);
        assert!(scene.is_colliding("box"));
        assert_eq!(
            scene.visible_from("cam"),
            ["r".to_owned(), "box".to_owned()]
        );
    }

    #[test]
    fn idle_scene_still_propagates_attachments() {
        let mut scene = Scene::new();
        assert!(scene.insert_object(
            robot_on("r", None, Some("g")).with_rotation(Vec3::new(0.0, 1.0, 0.0))
        ));
        assert!(scene.insert_object(gripper_of("g", "r")));
        let _ = FrameDriver::default().tick(&mut scene, 0.016);
        let gripper = scene.object("g").unwrap();
        assert_eq!(gripper.position, Vec3::Y);
        assert_eq!(gripper.rotation, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn unbounded_options_cap_builds_a_driver() {
        for text in [
            "[simulation]\nmax_frame_delta = inf\n",
            "[simulation]\nmax_frame_delta = 1e30\n",
        ] {
            let options = Options::from_toml(text).unwrap();
            let mut driver = FrameDriver::new(options);
            let mut scene = playing_scene();
            let report = driver.tick(&mut scene, 5.0);
            assert!(report.completed);
            let _ = driver.frame(&mut scene);
        }
    }

    #[test]
    fn wall_clock_frame_runs() {
        let mut scene = playing_scene();
        let mut driver = capped(0.1);
        let report = driver.frame(&mut scene);
        assert!(report.elapsed <= 0.1);
        assert!(driver.fps() > 0.0);
    }
}
