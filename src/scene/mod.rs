//! Authoritative work-cell scene: flat object and path storage, playback
//! state, and the per-frame collision and visibility results.
//!
//! The kernel talks to a scene only through [`SceneStore`]. [`Scene`] is the
//! in-memory implementation and also carries the editing surface (object
//! factory, deletion, path management, playback controls).

mod document;
mod object;
mod path;
mod store;

use chrono::{DateTime, Utc};
pub use document::{SceneDocument, SceneMetadata, DOCUMENT_VERSION};
use glam::Vec3;
pub use object::{
    BinProperties, CameraProperties, CameraType, GripperProperties,
    GripperType, ObjectKind, ObjectType, ObstacleProperties, Resolution,
    RobotProperties, SceneObject, DEFAULT_CAMERA_FOV,
    DEFAULT_END_EFFECTOR_OFFSET,
};
pub use path::{Path, PathWaypoint};
use rustc_hash::FxHashMap;
pub use store::{
    ObjectUpdate, SceneStore, SimulationData, SimulationState,
};

use crate::attachment::end_effector_position;
use crate::options::SimulationOptions;

/// The authoritative scene. Owns all objects and paths in flat lists.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Objects in insertion order.
    objects: Vec<SceneObject>,
    /// Paths in insertion order.
    paths: Vec<Path>,
    simulation: SimulationData,
    limits: SimulationOptions,
    colliding_ids: Vec<String>,
    /// Camera id -> visible object ids.
    visibility: FxHashMap<String, Vec<String>>,
    created_at: DateTime<Utc>,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by a view.
    rendered_generation: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty, idle scene.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(SimulationOptions::default())
    }

    /// Create an empty scene whose speed multiplier is clamped by `limits`.
    #[must_use]
    pub fn with_limits(limits: SimulationOptions) -> Self {
        Self {
            objects: Vec::new(),
            paths: Vec::new(),
            simulation: SimulationData::default(),
            limits,
            colliding_ids: Vec::new(),
            visibility: FxHashMap::default(),
            created_at: Utc::now(),
            generation: 0,
            rendered_generation: 0,
        }
    }

    // -- Mutation helpers --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as consumed.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Current generation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the scene was first created (kept across save/load).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -- Objects --

    /// Place a new object of `object_type` at `position` with default
    /// properties. Returns the ids created, in order.
    ///
    /// A robot brings its own gripper, placed at the robot's end effector;
    /// the returned list is then `[robot_id, gripper_id]`.
    pub fn add_object(
        &mut self,
        object_type: ObjectType,
        position: Vec3,
    ) -> Vec<String> {
        let id = new_object_id(object_type);
        let kind = ObjectKind::default_for(object_type);
        let object = SceneObject::new(id.clone(), kind, position);

        if object_type != ObjectType::Robot {
            log::debug!("added {} '{id}'", object_type.as_str());
            self.objects.push(object);
            self.invalidate();
            return vec![id];
        }

        let gripper_id = new_object_id(ObjectType::Gripper);
        let gripper = SceneObject::new(
            gripper_id.clone(),
            ObjectKind::Gripper(GripperProperties {
                parent_robot_id: Some(id.clone()),
                ..GripperProperties::default()
            }),
            end_effector_position(&object),
        )
        .with_rotation(object.rotation);

        let mut robot = object;
        if let ObjectKind::Robot(props) = &mut robot.kind {
            props.gripper_id = Some(gripper_id.clone());
        }
        log::debug!("added robot '{id}' with gripper '{gripper_id}'");
        self.objects.push(robot);
        self.objects.push(gripper);
        self.invalidate();
        vec![id, gripper_id]
    }

    /// Insert a fully formed object. Refused (returns `false`) when its id
    /// is already taken.
    pub fn insert_object(&mut self, object: SceneObject) -> bool {
        if self.contains(&object.id) {
            log::warn!("object id '{}' already exists; not inserted", object.id);
            return false;
        }
        self.objects.push(object);
        self.invalidate();
        true
    }

    /// Remove an object by id. Returns the removed object, if any.
    ///
    /// Removing a robot also removes its gripper. Removing a gripper
    /// unlinks it from its robot. Eye-in-hand cameras keep their parent id.
    pub fn remove_object(&mut self, id: &str) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        let removed = self.objects.remove(idx);
        let mut gone = vec![removed.id.clone()];

        match &removed.kind {
            ObjectKind::Robot(RobotProperties {
                gripper_id: Some(gripper_id),
                ..
            }) => {
                let before = self.objects.len();
                self.objects.retain(|o| &o.id != gripper_id);
                if self.objects.len() != before {
                    gone.push(gripper_id.clone());
                }
            }
            ObjectKind::Gripper(GripperProperties {
                parent_robot_id: Some(parent),
                ..
            }) => {
                for object in &mut self.objects {
                    if let ObjectKind::Robot(props) = &mut object.kind {
                        if &object.id == parent
                            && props.gripper_id.as_deref() == Some(id)
                        {
                            props.gripper_id = None;
                        }
                    }
                }
            }
            _ => {}
        }

        for gone_id in &gone {
            let _ = self.visibility.remove(gone_id);
        }
        self.colliding_ids.retain(|c| !gone.contains(c));
        for ids in self.visibility.values_mut() {
            ids.retain(|v| !gone.contains(v));
        }
        log::debug!("removed {gone:?}");
        self.invalidate();
        Some(removed)
    }

    /// Read access to an object.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Objects of one type, in insertion order.
    pub fn objects_of_type(
        &self,
        object_type: ObjectType,
    ) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |o| o.is(object_type))
    }

    /// Check if an object exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Number of objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // -- Paths --

    /// Add a path, replacing any path with the same id. Returns the
    /// replaced path.
    pub fn add_path(&mut self, path: Path) -> Option<Path> {
        self.invalidate();
        if let Some(existing) = self.paths.iter_mut().find(|p| p.id == path.id) {
            return Some(std::mem::replace(existing, path));
        }
        self.paths.push(path);
        None
    }

    /// Remove a path by id. Stops playback if it was the current path.
    pub fn remove_path(&mut self, id: &str) -> Option<Path> {
        let idx = self.paths.iter().position(|p| p.id == id)?;
        let removed = self.paths.remove(idx);
        if self.simulation.current_path_id.as_deref() == Some(id) {
            self.stop_simulation();
        }
        self.invalidate();
        Some(removed)
    }

    // -- Playback --

    /// Start playing `path_id` from the beginning, or continue it if it is
    /// already the paused current path. Returns `false` for unknown paths.
    pub fn play(&mut self, path_id: &str) -> bool {
        if SceneStore::path(self, path_id).is_none() {
            log::warn!("cannot play unknown path '{path_id}'");
            return false;
        }
        let same_path =
            self.simulation.current_path_id.as_deref() == Some(path_id);
        if !same_path || self.simulation.state == SimulationState::Idle {
            self.simulation.progress = 0.0;
        }
        self.simulation.current_path_id = Some(path_id.to_owned());
        self.simulation.state = SimulationState::Playing;
        log::info!("playing path '{path_id}'");
        self.invalidate();
        true
    }

    /// Hold progress. No-op unless playing.
    pub fn pause(&mut self) {
        if self.simulation.state == SimulationState::Playing {
            self.simulation.state = SimulationState::Paused;
            self.invalidate();
        }
    }

    /// Continue after [`pause`](Self::pause). No-op unless paused.
    pub fn resume(&mut self) {
        if self.simulation.state == SimulationState::Paused {
            self.simulation.state = SimulationState::Playing;
            self.invalidate();
        }
    }

    /// Replace the speed range and re-clamp the current multiplier.
    pub fn set_limits(&mut self, limits: SimulationOptions) {
        self.limits = limits;
        self.set_speed(self.simulation.speed);
    }

    /// Set the speed multiplier, clamped to the configured range.
    pub fn set_speed(&mut self, speed: f32) {
        self.simulation.speed = self.limits.clamp_speed(speed);
        self.invalidate();
    }

    // -- Results --

    /// Objects involved in a robot collision during the last frame.
    #[must_use]
    pub fn colliding_ids(&self) -> &[String] {
        &self.colliding_ids
    }

    /// Whether `id` was reported colliding during the last frame.
    #[must_use]
    pub fn is_colliding(&self, id: &str) -> bool {
        self.colliding_ids.iter().any(|c| c == id)
    }

    /// Camera id -> visible object ids from the last frame.
    #[must_use]
    pub fn visibility(&self) -> &FxHashMap<String, Vec<String>> {
        &self.visibility
    }

    /// Objects `camera_id` saw during the last frame.
    #[must_use]
    pub fn visible_from(&self, camera_id: &str) -> &[String] {
        self.visibility.get(camera_id).map_or(&[], Vec::as_slice)
    }
}

impl SceneStore for Scene {
    fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn paths(&self) -> &[Path] {
        &self.paths
    }

    fn simulation(&self) -> &SimulationData {
        &self.simulation
    }

    fn update_object(&mut self, id: &str, update: ObjectUpdate) {
        if update.is_empty() {
            return;
        }
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == id) {
            let _ = update.apply_to(object);
            self.invalidate();
        }
    }

    fn set_colliding_ids(&mut self, ids: Vec<String>) {
        if self.colliding_ids != ids {
            self.colliding_ids = ids;
            self.invalidate();
        }
    }

    fn set_visibility(&mut self, camera_id: &str, ids: Vec<String>) {
        if self.visibility.get(camera_id) != Some(&ids) {
            let _ = self.visibility.insert(camera_id.to_owned(), ids);
            self.invalidate();
        }
    }

    fn set_simulation_progress(&mut self, progress: f32) {
        self.simulation.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.invalidate();
    }

    fn stop_simulation(&mut self) {
        let speed = self.simulation.speed;
        self.simulation = SimulationData {
            speed,
            ..SimulationData::default()
        };
        log::info!("simulation stopped");
        self.invalidate();
    }
}

fn new_object_id(object_type: ObjectType) -> String {
    format!("{}-{}", object_type.as_str(), uuid::Uuid::new_v4())
}
