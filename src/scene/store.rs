use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::object::{ObjectKind, SceneObject};
use super::path::Path;
use crate::util::interpolation::Pose;

/// Playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationState {
    /// Nothing playing; progress is 0.
    #[default]
    Idle,
    /// Progress advances every frame.
    Playing,
    /// Progress is held.
    Paused,
}

/// Scene-wide playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationData {
    /// Current state.
    pub state: SimulationState,
    /// Progress along the current path, in `[0, 1]`.
    pub progress: f32,
    /// Path being played, if any.
    pub current_path_id: Option<String>,
    /// Speed multiplier applied on top of the path's own speed.
    pub speed: f32,
}

impl Default for SimulationData {
    fn default() -> Self {
        Self {
            state: SimulationState::Idle,
            progress: 0.0,
            current_path_id: None,
            speed: 1.0,
        }
    }
}

impl SimulationData {
    /// Whether progress should advance this frame.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == SimulationState::Playing
    }
}

/// Whole-field replacement for a single object. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectUpdate {
    /// New position.
    pub position: Option<Vec3>,
    /// New rotation.
    pub rotation: Option<Vec3>,
    /// New scale.
    pub scale: Option<Vec3>,
    /// New properties. Must keep the object's type.
    pub kind: Option<ObjectKind>,
}

impl ObjectUpdate {
    /// Position and rotation from `pose`.
    #[must_use]
    pub fn pose(pose: Pose) -> Self {
        Self {
            position: Some(pose.position),
            rotation: Some(pose.rotation),
            ..Self::default()
        }
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.kind.is_none()
    }

    /// Apply onto `object`. A `kind` of a different type is refused and
    /// `false` is returned; other fields are still applied.
    pub fn apply_to(self, object: &mut SceneObject) -> bool {
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            object.scale = scale;
        }
        match self.kind {
            Some(kind) if kind.same_type(&object.kind) => {
                object.kind = kind;
                true
            }
            Some(kind) => {
                log::warn!(
                    "refusing to change object '{}' from {} to {}",
                    object.id,
                    object.kind.type_name(),
                    kind.type_name()
                );
                false
            }
            None => true,
        }
    }
}

/// The mutable scene the per-frame kernel reads from and writes back to.
///
/// Reads return the current snapshot; writes are whole-field replacements.
pub trait SceneStore {
    /// All objects, in insertion order.
    fn objects(&self) -> &[SceneObject];

    /// All paths, in insertion order.
    fn paths(&self) -> &[Path];

    /// Playback state.
    fn simulation(&self) -> &SimulationData;

    /// Merge `update` into the object with `id`. Unknown ids are ignored.
    fn update_object(&mut self, id: &str, update: ObjectUpdate);

    /// Replace the set of colliding object ids.
    fn set_colliding_ids(&mut self, ids: Vec<String>);

    /// Replace one camera's visible object ids.
    fn set_visibility(&mut self, camera_id: &str, ids: Vec<String>);

    /// Set playback progress (clamped to `[0, 1]`).
    fn set_simulation_progress(&mut self, progress: f32);

    /// Return to idle with progress 0.
    fn stop_simulation(&mut self);

    /// Path with `id`.
    fn path(&self, id: &str) -> Option<&Path> {
        self.paths().iter().find(|p| p.id == id)
    }

    /// The path currently selected for playback, if it still exists.
    fn current_path(&self) -> Option<&Path> {
        let id = self.simulation().current_path_id.as_deref()?;
        self.path(id)
    }
}
