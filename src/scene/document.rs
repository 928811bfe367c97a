//! Persisted scene document (JSON).

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::object::SceneObject;
use super::path::Path;
use super::Scene;
use crate::error::VisionLabError;

/// Version string written into new documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Creation and last-save timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    /// When the scene was first created.
    pub created_at: DateTime<Utc>,
    /// When the document was written.
    pub updated_at: DateTime<Utc>,
}

/// On-disk shape of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Document format version.
    pub version: String,
    /// Every object in the scene.
    pub objects: Vec<SceneObject>,
    /// Every path in the scene. Absent in object-only documents.
    #[serde(default)]
    pub paths: Vec<Path>,
    /// Timestamps.
    pub metadata: SceneMetadata,
}

impl SceneDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    /// [`VisionLabError::SceneParse`] when the text is not a well-formed
    /// scene document.
    pub fn from_json(json: &str) -> Result<Self, VisionLabError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// [`VisionLabError::SceneParse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, VisionLabError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from a JSON file.
    ///
    /// # Errors
    /// I/O and parse failures.
    pub fn load(path: &std::path::Path) -> Result<Self, VisionLabError> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json(&content)?;
        log::info!(
            "Loaded scene from {} ({} objects, {} paths)",
            path.display(),
            document.objects.len(),
            document.paths.len()
        );
        Ok(document)
    }

    /// Write the document as pretty JSON, creating parent directories.
    ///
    /// # Errors
    /// I/O and serialization failures.
    pub fn save(&self, path: &std::path::Path) -> Result<(), VisionLabError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved scene to {}", path.display());
        Ok(())
    }
}

impl Scene {
    /// Snapshot the scene as a document stamped with the current time.
    #[must_use]
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            version: DOCUMENT_VERSION.to_owned(),
            objects: self.objects.clone(),
            paths: self.paths.clone(),
            metadata: SceneMetadata {
                created_at: self.created_at,
                updated_at: Utc::now(),
            },
        }
    }

    /// Build an idle scene from a document. Objects are taken as-is;
    /// duplicate ids are logged, not rejected.
    #[must_use]
    pub fn from_document(document: SceneDocument) -> Self {
        if document.version != DOCUMENT_VERSION {
            log::warn!(
                "scene document version {} (expected {DOCUMENT_VERSION})",
                document.version
            );
        }
        let mut seen = FxHashSet::default();
        for object in &document.objects {
            if !seen.insert(object.id.as_str()) {
                log::warn!("duplicate object id '{}' in scene document", object.id);
            }
        }

        let mut scene = Self::new();
        scene.objects = document.objects;
        scene.paths = document.paths;
        scene.created_at = document.metadata.created_at;
        scene.invalidate();
        scene
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use serde_json::json;

    use super::*;
    use crate::scene::{ObjectType, SceneStore};

    #[test]
    fn scene_round_trips_through_json() {
        let mut scene = Scene::new();
        let _ = scene.add_object(ObjectType::Robot, Vec3::new(1.0, 0.0, -2.0));
        let _ = scene.add_object(ObjectType::Camera, Vec3::new(0.0, 2.0, 3.0));
        let _ = scene.add_object(ObjectType::Bin, Vec3::ZERO);
        let _ = scene.add_path(
            Path::new("p")
                .with_waypoint(Vec3::ZERO, Vec3::ZERO)
                .with_waypoint(Vec3::X, Vec3::new(0.0, 1.5, 0.0))
                .looping(true),
        );

        let json = scene.to_document().to_json().unwrap();
        let restored =
            Scene::from_document(SceneDocument::from_json(&json).unwrap());
        assert_eq!(restored.objects(), scene.objects());
        assert_eq!(restored.paths(), scene.paths());
        assert_eq!(restored.created_at(), scene.created_at());
    }

    #[test]
    fn paths_are_optional() {
        let value = json!({
            "version": "1.0",
            "objects": [{
                "id": "bin-1",
                "type": "bin",
                "position": {"x": 0.0, "y": 0.0, "z": 0.0},
                "rotation": {"x": 0.0, "y": 0.0, "z": 0.0},
                "scale": {"x": 1.0, "y": 1.0, "z": 1.0},
                "properties": {"color": "#336699"}
            }],
            "metadata": {
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }
        });
        let doc: SceneDocument = serde_json::from_value(value.clone()).unwrap();
        assert!(doc.paths.is_empty());
        let again = serde_json::to_value(&doc).unwrap();
        assert_eq!(again["objects"], value["objects"]);
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let object = json!({
            "id": "same",
            "type": "obstacle",
            "position": {"x": 0.0, "y": 0.0, "z": 0.0},
            "rotation": {"x": 0.0, "y": 0.0, "z": 0.0},
            "scale": {"x": 1.0, "y": 1.0, "z": 1.0},
            "properties": {}
        });
        let value = json!({
            "version": "1.0",
            "objects": [object.clone(), object],
            "metadata": {
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }
        });
        let doc: SceneDocument = serde_json::from_value(value).unwrap();
        assert_eq!(Scene::from_document(doc).object_count(), 2);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SceneDocument::from_json("{\"version\": 1").unwrap_err();
        assert!(matches!(err, VisionLabError::SceneParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("visionlab-scene-{}", uuid::Uuid::new_v4()));
        let path = dir.join("scene.json");
        let mut scene = Scene::new();
        let _ = scene.add_object(ObjectType::Obstacle, Vec3::ONE);
        let doc = scene.to_document();
        doc.save(&path).unwrap();
        assert_eq!(SceneDocument::load(&path).unwrap(), doc);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
