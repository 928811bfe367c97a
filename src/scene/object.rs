use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::serde_vec3;

/// Default vertical field of view for cameras, in degrees.
pub const DEFAULT_CAMERA_FOV: f32 = 60.0;

/// Default robot-local end-effector offset.
pub const DEFAULT_END_EFFECTOR_OFFSET: Vec3 = Vec3::new(0.0, 0.75, 0.0);

// ---------------------------------------------------------------------------
// ObjectType
// ---------------------------------------------------------------------------

/// Object type discriminant as it appears in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Eye-to-hand or eye-in-hand camera.
    Camera,
    /// Parts bin.
    Bin,
    /// Static obstacle.
    Obstacle,
    /// Robot arm.
    Robot,
    /// End-of-arm tooling attached to a robot.
    Gripper,
}

impl ObjectType {
    /// Every placeable type, in palette order.
    pub const ALL: [ObjectType; 5] = [
        ObjectType::Camera,
        ObjectType::Bin,
        ObjectType::Obstacle,
        ObjectType::Robot,
        ObjectType::Gripper,
    ];

    /// Wire name used in scene documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Bin => "bin",
            Self::Obstacle => "obstacle",
            Self::Robot => "robot",
            Self::Gripper => "gripper",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// Per-type properties
// ---------------------------------------------------------------------------

/// How a camera is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraType {
    /// Fixed in the world.
    #[default]
    EyeToHand,
    /// Rigidly mounted on a robot's end effector.
    EyeInHand,
}

/// Sensor resolution; only the aspect ratio matters to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Width over height. A zero height falls back to the default ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return Self::default().aspect();
        }
        self.width as f32 / self.height as f32
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Camera-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraProperties {
    /// Mounting mode. Serialized at the object's top level as `cameraType`.
    #[serde(skip)]
    pub camera_type: CameraType,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    /// Sensor resolution (aspect ratio source).
    #[serde(default)]
    pub resolution: Resolution,
    /// Robot carrying this camera; only meaningful for eye-in-hand.
    #[serde(default)]
    pub parent_robot_id: Option<String>,
    /// Unrecognised keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_fov() -> f32 {
    DEFAULT_CAMERA_FOV
}

impl Default for CameraProperties {
    fn default() -> Self {
        Self {
            camera_type: CameraType::EyeToHand,
            fov: DEFAULT_CAMERA_FOV,
            resolution: Resolution::default(),
            parent_robot_id: None,
            extra: Map::new(),
        }
    }
}

/// Robot-specific properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotProperties {
    /// Offset from the robot origin to its end effector (world axes).
    #[serde(
        with = "serde_vec3::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub end_effector_offset: Option<Vec3>,
    /// Path that drives this robot during simulation.
    #[serde(default)]
    pub path_id: Option<String>,
    /// Attached gripper.
    #[serde(default)]
    pub gripper_id: Option<String>,
    /// Unrecognised keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RobotProperties {
    /// Configured end-effector offset, or the default when unset.
    #[must_use]
    pub fn end_effector_offset(&self) -> Vec3 {
        self.end_effector_offset
            .unwrap_or(DEFAULT_END_EFFECTOR_OFFSET)
    }
}

/// Cosmetic gripper style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GripperType {
    /// Two-finger parallel jaw.
    #[default]
    Parallel,
    /// Suction cup.
    Vacuum,
    /// Electromagnet.
    Magnetic,
}

/// Gripper-specific properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GripperProperties {
    /// Owning robot.
    #[serde(default)]
    pub parent_robot_id: Option<String>,
    /// Cosmetic style.
    #[serde(default)]
    pub gripper_type: GripperType,
    /// Unrecognised keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bin properties. Bins carry nothing the kernel reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinProperties {
    /// Editor-side keys (color, label, ...), preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Obstacle properties. Obstacles carry nothing the kernel reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObstacleProperties {
    /// Editor-side keys (color, label, ...), preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// ObjectKind
// ---------------------------------------------------------------------------

/// Object type together with its strongly-typed properties.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Camera object.
    Camera(CameraProperties),
    /// Bin object.
    Bin(BinProperties),
    /// Obstacle object.
    Obstacle(ObstacleProperties),
    /// Robot object.
    Robot(RobotProperties),
    /// Gripper object.
    Gripper(GripperProperties),
    /// A type this kernel does not know. Kept so documents round-trip.
    Other {
        /// Raw `type` string.
        type_name: String,
        /// Raw `properties` value.
        properties: Value,
    },
}

impl ObjectKind {
    /// Default properties for a freshly placed object of `object_type`.
    #[must_use]
    pub fn default_for(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Camera => Self::Camera(CameraProperties::default()),
            ObjectType::Bin => Self::Bin(BinProperties::default()),
            ObjectType::Obstacle => {
                Self::Obstacle(ObstacleProperties::default())
            }
            ObjectType::Robot => Self::Robot(RobotProperties {
                end_effector_offset: Some(DEFAULT_END_EFFECTOR_OFFSET),
                ..RobotProperties::default()
            }),
            ObjectType::Gripper => Self::Gripper(GripperProperties::default()),
        }
    }

    /// Known type, or `None` for [`ObjectKind::Other`].
    #[must_use]
    pub fn object_type(&self) -> Option<ObjectType> {
        match self {
            Self::Camera(_) => Some(ObjectType::Camera),
            Self::Bin(_) => Some(ObjectType::Bin),
            Self::Obstacle(_) => Some(ObjectType::Obstacle),
            Self::Robot(_) => Some(ObjectType::Robot),
            Self::Gripper(_) => Some(ObjectType::Gripper),
            Self::Other { .. } => None,
        }
    }

    /// Wire name of the type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Other { type_name, .. } => type_name,
            other => other.object_type().map_or("", ObjectType::as_str),
        }
    }

    /// Whether `other` has the same variant (and, for unknown types, the same
    /// type name).
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Other { type_name: a, .. },
                Self::Other { type_name: b, .. },
            ) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

// ---------------------------------------------------------------------------
// SceneObject
// ---------------------------------------------------------------------------

/// A placed object in the work-cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSceneObject", into = "RawSceneObject")]
pub struct SceneObject {
    /// Unique id within the scene.
    pub id: String,
    /// Optional display name.
    pub name: Option<String>,
    /// World-space center.
    pub position: Vec3,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Type and typed properties.
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Object at `position` with identity rotation and unit scale.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ObjectKind, position: Vec3) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            kind,
        }
    }

    /// Builder-style rotation setter.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale setter.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Known type, or `None` for unrecognised objects.
    #[must_use]
    pub fn object_type(&self) -> Option<ObjectType> {
        self.kind.object_type()
    }

    /// Whether this object is of `object_type`.
    #[must_use]
    pub fn is(&self, object_type: ObjectType) -> bool {
        self.object_type() == Some(object_type)
    }

    /// Camera properties, if this is a camera.
    #[must_use]
    pub fn as_camera(&self) -> Option<&CameraProperties> {
        match &self.kind {
            ObjectKind::Camera(props) => Some(props),
            _ => None,
        }
    }

    /// Robot properties, if this is a robot.
    #[must_use]
    pub fn as_robot(&self) -> Option<&RobotProperties> {
        match &self.kind {
            ObjectKind::Robot(props) => Some(props),
            _ => None,
        }
    }

    /// Gripper properties, if this is a gripper.
    #[must_use]
    pub fn as_gripper(&self) -> Option<&GripperProperties> {
        match &self.kind {
            ObjectKind::Gripper(props) => Some(props),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// Document shape of a [`SceneObject`]: flat `type` tag, `cameraType` at the
/// top level, open `properties` object.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSceneObject {
    id: String,
    #[serde(rename = "type")]
    object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(with = "serde_vec3")]
    position: Vec3,
    #[serde(with = "serde_vec3")]
    rotation: Vec3,
    #[serde(with = "serde_vec3")]
    scale: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    camera_type: Option<CameraType>,
    #[serde(default)]
    properties: Value,
}

fn properties_from<T>(value: Value) -> Result<T, serde_json::Error>
where
    T: for<'de> Deserialize<'de>,
{
    match value {
        Value::Null => serde_json::from_value(Value::Object(Map::new())),
        other => serde_json::from_value(other),
    }
}

impl TryFrom<RawSceneObject> for SceneObject {
    type Error = serde_json::Error;

    fn try_from(raw: RawSceneObject) -> Result<Self, Self::Error> {
        let kind = match ObjectType::parse(&raw.object_type) {
            Some(ObjectType::Camera) => {
                let mut props: CameraProperties =
                    properties_from(raw.properties)?;
                props.camera_type = raw.camera_type.unwrap_or_default();
                ObjectKind::Camera(props)
            }
            Some(ObjectType::Bin) => ObjectKind::Bin(properties_from(raw.properties)?),
            Some(ObjectType::Obstacle) => {
                ObjectKind::Obstacle(properties_from(raw.properties)?)
            }
            Some(ObjectType::Robot) => {
                ObjectKind::Robot(properties_from(raw.properties)?)
            }
            Some(ObjectType::Gripper) => {
                ObjectKind::Gripper(properties_from(raw.properties)?)
            }
            None => ObjectKind::Other {
                type_name: raw.object_type,
                properties: raw.properties,
            },
        };
        Ok(Self {
            id: raw.id,
            name: raw.name,
            position: raw.position,
            rotation: raw.rotation,
            scale: raw.scale,
            kind,
        })
    }
}

fn properties_value<T: Serialize>(props: &T) -> Value {
    serde_json::to_value(props).unwrap_or(Value::Null)
}

impl From<SceneObject> for RawSceneObject {
    fn from(object: SceneObject) -> Self {
        let object_type = object.kind.type_name().to_owned();
        let (camera_type, properties) = match object.kind {
            ObjectKind::Camera(props) => {
                (Some(props.camera_type), properties_value(&props))
            }
            ObjectKind::Bin(props) => (None, properties_value(&props)),
            ObjectKind::Obstacle(props) => (None, properties_value(&props)),
            ObjectKind::Robot(props) => (None, properties_value(&props)),
            ObjectKind::Gripper(props) => (None, properties_value(&props)),
            ObjectKind::Other { properties, .. } => (None, properties),
        };
        Self {
            id: object.id,
            object_type,
            name: object.name,
            position: object.position,
            rotation: object.rotation,
            scale: object.scale,
            camera_type,
            properties,
        }
    }
}
