use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Vision", inline)]
#[serde(default)]
/// Camera frustum parameters.
pub struct VisionOptions {
    /// Near clipping plane distance.
    #[schemars(title = "Near", range(min = 0.001, max = 1.0))]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(title = "Far", range(min = 1.0, max = 100.0))]
    pub far: f32,
    /// Vertical field of view in degrees for objects without one.
    #[schemars(title = "Default FOV", range(min = 1.0, max = 179.0))]
    pub default_fov: f32,
    /// Resolution (width, height) for objects without one.
    #[schemars(skip)]
    pub default_resolution: [u32; 2],
}

impl VisionOptions {
    /// Aspect ratio of the default resolution.
    #[must_use]
    pub fn default_aspect(&self) -> f32 {
        let [width, height] = self.default_resolution;
        if height == 0 {
            return 16.0 / 9.0;
        }
        width as f32 / height as f32
    }
}

impl Default for VisionOptions {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 10.0,
            default_fov: 60.0,
            default_resolution: [1920, 1080],
        }
    }
}
