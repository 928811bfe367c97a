use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Simulation", inline)]
#[serde(default)]
/// Playback clock parameters.
pub struct SimulationOptions {
    /// Smallest accepted speed multiplier.
    #[schemars(title = "Min Speed", range(min = 0.01, max = 1.0))]
    pub min_speed: f32,
    /// Largest accepted speed multiplier.
    #[schemars(title = "Max Speed", range(min = 1.0, max = 20.0))]
    pub max_speed: f32,
    /// Upper bound on the seconds a single frame may advance playback.
    /// Unset means a frame advances by whatever it is given.
    #[schemars(title = "Max Frame Delta", range(min = 0.001, max = 1.0))]
    pub max_frame_delta: Option<f32>,
}

impl SimulationOptions {
    /// Clamp a requested speed multiplier into the accepted range.
    #[must_use]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        let speed = if speed.is_nan() { 1.0 } else { speed };
        speed.min(self.max_speed).max(self.min_speed)
    }

    /// Clamp a frame delta to `[0, max_frame_delta]`. NaN counts as 0 and a
    /// NaN or negative cap allows nothing.
    #[must_use]
    pub fn clamp_frame_delta(&self, elapsed: f32) -> f32 {
        if elapsed.is_nan() {
            return 0.0;
        }
        let elapsed = elapsed.max(0.0);
        self.max_frame_delta
            .map_or(elapsed, |cap| elapsed.min(cap.max(0.0)))
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            min_speed: 0.1,
            max_speed: 5.0,
            max_frame_delta: None,
        }
    }
}
