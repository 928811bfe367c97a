//! wasm-bindgen surface for the browser editor.
//!
//! The editor keeps one [`WebKernel`], feeds it scene JSON when the user
//! edits or loads, and calls `frame()` from `requestAnimationFrame`.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::engine::FrameDriver;
use crate::options::Options;
use crate::scene::{Scene, SceneDocument, SceneStore};

/// Route `log` to the browser console and panics to `console.error`.
#[wasm_bindgen(start)]
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js_array(ids: &[String]) -> Array {
    ids.iter().map(|id| JsValue::from_str(id)).collect()
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// A scene plus the driver that advances it.
#[wasm_bindgen]
pub struct WebKernel {
    scene: Scene,
    driver: FrameDriver,
}

impl Default for WebKernel {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebKernel {
    /// Empty scene with default options.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            driver: FrameDriver::default(),
        }
    }

    /// Empty scene with options parsed from TOML text.
    ///
    /// # Errors
    /// The parse error message when `toml` is malformed.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(toml: &str) -> Result<WebKernel, JsError> {
        let options = Options::from_toml(toml).map_err(js_error)?;
        Ok(Self {
            scene: Scene::with_limits(options.simulation.clone()),
            driver: FrameDriver::new(options),
        })
    }

    /// Replace the scene with a parsed document. Playback resets to idle.
    ///
    /// # Errors
    /// The parse error message when `json` is not a scene document.
    #[wasm_bindgen(js_name = loadScene)]
    pub fn load_scene(&mut self, json: &str) -> Result<(), JsError> {
        let document = SceneDocument::from_json(json).map_err(js_error)?;
        let speed = self.scene.simulation().speed;
        self.scene = Scene::from_document(document);
        self.scene.set_limits(self.driver.options().simulation.clone());
        self.scene.set_speed(speed);
        self.driver.reset_timing();
        Ok(())
    }

    /// Current scene as document JSON.
    ///
    /// # Errors
    /// Serialization failure.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsError> {
        self.scene.to_document().to_json().map_err(js_error)
    }

    /// Start (or continue) playing a path. Returns `false` for unknown ids.
    pub fn play(&mut self, path_id: &str) -> bool {
        self.driver.reset_timing();
        self.scene.play(path_id)
    }

    /// Hold playback.
    pub fn pause(&mut self) {
        self.scene.pause();
    }

    /// Continue after `pause`.
    pub fn resume(&mut self) {
        self.driver.reset_timing();
        self.scene.resume();
    }

    /// Return to idle.
    pub fn stop(&mut self) {
        self.scene.stop_simulation();
    }

    /// Set the speed multiplier (clamped).
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: f32) {
        self.scene.set_speed(speed);
    }

    /// Advance by an explicit number of seconds. Returns whether a path
    /// completed this frame.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        self.driver.tick(&mut self.scene, elapsed).completed
    }

    /// Advance by wall-clock time since the previous frame.
    pub fn frame(&mut self) -> bool {
        self.driver.frame(&mut self.scene).completed
    }

    /// Ids flagged as colliding by the last frame.
    #[wasm_bindgen(js_name = collidingIds)]
    #[must_use]
    pub fn colliding_ids(&self) -> Array {
        to_js_array(self.scene.colliding_ids())
    }

    /// Ids `camera_id` saw during the last frame.
    #[wasm_bindgen(js_name = visibleIds)]
    #[must_use]
    pub fn visible_ids(&self, camera_id: &str) -> Array {
        to_js_array(self.scene.visible_from(camera_id))
    }

    /// Playback progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.scene.simulation().progress
    }

    /// Smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.driver.fps()
    }
}
