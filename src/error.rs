//! Crate-level error types.

use std::fmt;

/// Errors produced by the visionlab crate.
#[derive(Debug)]
pub enum VisionLabError {
    /// A path with no waypoints was handed to the interpolator.
    EmptyPath {
        /// Id of the offending path.
        path_id: String,
    },
    /// A path id that does not exist in the scene.
    UnknownPath {
        /// The missing id.
        path_id: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Scene document JSON parsing/serialization failure.
    SceneParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for VisionLabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath { path_id } => {
                write!(f, "path '{path_id}' has no waypoints to interpolate")
            }
            Self::UnknownPath { path_id } => {
                write!(f, "no path with id '{path_id}'")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SceneParse(msg) => write!(f, "scene parse error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VisionLabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VisionLabError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for VisionLabError {
    fn from(e: serde_json::Error) -> Self {
        Self::SceneParse(e.to_string())
    }
}
