// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Simulation and vision kernel for a robotic work-cell scene editor.
//!
//! A scene holds cameras, bins, obstacles, robots and grippers plus the
//! paths robots follow. Once per frame the kernel advances playback, moves
//! robots along the current path, carries grippers and eye-in-hand cameras
//! with their robot, and recomputes which objects collide with a robot and
//! which objects each camera can see.
//!
//! # Key entry points
//!
//! - [`engine::FrameDriver`] - runs one frame against a [`scene::SceneStore`]
//! - [`scene::Scene`] - in-memory store with the editing surface
//! - [`scene::SceneDocument`] - JSON save/load
//! - [`options::Options`] - tuning (speed range, frame delta cap, frustum
//!   depth range)
//!
//! The per-stage functions ([`path::interpolate`],
//! [`attachment::attachment_updates`], [`collision::robot_colliding_ids`],
//! [`camera::camera_visibility`]) are pure and usable on their own.

pub mod attachment;
pub mod camera;
pub mod collision;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod options;
pub mod path;
pub mod scene;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::VisionLabError;
