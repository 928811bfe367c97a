//! Shared utilities for the kernel.
//!
//! Helpers for frame timing, pose interpolation, and the `{x, y, z}` vector
//! encoding used by scene documents.

pub mod frame_timing;
pub mod interpolation;
pub mod serde_vec3;
