//! Playback progress bookkeeping.
//!
//! Timing is uniform per segment: with multiplier 1 a path with `N`
//! waypoints takes `(N - 1) / speed` seconds end to end, however far apart
//! its waypoints are.

use crate::scene::Path;

/// Result of advancing the clock by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockStep {
    /// Progress after the step, in `[0, 1]`.
    pub progress: f32,
    /// Whether a one-shot path reached its end on this step.
    pub completed: bool,
}

/// Progress gained over `elapsed` seconds at `multiplier` times path speed.
#[must_use]
pub fn progress_delta(path: &Path, elapsed: f32, multiplier: f32) -> f32 {
    let segments = path.len().saturating_sub(1).max(1);
    elapsed * path.speed * multiplier / segments as f32
}

/// Advance `current` by `delta`. Looping paths wrap; one-shot paths stop at
/// exactly `1.0` and call `on_complete` once.
pub fn next_progress(
    current: f32,
    delta: f32,
    path: &Path,
    on_complete: impl FnOnce(),
) -> f32 {
    let next = current + delta;
    if path.looping {
        if (0.0..1.0).contains(&next) {
            next
        } else {
            next.rem_euclid(1.0)
        }
    } else if next >= 1.0 {
        on_complete();
        1.0
    } else {
        next.max(0.0)
    }
}

/// [`progress_delta`] followed by [`next_progress`].
#[must_use]
pub fn advance(
    current: f32,
    elapsed: f32,
    multiplier: f32,
    path: &Path,
) -> ClockStep {
    let mut completed = false;
    let delta = progress_delta(path, elapsed, multiplier);
    let progress = next_progress(current, delta, path, || completed = true);
    ClockStep {
        progress,
        completed,
    }
}
