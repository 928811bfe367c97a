//! Frame-to-frame wall-clock timing for the frame driver.

use web_time::{Duration, Instant};

/// Wall-clock frame delta with a smoothed FPS readout.
#[derive(Debug)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Upper bound on a single reported delta
    max_delta: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer whose deltas never exceed `max_delta_secs`.
    /// `None`, or a cap too large for a [`Duration`], leaves deltas
    /// unbounded.
    pub fn new(max_delta_secs: Option<f32>) -> Self {
        let max_delta = max_delta_secs.map_or(Duration::MAX, |secs| {
            Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::MAX)
        });
        Self {
            last_frame: Instant::now(),
            max_delta,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Seconds elapsed since the previous call (or construction), clamped to
    /// the configured maximum.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(self.max_delta).as_secs_f32()
    }

    /// Forget the time spent paused so the next tick starts from now.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_clamped_to_max_delta() {
        let mut timing = FrameTiming::new(Some(0.0));
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(timing.tick(), 0.0);
    }

    #[test]
    fn tick_reports_elapsed_time() {
        let mut timing = FrameTiming::new(None);
        std::thread::sleep(Duration::from_millis(5));
        let dt = timing.tick();
        assert!(dt >= 0.004, "dt = {dt}");
        assert!(timing.fps() > 0.0);
    }

    #[test]
    fn oversized_caps_do_not_panic() {
        for cap in [f32::INFINITY, 1e30, f32::NAN] {
            let mut timing = FrameTiming::new(Some(cap));
            assert!(timing.tick() >= 0.0);
        }
    }
}
