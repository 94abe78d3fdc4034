use std::time::{Duration, Instant};

use super::FrameTime;

/// Frames per second, measured over fixed windows.
///
/// The figure changes once per window so an overlay showing it stays
/// readable. Until the first window completes the figure is `None`.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    fps: Option<u32>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
            fps: None,
        }
    }

    /// Counts one frame. Returns true when the figure changed.
    pub fn record(&mut self, ft: &FrameTime) -> bool {
        let Some(start) = self.window_start else {
            self.window_start = Some(ft.now);
            return false;
        };

        self.frames += 1;
        let elapsed = ft.now.saturating_duration_since(start);
        if elapsed < self.window {
            return false;
        }

        let fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
        self.window_start = Some(ft.now);
        self.frames = 0;

        let changed = self.fps != Some(fps);
        self.fps = Some(fps);
        changed
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    /// Forgets the current window, e.g. after the app was suspended.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
