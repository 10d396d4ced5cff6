use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter, starting at 0 for the first presented frame.
    pub frame_index: u64,
}

/// Aggregate numbers reported when the loop shuts down.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl FrameStats {
    /// Average frames per second over `elapsed`; 0 when nothing was measured.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            return 0.0;
        }
        self.frames as f64 / secs
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to `dt_max` so a stall (debugger, minimized window)
/// does not produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    frames: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            frames: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Timing of the frame about to be drawn, without advancing the clock.
    pub fn peek(&self) -> FrameTime {
        let dt = Instant::now().saturating_duration_since(self.last).min(self.dt_max);
        FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frames,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frames,
        };

        self.frames = self.frames.wrapping_add(1);
        ft
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.frames,
            elapsed: self.last.saturating_duration_since(self.started),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
