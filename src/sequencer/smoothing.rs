use super::easing::{clamp01, lerp};
use super::tuning::SequencerConfig;

/// Result of one animation-frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub progress: f64,
    /// Progress moved this frame, so the frame should be rendered.
    pub changed: bool,
    /// Another frame is still needed to reach the target.
    pub schedule_next: bool,
}

/// Eases the displayed progress toward the raw scroll target, one frame at a
/// time. At most one frame is ever pending.
#[derive(Clone, Debug)]
pub struct ProgressSmoother {
    progress: f64,
    target: f64,
    frame_pending: bool,
    ease: f64,
    snap_epsilon: f64,
    settle_epsilon: f64,
}

impl ProgressSmoother {
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            progress: 0.0,
            target: 0.0,
            frame_pending: false,
            ease: config.ease,
            snap_epsilon: config.snap_epsilon,
            settle_epsilon: config.settle_epsilon,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Records a new target and returns whether the caller must schedule a frame.
    /// Returns false while a frame is already pending, coalescing bursts of
    /// scroll events.
    pub fn set_target(&mut self, raw: f64) -> bool {
        self.target = clamp01(raw);
        self.request_frame()
    }

    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    pub fn tick(&mut self) -> Tick {
        let target = self.target;
        let current = self.progress;
        let next = if (target - current).abs() < self.snap_epsilon {
            target
        } else {
            lerp(current, target, self.ease)
        };
        let changed = next != current;
        self.progress = next;
        let schedule_next = (target - next).abs() > self.settle_epsilon;
        self.frame_pending = schedule_next;
        Tick {
            progress: next,
            changed,
            schedule_next,
        }
    }
}
