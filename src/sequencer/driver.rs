use super::frame::{compute_frame, Frame};
use super::pinning::{PinController, PinUpdate, TrackGeometry};
use super::scenes::Storyboard;
use super::smoothing::ProgressSmoother;
use super::tuning::SequencerConfig;

/// What the host should do after a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOutcome {
    pub pin: PinUpdate,
    /// Schedule an animation frame. False when one is already pending.
    pub request_frame: bool,
}

/// What the host should do after an animation frame fires.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    /// Styles to apply, or `None` when progress didn't move.
    pub frame: Option<Frame>,
    pub schedule_next: bool,
}

/// Ties the pieces together for a single pinned section. The host feeds it
/// scroll offsets and animation-frame callbacks and applies whatever comes
/// back; if its elements are gone it simply drops the outcome.
#[derive(Clone, Debug)]
pub struct Sequencer {
    config: SequencerConfig,
    storyboard: Storyboard,
    smoother: ProgressSmoother,
    pin: PinController,
}

impl Sequencer {
    pub fn new(config: SequencerConfig) -> Self {
        let storyboard = Storyboard::why_aangan(&config);
        Self::with_storyboard(config, storyboard)
    }

    pub fn with_storyboard(config: SequencerConfig, storyboard: Storyboard) -> Self {
        Self {
            smoother: ProgressSmoother::new(&config),
            pin: PinController::new(&config),
            config,
            storyboard,
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn progress(&self) -> f64 {
        self.smoother.progress()
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_pinned()
    }

    pub fn on_scroll(&mut self, scroll_y: f64, track: &TrackGeometry) -> ScrollOutcome {
        let request_frame = self.smoother.set_target(track.progress_at(scroll_y));
        let pin = self.pin.update(scroll_y, track);
        ScrollOutcome { pin, request_frame }
    }

    pub fn on_animation_frame(&mut self) -> FrameOutcome {
        let tick = self.smoother.tick();
        let frame = tick.changed.then(|| self.frame_at(tick.progress));
        FrameOutcome {
            frame,
            schedule_next: tick.schedule_next,
        }
    }

    /// Frame for the current progress, e.g. for the first paint.
    pub fn current_frame(&self) -> Frame {
        self.frame_at(self.smoother.progress())
    }

    fn frame_at(&self, progress: f64) -> Frame {
        compute_frame(&self.storyboard, &self.config, progress, self.pin.is_pinned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::pinning::PinState;

    fn track() -> TrackGeometry {
        TrackGeometry::measure(1000.0, 4000.0, 900.0, 60.0)
    }

    fn drain(seq: &mut Sequencer) -> Option<Frame> {
        let mut last = None;
        for _ in 0..500 {
            let outcome = seq.on_animation_frame();
            if outcome.frame.is_some() {
                last = outcome.frame;
            }
            if !outcome.schedule_next {
                return last;
            }
        }
        panic!("sequencer never settled");
    }

    #[test]
    fn scroll_burst_schedules_a_single_frame() {
        let mut seq = Sequencer::new(SequencerConfig::desktop());
        let t = track();
        assert!(seq.on_scroll(1500.0, &t).request_frame);
        assert!(!seq.on_scroll(1600.0, &t).request_frame);
        assert!(!seq.on_scroll(1700.0, &t).request_frame);
    }

    #[test]
    fn scrolling_through_the_section() {
        let mut seq = Sequencer::new(SequencerConfig::desktop());
        let t = track();

        let outcome = seq.on_scroll(500.0, &t);
        assert_eq!(outcome.pin.state, PinState::Above);

        let outcome = seq.on_scroll(2520.0, &t);
        assert_eq!(outcome.pin.state, PinState::Within);
        assert!(outcome.pin.pinned_changed);
        let frame = drain(&mut seq).expect("progress moved");
        assert!((frame.progress - 0.5).abs() < 1e-3);
        assert!(frame.hint_visible);

        let outcome = seq.on_scroll(6000.0, &t);
        assert_eq!(outcome.pin.state, PinState::Below);
        assert!(!seq.is_pinned());
        let frame = drain(&mut seq).expect("progress moved");
        assert_eq!(frame.progress, 1.0);
        assert!(!frame.hint_visible);
    }

    #[test]
    fn idle_frame_renders_nothing() {
        let mut seq = Sequencer::new(SequencerConfig::mobile());
        let outcome = seq.on_animation_frame();
        assert!(outcome.frame.is_none());
        assert!(!outcome.schedule_next);
        assert_eq!(seq.current_frame().items.len(), 15);
    }
}
