use serde::Serialize;

use super::easing::clamp01;
use super::tuning::SequencerConfig;

/// Navbar height used when no fixed header can be found on the page.
pub const FALLBACK_NAVBAR_PX: f64 = 42.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinState {
    Above,
    Within,
    Below,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Positioning {
    Absolute,
    Fixed,
}

/// Where the stage container should sit for a given pin state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub positioning: Positioning,
    pub top_px: f64,
    pub height_px: f64,
}

/// A header element that might be the site navbar.
#[derive(Clone, Copy, Debug)]
pub struct NavbarCandidate {
    pub height: f64,
    pub fixed_at_top: bool,
}

/// Height to offset pinning by. An explicitly marked navbar wins; otherwise the
/// first header fixed to the top of the viewport; otherwise a fallback.
pub fn navbar_offset(explicit: Option<f64>, candidates: &[NavbarCandidate]) -> f64 {
    if let Some(height) = explicit {
        return height.max(0.0);
    }
    candidates
        .iter()
        .find(|c| c.fixed_at_top)
        .map(|c| c.height.max(0.0))
        .unwrap_or(FALLBACK_NAVBAR_PX)
}

/// Scroll track of the pinned section, in document pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrackGeometry {
    pub navbar_px: f64,
    pub pin_height: f64,
    pub track_start: f64,
    pub track_len: f64,
}

impl TrackGeometry {
    pub fn measure(
        section_top: f64,
        section_height: f64,
        viewport_height: f64,
        navbar_px: f64,
    ) -> Self {
        let pin_height = (viewport_height - navbar_px).max(1.0);
        let track_len = (section_height - pin_height).max(1.0);
        Self {
            navbar_px,
            pin_height,
            track_start: section_top - navbar_px,
            track_len,
        }
    }

    pub fn track_end(&self) -> f64 {
        self.track_start + self.track_len
    }

    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        clamp01((scroll_y - self.track_start) / self.track_len)
    }
}

#[derive(Clone, Debug)]
pub struct PinController {
    state: PinState,
    enter_pad: f64,
    exit_pad: f64,
    bottom_gutter: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PinUpdate {
    pub state: PinState,
    pub placement: Placement,
    /// The pinned flag flipped on this update.
    pub pinned_changed: bool,
}

impl PinController {
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            state: PinState::Above,
            enter_pad: config.enter_pad_px,
            exit_pad: config.exit_pad_px,
            bottom_gutter: config.bottom_gutter_px,
        }
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    pub fn is_pinned(&self) -> bool {
        self.state == PinState::Within
    }

    /// Next state for `scroll_y`. While pinned the smaller exit pad applies,
    /// otherwise the larger enter pad, so the boundary can't flap.
    pub fn classify(&self, scroll_y: f64, track: &TrackGeometry) -> PinState {
        let pad = if self.state == PinState::Within {
            self.exit_pad
        } else {
            self.enter_pad
        };
        if scroll_y < track.track_start + pad {
            PinState::Above
        } else if scroll_y >= track.track_end() - pad {
            PinState::Below
        } else {
            PinState::Within
        }
    }

    pub fn update(&mut self, scroll_y: f64, track: &TrackGeometry) -> PinUpdate {
        let was_pinned = self.is_pinned();
        self.state = self.classify(scroll_y, track);
        PinUpdate {
            state: self.state,
            placement: self.placement(track),
            pinned_changed: was_pinned != self.is_pinned(),
        }
    }

    pub fn placement(&self, track: &TrackGeometry) -> Placement {
        match self.state {
            PinState::Above => Placement {
                positioning: Positioning::Absolute,
                top_px: track.navbar_px,
                height_px: track.pin_height,
            },
            PinState::Within => Placement {
                positioning: Positioning::Fixed,
                top_px: track.navbar_px,
                height_px: track.pin_height,
            },
            PinState::Below => Placement {
                positioning: Positioning::Absolute,
                top_px: (track.track_len - self.bottom_gutter + track.navbar_px).round(),
                height_px: track.pin_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // navbar 60, viewport 900, section at 1000 and 4000 tall:
    // pin height 840, track 940..4100.
    fn track() -> TrackGeometry {
        TrackGeometry::measure(1000.0, 4000.0, 900.0, 60.0)
    }

    #[test]
    fn geometry_matches_layout() {
        let t = track();
        assert_eq!(t.pin_height, 840.0);
        assert_eq!(t.track_start, 940.0);
        assert_eq!(t.track_len, 3160.0);
        assert_eq!(t.track_end(), 4100.0);
    }

    #[test]
    fn degenerate_sizes_stay_positive() {
        let t = TrackGeometry::measure(0.0, 10.0, 20.0, 40.0);
        assert_eq!(t.pin_height, 1.0);
        assert_eq!(t.track_len, 9.0);
        let t = TrackGeometry::measure(0.0, 100.0, 900.0, 0.0);
        assert_eq!(t.track_len, 1.0);
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let t = track();
        assert_eq!(t.progress_at(0.0), 0.0);
        assert_eq!(t.progress_at(10_000.0), 1.0);
        let mut prev = 0.0;
        let mut y = 0.0;
        while y < 5000.0 {
            let p = t.progress_at(y);
            assert!(p >= prev);
            prev = p;
            y += 7.5;
        }
        assert!((t.progress_at(940.0 + 1580.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn enters_only_past_enter_pad() {
        let t = track();
        let mut pin = PinController::new(&SequencerConfig::desktop());
        assert_eq!(pin.update(940.0 + 60.0, &t).state, PinState::Above);
        let update = pin.update(940.0 + 72.0, &t);
        assert_eq!(update.state, PinState::Within);
        assert!(update.pinned_changed);
        assert_eq!(update.placement.positioning, Positioning::Fixed);
        assert_eq!(update.placement.top_px, 60.0);
    }

    #[test]
    fn stays_pinned_between_exit_and_enter_thresholds() {
        let t = track();
        let mut pin = PinController::new(&SequencerConfig::desktop());
        pin.update(2000.0, &t);
        assert!(pin.is_pinned());
        // below the enter threshold, above the exit threshold
        let update = pin.update(940.0 + 60.0, &t);
        assert_eq!(update.state, PinState::Within);
        assert!(!update.pinned_changed);
        assert_eq!(pin.update(940.0 + 55.0, &t).state, PinState::Above);
        assert!(!pin.is_pinned());
        // and must clear the enter pad again to re-pin
        assert_eq!(pin.update(940.0 + 60.0, &t).state, PinState::Above);
    }

    #[test]
    fn bottom_boundary_has_hysteresis_too() {
        let t = track();
        let mut pin = PinController::new(&SequencerConfig::desktop());
        pin.update(2000.0, &t);
        assert_eq!(pin.update(4100.0 - 60.0, &t).state, PinState::Within);
        let update = pin.update(4100.0 - 56.0, &t);
        assert_eq!(update.state, PinState::Below);
        assert_eq!(update.placement.positioning, Positioning::Absolute);
        assert_eq!(update.placement.top_px, 3160.0 - 70.0 + 60.0);
        assert_eq!(pin.update(4100.0 - 60.0, &t).state, PinState::Below);
        assert_eq!(pin.update(4100.0 - 73.0, &t).state, PinState::Within);
    }

    #[test]
    fn mobile_boundaries_are_crisp() {
        let t = track();
        let mut pin = PinController::new(&SequencerConfig::mobile());
        assert_eq!(pin.update(939.0, &t).state, PinState::Above);
        assert_eq!(pin.update(940.0, &t).state, PinState::Within);
        assert_eq!(pin.update(4100.0, &t).state, PinState::Below);
        assert_eq!(pin.placement(&t).top_px, 3160.0 - 40.0 + 60.0);
    }

    #[test]
    fn navbar_resolution_order() {
        let candidates = [
            NavbarCandidate {
                height: 90.0,
                fixed_at_top: false,
            },
            NavbarCandidate {
                height: 64.0,
                fixed_at_top: true,
            },
        ];
        assert_eq!(navbar_offset(Some(50.0), &candidates), 50.0);
        assert_eq!(navbar_offset(None, &candidates), 64.0);
        assert_eq!(navbar_offset(None, &[]), FALLBACK_NAVBAR_PX);
    }
}
