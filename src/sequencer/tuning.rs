use serde::{Deserialize, Serialize};

/// Viewport width at or below which the mobile profile is used.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Desktop,
    Mobile,
}

/// Presentational constants for the storyboard. None of these are load-bearing;
/// they only shape how the sequence feels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    pub profile: Profile,
    /// Fraction of each scene spent fading in.
    pub head: f64,
    /// Fraction of each scene (except the last) spent fading out.
    pub tail: f64,
    /// Share of an item's slot used by its own fade-in.
    pub item_fade_ratio: f64,
    /// Per-frame lerp factor pulling progress toward its target.
    pub ease: f64,
    pub snap_epsilon: f64,
    pub settle_epsilon: f64,
    pub enter_pad_px: f64,
    pub exit_pad_px: f64,
    pub bottom_gutter_px: f64,
    pub slide_px: f64,
    pub max_blur_px: f64,
    pub visibility_threshold: f64,
    pub hint_min_progress: f64,
    pub hint_max_progress: f64,
}

impl SequencerConfig {
    pub fn desktop() -> Self {
        Self {
            profile: Profile::Desktop,
            head: 0.06,
            tail: 0.06,
            item_fade_ratio: 0.9,
            ease: 0.14,
            snap_epsilon: 0.00025,
            settle_epsilon: 0.00018,
            enter_pad_px: 72.0,
            exit_pad_px: 56.0,
            bottom_gutter_px: 70.0,
            slide_px: 18.0,
            max_blur_px: 8.0,
            visibility_threshold: 0.001,
            hint_min_progress: 0.001,
            hint_max_progress: 0.995,
        }
    }

    /// Touch devices get crisp pin boundaries, a shorter slide and no blur.
    pub fn mobile() -> Self {
        Self {
            profile: Profile::Mobile,
            enter_pad_px: 0.0,
            exit_pad_px: 0.0,
            bottom_gutter_px: 40.0,
            slide_px: 10.0,
            max_blur_px: 0.0,
            ..Self::desktop()
        }
    }

    pub fn for_viewport_width(width: f64) -> Self {
        if width <= MOBILE_BREAKPOINT_PX {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::desktop()
    }
}
