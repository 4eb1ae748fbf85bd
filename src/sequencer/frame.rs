use serde::Serialize;

use super::easing::clamp01;
use super::scenes::Storyboard;
use super::tuning::SequencerConfig;

/// Base stacking level for storyboard layers; the backdrop sits below it and the
/// title and UI above.
pub const ITEMS_Z_BASE: i32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemFrame {
    pub id: String,
    pub opacity: f64,
    pub translate_y_px: f64,
    pub blur_px: f64,
    pub visible: bool,
    pub z_index: i32,
}

/// Everything a renderer needs to draw the section at one progress value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub progress: f64,
    pub items: Vec<ItemFrame>,
    /// Fill ratio of the vertical progress bar.
    pub progress_fill: f64,
    /// Whether the "keep scrolling" hint is shown.
    pub hint_visible: bool,
}

pub fn compute_frame(
    storyboard: &Storyboard,
    config: &SequencerConfig,
    progress: f64,
    pinned: bool,
) -> Frame {
    let items = storyboard
        .items()
        .iter()
        .map(|item| {
            let alpha = storyboard.item_alpha(item, progress);
            ItemFrame {
                id: item.id.clone(),
                opacity: alpha,
                translate_y_px: (1.0 - alpha) * config.slide_px,
                blur_px: (1.0 - alpha) * config.max_blur_px,
                visible: alpha > config.visibility_threshold,
                z_index: ITEMS_Z_BASE + 2 + item.ordinal as i32,
            }
        })
        .collect();

    Frame {
        progress,
        items,
        progress_fill: clamp01(progress),
        hint_visible: pinned
            && progress > config.hint_min_progress
            && progress < config.hint_max_progress,
    }
}
