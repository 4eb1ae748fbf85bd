use serde::Serialize;

use super::easing::{map01, smoothstep};
use super::tuning::SequencerConfig;

pub const SCENE_COUNT: usize = 3;

/// One act of the storyboard, as a sub-range of progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SceneWindow {
    pub start: f64,
    pub end: f64,
    /// Whether the scene fades out before the next one. The final scene persists.
    pub has_tail: bool,
}

pub const SCENES: [SceneWindow; SCENE_COUNT] = [
    SceneWindow {
        start: 0.0,
        end: 1.0 / 3.0,
        has_tail: true,
    },
    SceneWindow {
        start: 1.0 / 3.0,
        end: 2.0 / 3.0,
        has_tail: true,
    },
    SceneWindow {
        start: 2.0 / 3.0,
        end: 1.0,
        has_tail: false,
    },
];

impl SceneWindow {
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, p: f64) -> bool {
        p >= self.start && (p < self.end || (!self.has_tail && p <= self.end))
    }

    /// Opacity envelope of the whole scene at progress `p`: min of the head
    /// fade-in and (when present) the tail fade-out.
    pub fn envelope(&self, p: f64, head: f64, tail: f64) -> f64 {
        let len = self.len();
        let head_alpha = smoothstep(map01(p, self.start, self.start + head * len));
        let tail_alpha = if self.has_tail {
            1.0 - smoothstep(map01(p, self.end - tail * len, self.end))
        } else {
            1.0
        };
        head_alpha.min(tail_alpha)
    }
}

/// A single image layer and the progress window over which it fades in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineItem {
    pub id: String,
    pub layer: String,
    pub scene: usize,
    pub start: f64,
    pub span: f64,
    /// Position in the whole storyboard; later items stack on top.
    pub ordinal: usize,
}

#[derive(Clone, Debug)]
pub struct Storyboard {
    items: Vec<TimelineItem>,
    head: f64,
    tail: f64,
}

const WHY_AANGAN_LAYERS: [&[&str]; SCENE_COUNT] = [
    &["woman", "bubble1", "bubble2", "bubble3", "bubble4"],
    &["second_bubble1", "second_bubble2", "second_bubble3", "hand_phone", "second_bubble4"],
    &["woman2", "last_bubble1", "last_bubble2", "last_bubble3", "last_bubble4"],
];

impl Storyboard {
    /// Lays out each scene's layers evenly across the part of the scene left
    /// between its head and tail.
    pub fn build(layers: [&[&str]; SCENE_COUNT], config: &SequencerConfig) -> Self {
        let mut items = Vec::new();
        for (scene, (window, names)) in SCENES.iter().zip(layers.iter()).enumerate() {
            if names.is_empty() {
                continue;
            }
            let inner_start = config.head;
            let inner_end = if window.has_tail { 1.0 - config.tail } else { 1.0 };
            let slot = (inner_end - inner_start) / names.len() as f64;
            let fade = (slot * config.item_fade_ratio).min(1.0);
            for (i, name) in names.iter().enumerate() {
                let start_norm = inner_start + i as f64 * slot;
                let ordinal = items.len();
                items.push(TimelineItem {
                    id: format!("wa-item-{}-{}", scene, i),
                    layer: (*name).to_string(),
                    scene,
                    start: window.start + start_norm * window.len(),
                    span: fade * window.len(),
                    ordinal,
                });
            }
        }
        Self {
            items,
            head: config.head,
            tail: config.tail,
        }
    }

    /// The landing page's "Why Aangan" story: five layers per scene.
    pub fn why_aangan(config: &SequencerConfig) -> Self {
        Self::build(WHY_AANGAN_LAYERS, config)
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn scene_alpha(&self, scene: usize, p: f64) -> f64 {
        SCENES
            .get(scene)
            .map(|w| w.envelope(p, self.head, self.tail))
            .unwrap_or(0.0)
    }

    /// Item ramp times its scene envelope, so nothing shows outside its scene.
    pub fn item_alpha(&self, item: &TimelineItem, p: f64) -> f64 {
        let ramp = smoothstep(map01(p, item.start, item.start + item.span));
        ramp * self.scene_alpha(item.scene, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Storyboard {
        Storyboard::why_aangan(&SequencerConfig::desktop())
    }

    #[test]
    fn envelope_is_zero_outside_scene() {
        let b = board();
        for p in [0.0, 0.1, 0.2, 0.3, 0.7, 0.9, 1.0] {
            assert_eq!(b.scene_alpha(1, p), 0.0, "scene 2 at {p}");
        }
        for p in [0.34, 0.5, 0.6, 0.66] {
            assert_eq!(b.scene_alpha(2, p), 0.0, "scene 3 at {p}");
        }
        assert_eq!(b.scene_alpha(0, 1.0 / 3.0), 0.0);
    }

    #[test]
    fn envelope_reaches_one_within_head() {
        let b = board();
        for (i, w) in SCENES.iter().enumerate() {
            let after_head = w.start + 0.06 * w.len();
            assert!((b.scene_alpha(i, after_head) - 1.0).abs() < 1e-12);
            assert!(b.scene_alpha(i, w.start + 0.03 * w.len()) < 1.0);
        }
    }

    #[test]
    fn tail_fades_out_before_next_scene() {
        let b = board();
        let w = SCENES[0];
        let tail_start = w.end - 0.06 * w.len();
        assert!((b.scene_alpha(0, tail_start) - 1.0).abs() < 1e-12);
        let mid_tail = w.end - 0.03 * w.len();
        let a = b.scene_alpha(0, mid_tail);
        assert!(a > 0.0 && a < 1.0);
        assert_eq!(b.scene_alpha(0, w.end), 0.0);
    }

    #[test]
    fn last_scene_persists() {
        let b = board();
        assert_eq!(b.scene_alpha(2, 1.0), 1.0);
        assert_eq!(b.scene_alpha(2, 0.99), 1.0);
    }

    #[test]
    fn items_are_laid_out_in_order_without_overlap() {
        let b = board();
        assert_eq!(b.items().len(), 15);
        for scene in 0..SCENE_COUNT {
            let items: Vec<_> = b.items().iter().filter(|i| i.scene == scene).collect();
            for pair in items.windows(2) {
                assert!(pair[0].start + pair[0].span < pair[1].start);
            }
            let w = SCENES[scene];
            for item in &items {
                assert!(item.start >= w.start && item.start + item.span <= w.end);
            }
        }
        assert_eq!(b.items()[7].id, "wa-item-1-2");
        assert_eq!(b.items()[7].ordinal, 7);
    }

    #[test]
    fn item_never_shows_outside_its_scene() {
        let b = board();
        let first = &b.items()[0];
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let a = b.item_alpha(first, p);
            if !SCENES[0].contains(p) {
                assert_eq!(a, 0.0, "item visible at {p}");
            }
        }
    }

    #[test]
    fn item_fully_visible_mid_scene() {
        let b = board();
        let first = &b.items()[0];
        let p = first.start + first.span;
        assert!((b.item_alpha(first, p) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_scene_contributes_no_items() {
        let b = Storyboard::build([&["a"], &[], &["b", "c"]], &SequencerConfig::desktop());
        assert_eq!(b.items().len(), 3);
        assert_eq!(b.items()[1].id, "wa-item-2-0");
        assert!(b.items().iter().all(|i| i.scene != 1));
    }
}
