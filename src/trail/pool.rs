use bevy::math::Vec2;

use super::timeline::{ItemVisual, Timeline, TimelineSpec, TimelineStatus};

/// Stable arena index of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One reusable visual slot of the trail
#[derive(Debug, Clone, Default)]
pub struct TrailItem {
    pub visual: ItemVisual,
    /// Layout box (before transforms), refreshed by `update_rect`
    size: Vec2,
    /// Index into the image cycle currently shown by this slot
    image: Option<usize>,
    timeline: Option<Timeline>,
}

impl TrailItem {
    /// Opacity and the timeline handle are always cleared together, so the
    /// handle alone tells whether the slot is busy
    pub fn is_active(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn image(&self) -> Option<usize> {
        self.image
    }

    #[cfg(test)]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn assign_image(&mut self, image: usize) {
        self.image = Some(image);
    }

    /// Re-measure the box for a given display width
    ///
    /// Height follows the decoded image's aspect ratio. Until the image is
    /// decoded (or if it never will be) the box is square.
    pub fn update_rect(&mut self, width: f32, natural_size: Option<Vec2>) {
        self.size = match natural_size {
            Some(natural) if natural.x > 0.0 => Vec2::new(width, width * natural.y / natural.x),
            _ => Vec2::splat(width),
        };
    }

    /// Snap the slot to its spawn state and attach a fresh timeline
    ///
    /// Whatever was in flight is dropped on the spot.
    pub fn start(&mut self, position: Vec2, z_index: u32, spec: TimelineSpec, now: f32) {
        self.visual = ItemVisual::shown(position, z_index, spec.pivot);
        self.timeline = Some(Timeline::new(spec, now));
    }

    /// Advance the attached timeline, if any. Returns `true` if it completed.
    pub fn advance(&mut self, now: f32) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };

        match timeline.advance(now, &mut self.visual) {
            TimelineStatus::Running => false,
            TimelineStatus::Complete => {
                self.finish();
                true
            }
        }
    }

    /// Hide the slot and drop its timeline
    pub fn finish(&mut self) {
        self.visual.opacity = 0.0;
        self.timeline = None;
    }
}

/// Fixed-size ring of trail items handed out round-robin
#[derive(Debug, Clone)]
pub struct TrailPool {
    items: Vec<TrailItem>,
    cursor: usize,
}

impl TrailPool {
    pub fn new(len: usize) -> Self {
        Self {
            items: vec![TrailItem::default(); len],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Slot for the next spawn. Never fails on a non-empty pool.
    pub fn next(&mut self) -> SlotId {
        let slot = SlotId(self.cursor % self.items.len().max(1));
        self.cursor = (slot.0 + 1) % self.items.len().max(1);
        slot
    }

    pub fn get(&self, slot: SlotId) -> Option<&TrailItem> {
        self.items.get(slot.0)
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut TrailItem> {
        self.items.get_mut(slot.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &TrailItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (SlotId(i), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut TrailItem)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (SlotId(i), item))
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    /// Stop every animation and hide every slot
    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.finish();
        }
    }
}

/// Image sources cycled through by successive spawns
#[derive(Debug, Clone)]
pub struct ImageCycle {
    sources: Vec<String>,
    /// Pixel size of each image once decoded
    natural_sizes: Vec<Option<Vec2>>,
    cursor: usize,
}

impl ImageCycle {
    pub fn new(sources: Vec<String>) -> Self {
        let natural_sizes = vec![None; sources.len()];
        Self {
            sources,
            natural_sizes,
            cursor: 0,
        }
    }

    /// Index of the image for the next spawn, wrapping
    pub fn next(&mut self) -> usize {
        let index = self.cursor % self.sources.len().max(1);
        self.cursor = (index + 1) % self.sources.len().max(1);
        index
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn source(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    pub fn natural_size(&self, index: usize) -> Option<Vec2> {
        self.natural_sizes.get(index).copied().flatten()
    }

    pub fn set_natural_size(&mut self, index: usize, size: Vec2) {
        if let Some(slot) = self.natural_sizes.get_mut(index) {
            *slot = Some(size);
        }
    }
}

/// Stacking order handed to spawns; newest on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZIndexCounter(u32);

impl ZIndexCounter {
    pub fn new() -> Self {
        Self(1)
    }

    /// Current value, then bump
    pub fn next(&mut self) -> u32 {
        let value = self.0;
        self.0 += 1;
        value
    }

    #[cfg(test)]
    pub fn current(&self) -> u32 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }
}

impl Default for ZIndexCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::easing::Ease;
    use crate::trail::timeline::{CENTER_PIVOT, TweenProperty, TweenSpec};

    fn one_second_fade() -> TimelineSpec {
        TimelineSpec {
            pivot: CENTER_PIVOT,
            tweens: vec![TweenSpec::to(TweenProperty::Opacity, 0.0, Ease::Linear, 0.0, 1.0)],
        }
    }

    #[test]
    fn test_pool_round_robin() {
        let mut pool = TrailPool::new(4);
        let order: Vec<_> = (0..10).map(|_| pool.next().0).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_image_cycle_independent_of_pool() {
        let mut pool = TrailPool::new(9);
        let mut images = ImageCycle::new(vec!["a".into(), "b".into(), "c".into()]);

        let pairs: Vec<_> = (0..5).map(|_| (pool.next().0, images.next())).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2), (3, 0), (4, 1)]);
    }

    #[test]
    fn test_update_rect_keeps_aspect_ratio() {
        let mut item = TrailItem::default();

        item.update_rect(200.0, Some(Vec2::new(800.0, 1200.0)));
        assert_eq!(item.size(), Vec2::new(200.0, 300.0));

        item.update_rect(150.0, None);
        assert_eq!(item.size(), Vec2::splat(150.0), "undecoded images are square");
    }

    #[test]
    fn test_restart_replaces_timeline() {
        let mut item = TrailItem::default();
        item.start(Vec2::ZERO, 1, one_second_fade(), 0.0);
        item.advance(0.5);
        assert!(item.visual.opacity < 1.0);

        item.start(Vec2::new(40.0, 40.0), 2, one_second_fade(), 0.5);
        assert_eq!(item.visual.opacity, 1.0, "set step overrides the old fade");
        assert_eq!(item.visual.position, Vec2::new(40.0, 40.0));
        assert_eq!(item.visual.z_index, 2);
        assert_eq!(item.timeline().map(Timeline::start_time), Some(0.5));

        // Old timeline would have ended at 1.0
        assert!(!item.advance(1.0));
        assert!(item.is_active());
        assert!(item.advance(1.5));
    }

    #[test]
    fn test_completion_clears_handle_and_opacity() {
        let mut item = TrailItem::default();
        item.start(Vec2::ZERO, 1, one_second_fade(), 3.0);

        assert!(item.advance(4.0));
        assert!(!item.is_active());
        assert_eq!(item.visual.opacity, 0.0);
        assert!(!item.advance(5.0), "idle items do nothing");
    }

    #[test]
    fn test_z_index_post_increment_and_reset() {
        let mut z = ZIndexCounter::new();
        assert_eq!(z.next(), 1);
        assert_eq!(z.next(), 2);
        assert_eq!(z.current(), 3);

        z.reset();
        assert_eq!(z.next(), 1);
    }

    #[test]
    fn test_pool_clear_stops_everything() {
        let mut pool = TrailPool::new(3);
        for _ in 0..3 {
            let slot = pool.next();
            pool.get_mut(slot)
                .unwrap()
                .start(Vec2::ZERO, 1, one_second_fade(), 0.0);
        }
        assert_eq!(pool.active_count(), 3);

        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert!(pool.iter().all(|(_, item)| item.visual.opacity == 0.0));
    }
}
