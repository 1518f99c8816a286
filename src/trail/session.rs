// trail/session.rs

use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;

use super::config::{ConfigError, TrailConfig};
use super::pointer::{PointerSample, PointerTracker};
use super::pool::{ImageCycle, SlotId, TrailPool, ZIndexCounter};
use super::spawn::{SpawnAnchors, SpawnTrigger};
#[cfg(test)]
use super::timeline::ItemVisual;
use super::variant::TrailVariant;

/// Details of a spawn, reported by the tick that fired it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawned {
    pub slot: SlotId,
    pub image: usize,
    /// Top-left the image appeared at
    pub start: Vec2,
    /// Top-left the image is chasing toward
    pub end: Vec2,
    pub z_index: u32,
}

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<Spawned>,
    /// Slots whose timeline finished this tick
    pub completed: Vec<SlotId>,
    /// Slots still animating after the tick
    pub active: usize,
}

/// One mounted image trail: all the state the render loop touches
#[derive(Debug, Clone, Resource)]
pub struct TrailSession {
    tracker: PointerTracker,
    trigger: SpawnTrigger,
    pool: TrailPool,
    images: ImageCycle,
    z_index: ZIndexCounter,
    variant: TrailVariant,
    /// Viewport size in pixels (drives fling and drop distances)
    viewport: Vec2,
    /// Cleared on unmount; every entry point checks it
    running: bool,
    spawn_count: u64,
}

impl TrailSession {
    /// Validate the configuration and build an idle trail
    ///
    /// Pointer positions start at the viewport origin.
    pub fn mount(config: &TrailConfig, viewport: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;

        log::debug!(
            "mounting {} trail: {} images, {} slots, threshold {}",
            config.variant.name(),
            config.images.len(),
            config.pool_size(),
            config.threshold()
        );

        Ok(TrailSession {
            tracker: PointerTracker::default(),
            trigger: SpawnTrigger::new(config.threshold()),
            pool: TrailPool::new(config.pool_size()),
            images: ImageCycle::new(config.images.clone()),
            z_index: ZIndexCounter::new(),
            variant: config.variant.clone(),
            viewport,
            running: true,
            spawn_count: 0,
        })
    }

    // === Query Methods ===

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn pool(&self) -> &TrailPool {
        &self.pool
    }

    pub fn images(&self) -> &ImageCycle {
        &self.images
    }

    pub fn variant(&self) -> &TrailVariant {
        &self.variant
    }

    #[cfg(test)]
    pub fn z_index(&self) -> &ZIndexCounter {
        &self.z_index
    }

    pub fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    #[cfg(test)]
    pub fn visual(&self, slot: SlotId) -> Option<&ItemVisual> {
        self.pool.get(slot).map(|item| &item.visual)
    }

    // === Listener Entry Points ===

    pub fn pointer_moved(&mut self, position: PointerSample) {
        if self.running {
            self.tracker.record(position);
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        if self.running {
            self.viewport = viewport;
        }
    }

    /// Record the decoded size of an image so later spawns keep its aspect ratio
    pub fn image_decoded(&mut self, image: usize, natural_size: Vec2) {
        self.images.set_natural_size(image, natural_size);
    }

    // === Render Loop ===

    /// Advance the trail to `now` (seconds)
    ///
    /// Order: smooth the pointer, maybe spawn, advance every timeline, then
    /// reset the stacking counter if nothing is left animating.
    pub fn tick(&mut self, now: f32, rng: &mut impl Rng) -> TickReport {
        if !self.running {
            return TickReport::default();
        }

        self.tracker.smooth();

        let spawned = self
            .trigger
            .evaluate(&mut self.tracker)
            .and_then(|anchors| self.spawn(anchors, now, rng));

        let mut completed = Vec::new();
        for (slot, item) in self.pool.iter_mut() {
            if item.advance(now) {
                completed.push(slot);
            }
        }

        let active = self.pool.active_count();
        if active == 0 {
            self.z_index.reset();
        }

        TickReport {
            spawned,
            completed,
            active,
        }
    }

    fn spawn(&mut self, anchors: SpawnAnchors, now: f32, rng: &mut impl Rng) -> Option<Spawned> {
        let slot = self.pool.next();
        let image = self.images.next();
        let item = self.pool.get_mut(slot)?;

        // Size first: the centering offset depends on it
        item.assign_image(image);
        let width = self.variant.layout_width(rng);
        item.update_rect(width, self.images.natural_size(image));
        let half = item.size() / 2.0;

        let start = self.variant.start_anchor(&anchors) - half;
        let end = anchors.current - half;
        let spec = self.variant.timeline(end, item.size(), self.viewport, rng);
        let z_index = self.z_index.next();

        item.start(start, z_index, spec, now);
        self.spawn_count += 1;

        Some(Spawned {
            slot,
            image,
            start,
            end,
            z_index,
        })
    }

    /// Stop the trail: no further ticks, listeners or visual changes
    pub fn unmount(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.pool.clear();
        log::debug!(
            "unmounted {} trail after {} spawns",
            self.variant.name(),
            self.spawn_count
        );
    }
}
