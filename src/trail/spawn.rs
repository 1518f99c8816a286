use super::pointer::{PointerSample, PointerTracker};

/// Anchors handed to a new spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnAnchors {
    /// Smoothed position at fire time (where the image starts)
    pub trailing: PointerSample,
    /// Raw position at fire time (where the image is heading)
    pub current: PointerSample,
}

/// Fires a spawn once the pointer has travelled further than `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTrigger {
    threshold: f32,
}

impl SpawnTrigger {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Decide whether this tick spawns
    ///
    /// At most one spawn per call, however far past the threshold the
    /// pointer is. Firing resets the reference to the raw position.
    pub fn evaluate(&self, tracker: &mut PointerTracker) -> Option<SpawnAnchors> {
        if tracker.distance_since_spawn() <= self.threshold {
            return None;
        }

        let anchors = SpawnAnchors {
            trailing: tracker.smoothed(),
            current: tracker.raw(),
        };
        tracker.mark_spawn();
        Some(anchors)
    }
}
