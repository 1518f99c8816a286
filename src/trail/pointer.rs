use bevy::math::Vec2;

/// A pointer position in viewport pixels (origin top-left, y down)
pub type PointerSample = Vec2;

/// Fraction of the remaining gap the smoothed position closes each tick
pub const SMOOTHING: f32 = 0.1;

/// Raw, smoothed and last-spawn pointer positions for one trail
///
/// Owned by a single session so several trails never share pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    /// Latest sample from the pointer-move listener
    raw: PointerSample,
    /// Exponentially smoothed trailing position
    smoothed: PointerSample,
    /// Raw position snapshot taken when the last spawn fired
    last_spawn: PointerSample,
}

impl PointerTracker {
    /// All three positions start at `origin`
    pub fn new(origin: PointerSample) -> Self {
        Self {
            raw: origin,
            smoothed: origin,
            last_spawn: origin,
        }
    }

    /// Record a pointer-move sample. Last writer wins before the next tick.
    pub fn record(&mut self, position: PointerSample) {
        self.raw = position;
    }

    /// Advance the smoothed position one tick toward raw
    pub fn smooth(&mut self) {
        self.smoothed = self.smoothed.lerp(self.raw, SMOOTHING);
    }

    pub fn raw(&self) -> PointerSample {
        self.raw
    }

    pub fn smoothed(&self) -> PointerSample {
        self.smoothed
    }

    #[cfg(test)]
    pub fn last_spawn(&self) -> PointerSample {
        self.last_spawn
    }

    /// Euclidean distance the raw pointer travelled since the last spawn
    pub fn distance_since_spawn(&self) -> f32 {
        self.raw.distance(self.last_spawn)
    }

    /// Snapshot the raw position as the new spawn reference
    pub fn mark_spawn(&mut self) {
        self.last_spawn = self.raw;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
