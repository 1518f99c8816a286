//! Per-item animation timelines built from declarative tween descriptors.

use bevy::math::Vec2;

use super::easing::Ease;

/// Where idle items are parked (viewport pixels)
const PARKED_POSITION: Vec2 = Vec2::splat(-9999.0);

/// Transform-origin at the middle of the box
pub const CENTER_PIVOT: Vec2 = Vec2::splat(0.5);

/// Visual state written to one pool slot every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    /// Top-left translation in viewport pixels
    pub position: Vec2,
    pub opacity: f32,
    /// Per-axis scale factor
    pub scale: Vec2,
    /// Clockwise rotation in degrees
    pub rotation: f32,
    pub z_index: u32,
    /// Transform origin as a fraction of the box (may lie outside it)
    pub pivot: Vec2,
}

impl ItemVisual {
    pub fn hidden() -> Self {
        Self {
            position: PARKED_POSITION,
            opacity: 0.0,
            scale: Vec2::ONE,
            rotation: 0.0,
            z_index: 0,
            pivot: CENTER_PIVOT,
        }
    }

    /// The state a spawn snaps to before any tween runs
    pub fn shown(position: Vec2, z_index: u32, pivot: Vec2) -> Self {
        Self {
            position,
            opacity: 1.0,
            scale: Vec2::ONE,
            rotation: 0.0,
            z_index,
            pivot,
        }
    }

    /// Center of the rendered box after scale and rotation about the pivot
    pub fn center(&self, size: Vec2) -> Vec2 {
        let pivot_point = self.position + self.pivot * size;
        let to_center = (size * 0.5 - self.pivot * size) * self.scale;
        // y points down, so a positive angle turns clockwise on screen
        pivot_point + Vec2::from_angle(self.rotation.to_radians()).rotate(to_center)
    }

    pub fn get(&self, property: TweenProperty) -> f32 {
        match property {
            TweenProperty::X => self.position.x,
            TweenProperty::Y => self.position.y,
            TweenProperty::Opacity => self.opacity,
            TweenProperty::Scale | TweenProperty::ScaleX => self.scale.x,
            TweenProperty::ScaleY => self.scale.y,
            TweenProperty::Rotation => self.rotation,
        }
    }

    pub fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.position.x = value,
            TweenProperty::Y => self.position.y = value,
            TweenProperty::Opacity => self.opacity = value,
            TweenProperty::Scale => self.scale = Vec2::splat(value),
            TweenProperty::ScaleX => self.scale.x = value,
            TweenProperty::ScaleY => self.scale.y = value,
            TweenProperty::Rotation => self.rotation = value,
        }
    }
}

impl Default for ItemVisual {
    fn default() -> Self {
        Self::hidden()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenProperty {
    X,
    Y,
    Opacity,
    /// Uniform scale (reads back the x factor)
    Scale,
    ScaleX,
    ScaleY,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Absolute end value
    To(f32),
    /// End value relative to wherever the property is when the tween starts
    By(f32),
}

/// One sub-interpolation of a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub property: TweenProperty,
    pub target: TweenTarget,
    pub ease: Ease,
    /// Seconds after spawn before the tween starts
    pub delay: f32,
    /// Seconds from start to end
    pub duration: f32,
}

impl TweenSpec {
    pub fn to(property: TweenProperty, value: f32, ease: Ease, delay: f32, duration: f32) -> Self {
        Self {
            property,
            target: TweenTarget::To(value),
            ease,
            delay,
            duration,
        }
    }

    pub fn by(property: TweenProperty, delta: f32, ease: Ease, delay: f32, duration: f32) -> Self {
        Self {
            property,
            target: TweenTarget::By(delta),
            ease,
            delay,
            duration,
        }
    }

    pub fn end_time(&self) -> f32 {
        self.delay + self.duration
    }

    /// Normalized, un-eased progress at `elapsed` seconds after spawn
    fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }
}

/// Declarative description of a spawn's animation
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSpec {
    pub pivot: Vec2,
    /// Applied in order each tick; later tweens win on shared properties
    pub tweens: Vec<TweenSpec>,
}

impl TimelineSpec {
    /// Length of the whole timeline (its longest sub-tween)
    pub fn duration(&self) -> f32 {
        self.tweens
            .iter()
            .map(TweenSpec::end_time)
            .fold(0.0, f32::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
    Running,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveTween {
    spec: TweenSpec,
    /// Captured the first tick the tween is live
    from: Option<f32>,
}

/// A running animation, owned by exactly one trail item
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    start_time: f32,
    duration: f32,
    tweens: Vec<ActiveTween>,
}

impl Timeline {
    pub fn new(spec: TimelineSpec, start_time: f32) -> Self {
        let duration = spec.duration();
        Self {
            start_time,
            duration,
            tweens: spec
                .tweens
                .into_iter()
                .map(|spec| ActiveTween { spec, from: None })
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    /// Render the timeline at `now` into `visual`
    ///
    /// Once the longest tween has finished every tween is rendered at its
    /// end value and `Complete` is returned.
    pub fn advance(&mut self, now: f32, visual: &mut ItemVisual) -> TimelineStatus {
        let elapsed = now - self.start_time;
        let complete = elapsed >= self.duration;

        for tween in &mut self.tweens {
            let spec = tween.spec;
            if !complete && elapsed < spec.delay {
                continue;
            }

            let from = *tween.from.get_or_insert_with(|| visual.get(spec.property));
            let to = match spec.target {
                TweenTarget::To(value) => value,
                TweenTarget::By(delta) => from + delta,
            };
            let t = if complete { 1.0 } else { spec.progress(elapsed) };
            visual.set(spec.property, from + (to - from) * spec.ease.apply(t));
        }

        if complete {
            TimelineStatus::Complete
        } else {
            TimelineStatus::Running
        }
    }
}
