//! The four trail flavours, each expressed as a timeline descriptor.

use bevy::math::Vec2;
use rand::Rng;
use serde::Deserialize;

use super::config::{ConfigError, MountTarget};
use super::easing::Ease;
use super::spawn::SpawnAnchors;
use super::timeline::{CENTER_PIVOT, TimelineSpec, TweenProperty, TweenSpec};

/// Display width used when a variant has no explicit one
pub const DEFAULT_ITEM_WIDTH: f32 = 250.0;

/// Pool size of the shrink variant unless configured
pub const DEFAULT_SHRINK_POOL: usize = 6;

/// Widest random rotation of a flung image, in degrees
const FLING_MAX_ROTATION: f32 = 40.0;

/// Transform origin of the squash-drop variant: centered, just above the top edge
const SQUASH_PIVOT: Vec2 = Vec2::new(0.5, -0.1);

fn default_item_width() -> f32 {
    DEFAULT_ITEM_WIDTH
}

fn default_min_width() -> f32 {
    150.0
}

fn default_max_width() -> f32 {
    350.0
}

fn default_one() -> f32 {
    1.0
}

fn default_min_fall_ratio() -> f32 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrailVariant {
    /// Chase the cursor, then fade while shrinking to a fifth
    Shrink {
        #[serde(default = "default_item_width")]
        size: f32,
    },
    /// Long chase, then fade while doubling in size
    Grow {
        #[serde(default = "default_item_width")]
        width: f32,
    },
    /// Random width per spawn; after the chase the image is flung off and spun
    Fling {
        #[serde(default = "default_min_width")]
        min_width: f32,
        #[serde(default = "default_max_width")]
        max_width: f32,
        /// Multiplier on the random fling translation
        #[serde(default = "default_one")]
        fall_distance: f32,
    },
    /// Appears at the cursor, squashes, then stretches and drops
    SquashDrop {
        /// Smallest drop as a fraction of viewport height
        #[serde(default = "default_min_fall_ratio")]
        min_fall_ratio: f32,
        #[serde(default = "default_one")]
        max_fall_ratio: f32,
        #[serde(default = "default_item_width")]
        img_width: f32,
    },
}

impl TrailVariant {
    pub fn name(&self) -> &'static str {
        match self {
            TrailVariant::Shrink { .. } => "shrink",
            TrailVariant::Grow { .. } => "grow",
            TrailVariant::Fling { .. } => "fling",
            TrailVariant::SquashDrop { .. } => "squash_drop",
        }
    }

    pub fn default_threshold(&self) -> f32 {
        match self {
            TrailVariant::Fling { .. } => 80.0,
            _ => 100.0,
        }
    }

    /// Shrink keeps a small fixed ring; the others get one slot per image
    pub fn default_pool_size(&self, image_count: usize) -> usize {
        match self {
            TrailVariant::Shrink { .. } => DEFAULT_SHRINK_POOL,
            _ => image_count,
        }
    }

    pub fn default_mount(&self) -> MountTarget {
        match self {
            TrailVariant::Shrink { .. } => MountTarget::Container,
            _ => MountTarget::Root,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            TrailVariant::Shrink { size: width } | TrailVariant::Grow { width } => {
                check_width(width)
            }
            TrailVariant::Fling {
                min_width,
                max_width,
                fall_distance,
            } => {
                check_width(min_width)?;
                check_width(max_width)?;
                check_range("width", min_width, max_width)?;
                if !fall_distance.is_finite() {
                    return Err(ConfigError::InvalidRange {
                        name: "fall_distance",
                        min: fall_distance,
                        max: fall_distance,
                    });
                }
                Ok(())
            }
            TrailVariant::SquashDrop {
                min_fall_ratio,
                max_fall_ratio,
                img_width,
            } => {
                check_width(img_width)?;
                check_range("fall_ratio", min_fall_ratio, max_fall_ratio)
            }
        }
    }

    /// Display width for the next spawn (random for fling)
    pub fn layout_width(&self, rng: &mut impl Rng) -> f32 {
        match *self {
            TrailVariant::Shrink { size } => size,
            TrailVariant::Grow { width } => width,
            TrailVariant::Fling {
                min_width,
                max_width,
                ..
            } => rng.random_range(min_width..=max_width).round(),
            TrailVariant::SquashDrop { img_width, .. } => img_width,
        }
    }

    /// Where the image first appears: the trailing position, except for
    /// squash-drop which pops up right under the cursor
    pub fn start_anchor(&self, anchors: &SpawnAnchors) -> Vec2 {
        match self {
            TrailVariant::SquashDrop { .. } => anchors.current,
            _ => anchors.trailing,
        }
    }

    /// Build the timeline for one spawn
    ///
    /// `end` is the top-left the image chases to, `size` its measured box.
    pub fn timeline(
        &self,
        end: Vec2,
        size: Vec2,
        viewport: Vec2,
        rng: &mut impl Rng,
    ) -> TimelineSpec {
        use TweenProperty::*;

        match *self {
            TrailVariant::Shrink { .. } => TimelineSpec {
                pivot: CENTER_PIVOT,
                tweens: vec![
                    TweenSpec::to(X, end.x, Ease::ExpoOut, 0.0, 0.9),
                    TweenSpec::to(Y, end.y, Ease::ExpoOut, 0.0, 0.9),
                    TweenSpec::to(Opacity, 0.0, Ease::Power1Out, 0.4, 1.0),
                    TweenSpec::to(Scale, 0.2, Ease::QuintOut, 0.4, 1.0),
                ],
            },
            TrailVariant::Grow { .. } => TimelineSpec {
                pivot: CENTER_PIVOT,
                tweens: vec![
                    TweenSpec::to(X, end.x, Ease::ExpoOut, 0.0, 1.8),
                    TweenSpec::to(Y, end.y, Ease::ExpoOut, 0.0, 1.8),
                    TweenSpec::to(Opacity, 0.0, Ease::Power1Out, 0.8, 0.8),
                    TweenSpec::to(Scale, 2.0, Ease::QuintInOut, 0.8, 0.8),
                ],
            },
            TrailVariant::Fling { fall_distance, .. } => {
                let reach = viewport + size / 2.0;
                let fling = Vec2::new(
                    rng.random_range(-reach.x..=reach.x),
                    rng.random_range(-reach.y..=reach.y),
                ) * fall_distance;
                let spin = rng.random_range(-FLING_MAX_ROTATION..=FLING_MAX_ROTATION);

                TimelineSpec {
                    pivot: CENTER_PIVOT,
                    tweens: vec![
                        TweenSpec::to(X, end.x, Ease::ExpoOut, 0.0, 1.6),
                        TweenSpec::to(Y, end.y, Ease::ExpoOut, 0.0, 1.6),
                        TweenSpec::to(Opacity, 0.0, Ease::Power1Out, 0.6, 0.8),
                        // Overlaps the chase; declared later so it takes over x/y
                        TweenSpec::by(X, fling.x, Ease::QuintOut, 0.6, 1.0),
                        TweenSpec::by(Y, fling.y, Ease::QuintOut, 0.6, 1.0),
                        TweenSpec::to(Rotation, spin, Ease::QuintOut, 0.6, 1.0),
                    ],
                }
            }
            TrailVariant::SquashDrop {
                min_fall_ratio,
                max_fall_ratio,
                ..
            } => {
                let fall = rng
                    .random_range(min_fall_ratio * viewport.y..=max_fall_ratio * viewport.y)
                    .round();

                TimelineSpec {
                    pivot: SQUASH_PIVOT,
                    tweens: vec![
                        TweenSpec::to(Opacity, 0.0, Ease::Power1Out, 0.4, 0.5),
                        TweenSpec::to(ScaleX, 0.5, Ease::QuadIn, 0.4, 0.2),
                        TweenSpec::to(ScaleY, 2.0, Ease::QuadIn, 0.4, 0.2),
                        TweenSpec::to(ScaleX, 0.7, Ease::ExpoOut, 0.6, 0.5),
                        TweenSpec::to(ScaleY, 1.7, Ease::ExpoOut, 0.6, 0.5),
                        TweenSpec::by(Y, fall, Ease::ExpoOut, 0.6, 0.5),
                    ],
                }
            }
        }
    }
}

fn check_width(width: f32) -> Result<(), ConfigError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWidth(width))
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}
