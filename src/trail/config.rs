use serde::Deserialize;
use std::fmt;

use super::variant::TrailVariant;

/// Where a trail's slot entities are attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountTarget {
    /// Under a dedicated layer entity owned by the trail
    Container,
    /// Directly at the top level of the world
    Root,
}

/// Options a host page hands to the effect when mounting it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrailConfig {
    /// Image asset paths, cycled in order
    pub images: Vec<String>,
    /// Pointer travel in pixels between spawns
    #[serde(default)]
    pub threshold: Option<f32>,
    /// Number of reusable slots
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub mount: Option<MountTarget>,
    pub variant: TrailVariant,
}

/// Configuration problems that keep a trail from mounting
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyImages,
    InvalidThreshold(f32),
    EmptyPool,
    InvalidWidth(f32),
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyImages => write!(f, "No images configured for the trail"),
            ConfigError::InvalidThreshold(t) => {
                write!(f, "Spawn threshold must be a non-negative number, got {}", t)
            }
            ConfigError::EmptyPool => write!(f, "Trail pool needs at least one slot"),
            ConfigError::InvalidWidth(w) => {
                write!(f, "Image width must be a positive number, got {}", w)
            }
            ConfigError::InvalidRange { name, min, max } => {
                write!(f, "Invalid {} range: {}..{}", name, min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl TrailConfig {
    pub fn new(images: Vec<String>, variant: TrailVariant) -> Self {
        Self {
            images,
            threshold: None,
            count: None,
            mount: None,
            variant,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.is_empty() {
            return Err(ConfigError::EmptyImages);
        }

        let threshold = self.threshold();
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        if self.pool_size() == 0 {
            return Err(ConfigError::EmptyPool);
        }

        self.variant.validate()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
            .unwrap_or_else(|| self.variant.default_threshold())
    }

    pub fn pool_size(&self) -> usize {
        self.count
            .unwrap_or_else(|| self.variant.default_pool_size(self.images.len()))
    }

    pub fn mount_target(&self) -> MountTarget {
        self.mount.unwrap_or_else(|| self.variant.default_mount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("imgs/{}.jpg", i)).collect()
    }

    #[test]
    fn test_variant_defaults() {
        let shrink = TrailConfig::new(images(10), TrailVariant::Shrink { size: 170.0 });
        assert_eq!(shrink.threshold(), 100.0);
        assert_eq!(shrink.pool_size(), 6);
        assert_eq!(shrink.mount_target(), MountTarget::Container);

        let fling: TrailConfig =
            serde_json::from_str(r#"{ "images": ["a", "b", "c"], "variant": { "kind": "fling" } }"#)
                .unwrap();
        assert_eq!(fling.threshold(), 80.0);
        assert_eq!(fling.pool_size(), 3, "one slot per image");
        assert_eq!(fling.mount_target(), MountTarget::Root);
    }

    #[test]
    fn test_explicit_options_win() {
        let config = TrailConfig {
            threshold: Some(40.0),
            count: Some(9),
            ..TrailConfig::new(images(3), TrailVariant::Grow { width: 250.0 })
        };

        assert_eq!(config.threshold(), 40.0);
        assert_eq!(config.pool_size(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_images_rejected() {
        let config = TrailConfig::new(Vec::new(), TrailVariant::Shrink { size: 250.0 });
        assert_eq!(config.validate(), Err(ConfigError::EmptyImages));
    }

    #[test]
    fn test_bad_threshold_and_pool_rejected() {
        let negative = TrailConfig {
            threshold: Some(-1.0),
            ..TrailConfig::new(images(2), TrailVariant::Grow { width: 250.0 })
        };
        assert_eq!(negative.validate(), Err(ConfigError::InvalidThreshold(-1.0)));

        let empty_pool = TrailConfig {
            count: Some(0),
            ..TrailConfig::new(images(2), TrailVariant::Grow { width: 250.0 })
        };
        assert_eq!(empty_pool.validate(), Err(ConfigError::EmptyPool));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::EmptyImages.to_string(),
            "No images configured for the trail"
        );
        let range = ConfigError::InvalidRange {
            name: "width",
            min: 3.0,
            max: 1.0,
        };
        assert_eq!(range.to_string(), "Invalid width range: 3..1");
    }
}
