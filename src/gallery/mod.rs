mod selection;

use bevy::prelude::*;
use serde::Deserialize;

use crate::trail::TrailConfig;
pub use selection::{ActiveDemo, select_demo_from_keys};

const GALLERY_JSON: &str = include_str!("../../assets/gallery.json");

/// One page of the portfolio: a title and the trail it mounts
#[derive(Debug, Clone, Deserialize)]
pub struct DemoPage {
    pub title: String,
    pub trail: TrailConfig,
}

/// Resource containing every demo page, in footer order
#[derive(Resource, Debug, Deserialize)]
pub struct GalleryLibrary {
    demos: Vec<DemoPage>,
}

impl GalleryLibrary {
    /// Load the gallery from the embedded JSON
    pub fn load() -> Result<Self, String> {
        Self::from_json(GALLERY_JSON)
    }

    fn from_json(json: &str) -> Result<Self, String> {
        let library: GalleryLibrary =
            serde_json::from_str(json).map_err(|e| format!("Gallery parse error: {}", e))?;

        if library.demos.is_empty() {
            return Err("Gallery has no demo pages".to_string());
        }

        Ok(library)
    }

    pub fn get(&self, index: usize) -> Option<&DemoPage> {
        self.demos.get(index)
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }
}

/// System: Load the gallery and open the first page
pub fn setup_gallery(mut commands: Commands) {
    match GalleryLibrary::load() {
        Ok(library) => {
            info!("Gallery loaded: {} demo pages", library.len());
            for (i, page) in library.demos.iter().enumerate() {
                info!(
                    "  - [{}] {} ({} trail, {} images)",
                    i + 1,
                    page.title,
                    page.trail.variant.name(),
                    page.trail.images.len()
                );
            }

            commands.insert_resource(ActiveDemo::opened(library.len(), 0));
            commands.insert_resource(library);
        }
        Err(e) => {
            // Nothing to mount; the window stays empty
            error!("Failed to load gallery: {}", e);
            commands.insert_resource(ActiveDemo::closed(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::variant::TrailVariant;

    #[test]
    fn test_embedded_gallery_is_valid() {
        let library = GalleryLibrary::load().unwrap();
        assert_eq!(library.len(), 4);

        for i in 0..library.len() {
            let page = library.get(i).unwrap();
            assert!(
                page.trail.validate().is_ok(),
                "{} has an invalid trail",
                page.title
            );
        }
    }

    #[test]
    fn test_first_page_is_shrink_with_nine_slots() {
        let library = GalleryLibrary::load().unwrap();
        let first = &library.get(0).unwrap().trail;

        assert_eq!(first.variant, TrailVariant::Shrink { size: 170.0 });
        assert_eq!(first.pool_size(), 9);
        assert_eq!(first.images.len(), 6);
    }

    #[test]
    fn test_empty_gallery_rejected() {
        assert!(GalleryLibrary::from_json(r#"{ "demos": [] }"#).is_err());
        assert!(GalleryLibrary::from_json("not json").is_err());
    }
}
