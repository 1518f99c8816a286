use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::trail::TrailSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageStatus {
    Pending,
    Decoded,
    /// Load failed; the slot keeps spawning with the default texture
    Failed,
}

/// Image handles of the mounted trail, indexed like its image cycle
#[derive(Resource, Default)]
pub struct TrailImages {
    handles: Vec<Handle<Image>>,
    status: Vec<ImageStatus>,
}

impl TrailImages {
    pub fn load(&mut self, asset_server: &AssetServer, sources: &[String]) {
        self.handles = sources
            .iter()
            .map(|path| asset_server.load(path.clone()))
            .collect();
        self.status = vec![ImageStatus::Pending; self.handles.len()];
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.status.clear();
    }

    /// Texture to draw for an image: the image itself once decoded,
    /// bevy's default white texture until then or if it never loads
    pub fn texture(&self, index: usize) -> Handle<Image> {
        match (self.handles.get(index), self.status.get(index)) {
            (Some(handle), Some(ImageStatus::Decoded)) => handle.clone(),
            _ => Handle::default(),
        }
    }

    /// Every image has either decoded or failed
    pub fn is_settled(&self) -> bool {
        self.status.iter().all(|status| *status != ImageStatus::Pending)
    }
}

/// System: Hand decoded image sizes to the session; swallow load failures
pub fn measure_trail_images(
    mut trail_images: ResMut<TrailImages>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    session: Option<ResMut<TrailSession>>,
) {
    let Some(mut session) = session else {
        return;
    };

    for index in 0..trail_images.handles.len() {
        if trail_images.status[index] != ImageStatus::Pending {
            continue;
        }

        let handle = &trail_images.handles[index];
        if let Some(image) = images.get(handle) {
            session.image_decoded(index, image.size_f32());
            trail_images.status[index] = ImageStatus::Decoded;
        } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
            debug!(
                "Trail image {:?} failed to load, keeping it undecoded: {}",
                session.images().source(index),
                err
            );
            trail_images.status[index] = ImageStatus::Failed;
        }
    }

    if trail_images.is_changed() && trail_images.is_settled() {
        info!("Trail images settled; starting the render loop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_images() -> (TrailImages, Handle<Image>, Handle<Image>) {
        let mut assets = Assets::<Image>::default();
        let first = assets.add(Image::default());
        let second = assets.add(Image::default());

        let images = TrailImages {
            handles: vec![first.clone(), second.clone()],
            status: vec![ImageStatus::Pending; 2],
        };
        (images, first, second)
    }

    #[test]
    fn test_texture_falls_back_until_decoded() {
        let (mut images, first, _) = two_images();
        assert_eq!(images.texture(0), Handle::default());

        images.status[0] = ImageStatus::Decoded;
        assert_eq!(images.texture(0), first);
    }

    #[test]
    fn test_failed_image_draws_default_texture() {
        let (mut images, _, second) = two_images();
        images.status[1] = ImageStatus::Failed;

        assert_ne!(images.texture(1), second);
        assert_eq!(images.texture(1), Handle::default());
        assert_eq!(images.texture(7), Handle::default(), "unknown index");
    }

    #[test]
    fn test_settled_once_nothing_pending() {
        let (mut images, _, _) = two_images();
        assert!(!images.is_settled());

        images.status[0] = ImageStatus::Decoded;
        assert!(!images.is_settled(), "second image still loading");

        images.status[1] = ImageStatus::Failed;
        assert!(images.is_settled());

        images.clear();
        assert!(images.is_settled());
    }
}
