use crate::gallery::{ActiveDemo, select_demo_from_keys, setup_gallery};
use crate::visual::images::{TrailImages, measure_trail_images};
use crate::visual::mount::{TrailRng, mount_active_demo, unmount_trail};
use crate::visual::sync::{advance_trail, feed_pointer, sync_trail_sprites};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailRng>()
            .init_resource::<TrailImages>()
            // Load demo pages first; the first selection mounts on the next update
            .add_systems(Startup, setup_gallery)
            .add_systems(
                Update,
                (
                    // Page lifecycle: the old trail is gone before the new one mounts
                    select_demo_from_keys,
                    (unmount_trail, mount_active_demo)
                        .chain()
                        .run_if(resource_changed::<ActiveDemo>),
                    // Inputs to the mounted trail
                    feed_pointer,
                    measure_trail_images,
                    // Render loop
                    advance_trail,
                    sync_trail_sprites,
                )
                    .chain()
                    .run_if(any_with_component::<PrimaryWindow>),
            );
    }
}
