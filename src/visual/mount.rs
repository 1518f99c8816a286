use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    camera::Viewport,
    gallery::{ActiveDemo, GalleryLibrary},
    trail::{MountTarget, SlotId, TrailSession},
    visual::images::TrailImages,
};

/// Title shown while no page is mounted
const IDLE_TITLE: &str = "Image Trail Effects";

/// One pool slot's sprite
#[derive(Component, Debug, Clone, Copy)]
pub struct TrailSlot(pub SlotId);

/// Container entity for trails mounted with `MountTarget::Container`
#[derive(Component)]
pub struct TrailLayer;

/// Randomness for sizes, flings and drops
#[derive(Resource)]
pub struct TrailRng(pub StdRng);

impl Default for TrailRng {
    fn default() -> Self {
        Self(StdRng::from_rng(&mut rand::rng()))
    }
}

/// Spawn one hidden sprite per pool slot, under a fresh layer for container mounts
pub fn spawn_trail_slots(commands: &mut Commands, session: &TrailSession, target: MountTarget) {
    let layer = match target {
        MountTarget::Container => Some(
            commands
                .spawn((TrailLayer, Transform::default(), Visibility::default()))
                .id(),
        ),
        MountTarget::Root => None,
    };

    for (slot, _) in session.pool().iter() {
        let mut entity = commands.spawn((
            TrailSlot(slot),
            Sprite::default(),
            Transform::default(),
            Visibility::Hidden,
        ));
        if let Some(layer) = layer {
            entity.insert(ChildOf(layer));
        }
    }
}

/// System: Stop the mounted trail and drop every entity it created
pub fn unmount_trail(
    mut commands: Commands,
    session: Option<ResMut<TrailSession>>,
    layers: Query<Entity, With<TrailLayer>>,
    loose_slots: Query<Entity, (With<TrailSlot>, Without<ChildOf>)>,
    mut trail_images: ResMut<TrailImages>,
) {
    if let Some(mut session) = session {
        session.unmount();
        commands.remove_resource::<TrailSession>();
        info!("Unmounted {} trail", session.variant().name());
    }
    for entity in layers.iter().chain(loose_slots.iter()) {
        // Despawning the layer takes its slot children with it
        commands.entity(entity).despawn();
    }
    trail_images.clear();
}

/// System: Mount the trail of the selected page, if any
pub fn mount_active_demo(
    mut commands: Commands,
    active: Res<ActiveDemo>,
    library: Option<Res<GalleryLibrary>>,
    asset_server: Res<AssetServer>,
    viewport: Res<Viewport>,
    mut trail_images: ResMut<TrailImages>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let page = active
        .current()
        .and_then(|index| library.as_deref()?.get(index));

    if let Ok(mut window) = windows.single_mut() {
        window.title = page.map_or(IDLE_TITLE, |page| page.title.as_str()).to_string();
    }

    let Some(page) = page else {
        return;
    };

    let session = match TrailSession::mount(&page.trail, viewport.size) {
        Ok(session) => session,
        Err(err) => {
            warn!("Not mounting trail for '{}': {}", page.title, err);
            return;
        }
    };

    trail_images.load(&asset_server, session.images().sources());
    spawn_trail_slots(&mut commands, &session, page.trail.mount_target());

    info!(
        "Mounted '{}': {} trail, {} slots, threshold {}",
        page.title,
        page.trail.variant.name(),
        session.pool().len(),
        page.trail.threshold()
    );
    commands.insert_resource(session);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailConfig;
    use crate::trail::variant::TrailVariant;
    use bevy::ecs::system::RunSystemOnce;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

    fn config(mount: MountTarget) -> TrailConfig {
        TrailConfig {
            count: Some(4),
            mount: Some(mount),
            ..TrailConfig::new(
                vec!["a.jpg".to_string(), "b.jpg".to_string()],
                TrailVariant::Grow { width: 200.0 },
            )
        }
    }

    /// A world with a trail mounted and one spawn in flight
    fn mounted_world(mount: MountTarget) -> World {
        let config = config(mount);
        let mut session = TrailSession::mount(&config, VIEWPORT).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        session.pointer_moved(Vec2::new(300.0, 300.0));
        assert!(session.tick(0.0, &mut rng).spawned.is_some());
        session.tick(0.4, &mut rng);

        let mut world = World::new();
        world.init_resource::<TrailImages>();
        spawn_trail_slots(&mut world.commands(), &session, config.mount_target());
        world.insert_resource(session);
        world.flush();
        world
    }

    fn count<F: bevy::ecs::query::QueryFilter>(world: &mut World) -> usize {
        world.query_filtered::<Entity, F>().iter(world).count()
    }

    #[test]
    fn test_root_mount_spawns_top_level_slots() {
        let mut world = mounted_world(MountTarget::Root);

        assert_eq!(count::<With<TrailSlot>>(&mut world), 4);
        assert_eq!(count::<(With<TrailSlot>, With<ChildOf>)>(&mut world), 0);
        assert_eq!(count::<With<TrailLayer>>(&mut world), 0);
    }

    #[test]
    fn test_container_mount_parents_slots_to_layer() {
        let mut world = mounted_world(MountTarget::Container);

        assert_eq!(count::<With<TrailLayer>>(&mut world), 1);
        assert_eq!(count::<(With<TrailSlot>, With<ChildOf>)>(&mut world), 4);
    }

    #[test]
    fn test_unmount_mid_animation_removes_every_entity() {
        for mount in [MountTarget::Root, MountTarget::Container] {
            let mut world = mounted_world(mount);
            assert_eq!(
                world.resource::<TrailSession>().pool().active_count(),
                1,
                "spawn still animating"
            );

            world.run_system_once(unmount_trail).unwrap();

            assert_eq!(count::<With<TrailSlot>>(&mut world), 0, "{:?}", mount);
            assert_eq!(count::<With<TrailLayer>>(&mut world), 0, "{:?}", mount);
            assert!(!world.contains_resource::<TrailSession>());
        }
    }

    #[test]
    fn test_unmount_without_trail_is_harmless() {
        let mut world = World::new();
        world.init_resource::<TrailImages>();

        world.run_system_once(unmount_trail).unwrap();
        assert_eq!(count::<With<TrailSlot>>(&mut world), 0);
    }
}
