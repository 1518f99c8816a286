use bevy::prelude::*;

use crate::{
    camera::Viewport,
    input::PointerEvent,
    trail::{ItemVisual, SlotId, TrailSession},
    visual::{images::TrailImages, mount::TrailRng, mount::TrailSlot},
};

/// Depth of the lowest trail sprite
const BASE_DEPTH: f32 = 1.0;

/// Depth between neighbouring sprites in stacking order
const DEPTH_PER_RANK: f32 = 0.01;

/// System: Forward pointer moves and viewport size to the session
pub fn feed_pointer(
    mut pointer_events: MessageReader<PointerEvent>,
    viewport: Res<Viewport>,
    session: Option<ResMut<TrailSession>>,
) {
    let Some(mut session) = session else {
        pointer_events.clear();
        return;
    };

    for event in pointer_events.read() {
        session.pointer_moved(event.position);
    }

    if viewport.is_changed() {
        session.resize(viewport.size);
    }
}

/// System: One render-loop tick of the mounted trail
///
/// Held back until every image has decoded or failed, so all spawns are
/// measured against their final aspect ratio.
pub fn advance_trail(
    time: Res<Time>,
    mut rng: ResMut<TrailRng>,
    trail_images: Res<TrailImages>,
    session: Option<ResMut<TrailSession>>,
) {
    let Some(mut session) = session else {
        return;
    };
    if !trail_images.is_settled() {
        return;
    }

    let report = session.tick(time.elapsed_secs(), &mut rng.0);

    if let Some(spawned) = report.spawned {
        debug!(
            "Spawn #{} in slot {} (image {}, z {}) from {} to {}",
            session.spawn_count(),
            spawned.slot,
            spawned.image,
            spawned.z_index,
            spawned.start,
            spawned.end
        );
    }
    if !report.completed.is_empty() && report.active == 0 {
        debug!("Trail idle after {} spawns", session.spawn_count());
    }
}

/// Position of each active slot in stacking order (0 = bottom), indexed by slot
///
/// Ranks stay below the pool size however high z-indices climb.
pub fn stacking_ranks(active: impl Iterator<Item = (SlotId, u32)>, slots: usize) -> Vec<usize> {
    let mut order: Vec<(u32, SlotId)> = active.map(|(slot, z)| (z, slot)).collect();
    order.sort_unstable();

    let mut ranks = vec![0; slots];
    for (rank, (_, slot)) in order.into_iter().enumerate() {
        if let Some(entry) = ranks.get_mut(slot.0) {
            *entry = rank;
        }
    }
    ranks
}

/// Transform for a slot sprite centered on its animated box
pub fn slot_transform(visual: &ItemVisual, size: Vec2, rank: usize, viewport: &Viewport) -> Transform {
    let center = viewport.to_world(visual.center(size));

    Transform {
        translation: center.extend(BASE_DEPTH + rank as f32 * DEPTH_PER_RANK),
        // Clockwise on screen is negative about +Z once y points up
        rotation: Quat::from_rotation_z(-visual.rotation.to_radians()),
        scale: visual.scale.extend(1.0),
    }
}

/// System: Write every slot's visual state to its sprite
pub fn sync_trail_sprites(
    session: Option<Res<TrailSession>>,
    viewport: Res<Viewport>,
    trail_images: Res<TrailImages>,
    mut slots: Query<(&TrailSlot, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let Some(session) = session else {
        return;
    };
    if !session.is_running() {
        return;
    }

    let pool = session.pool();
    let ranks = stacking_ranks(
        pool.iter()
            .filter(|(_, item)| item.is_active())
            .map(|(slot, item)| (slot, item.visual.z_index)),
        pool.len(),
    );

    for (slot, mut sprite, mut transform, mut visibility) in &mut slots {
        let Some(item) = pool.get(slot.0) else {
            continue;
        };

        if !item.is_active() {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        }
        visibility.set_if_neq(Visibility::Visible);

        let texture = item
            .image()
            .map_or_else(Handle::default, |i| trail_images.texture(i));
        if sprite.image != texture {
            sprite.image = texture;
        }
        sprite.custom_size = Some(item.size());
        sprite.color = Color::WHITE.with_alpha(item.visual.opacity);

        let rank = ranks.get(slot.0.0).copied().unwrap_or_default();
        *transform = slot_transform(&item.visual, item.size(), rank, &viewport);
    }
}
