use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerEvent>()
            .add_systems(PreUpdate, collect_pointer_events);
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left, y down
    pub position: Vec2,
}

/// Turn cursor motion and touch drags into pointer-move events
fn collect_pointer_events(
    mut ev_cursor: MessageReader<CursorMoved>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    for e in ev_cursor.read() {
        out.write(PointerEvent {
            position: e.position,
        });
    }

    for ev in touch_events.read() {
        // A lifted finger is not a move
        if matches!(ev.phase, TouchPhase::Ended | TouchPhase::Canceled) {
            continue;
        }
        out.write(PointerEvent {
            position: ev.position,
        });
    }
}
