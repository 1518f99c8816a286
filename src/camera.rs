use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_viewport);
    }
}

/// Size of the visible area in logical pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 800.0),
        }
    }
}

impl Viewport {
    /// Convert viewport coordinates (top-left origin, y down) to world space
    /// (centered origin, y up). One world unit is one logical pixel.
    pub fn to_world(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x - self.size.x * 0.5,
            self.size.y * 0.5 - position.y,
        )
    }
}

/// Setup a 2D orthographic camera centered on the window
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Update viewport resource when window is resized
fn update_viewport(
    mut viewport: ResMut<Viewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());

    // Only update if the size actually changed
    if (size - viewport.size).abs().max_element() > 0.5 {
        viewport.size = size;
        info!("Viewport resized: {}x{}", size.x, size.y);
    }
}
