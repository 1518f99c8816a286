use bevy::prelude::*;

mod camera;
mod gallery;
mod input;
mod trail;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use input::InputPlugin;
use visual::TrailPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Image Trail Effects".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.06)))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(TrailPlugin);

    app.run();
}
