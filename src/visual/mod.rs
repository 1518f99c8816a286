pub mod images;
pub mod mount;
pub mod plugin;
pub mod sync;

pub use plugin::TrailPlugin;
