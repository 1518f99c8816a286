//! Cursor-following image trail: pointer tracking, spawning, the slot pool
//! and per-slot timelines. Nothing in here touches the ECS; the session is
//! driven by an explicit clock so it can be ticked by hand.

pub mod config;
pub mod easing;
pub mod pointer;
pub mod pool;
pub mod session;
pub mod spawn;
pub mod timeline;
pub mod variant;

pub use config::{MountTarget, TrailConfig};
pub use pool::SlotId;
pub use session::TrailSession;
pub use timeline::ItemVisual;
