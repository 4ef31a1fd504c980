pub mod actions;
pub mod image_store;
pub mod render_cache;

pub use actions::{ActionMessage, ActionOutcome, DeskActions};
pub use image_store::ImageStore;
pub use render_cache::RenderCacheHandle;
