//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window and idle-time close flushing
//! - `input` - Target view key bindings
//! - `shell` - Overlay host: attached overlays, focus and replayed keys

pub mod app;
pub mod input;
pub mod shell;

pub use app::App;
