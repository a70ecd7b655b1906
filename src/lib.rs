//! more-pane - a `more`-style pager overlay
//!
//! A read-only text overlay anchored to the bottom of a target view, paged
//! with SPACE, `d`, ENTER and `q`. State lives in [`model::AppModel`] and is
//! only changed by [`update::update`]; side effects come back as [`Cmd`]s that
//! a host executes through the traits in [`host`].

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod host;
pub mod idle;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;

pub use commands::Cmd;
pub use config::PagerConfig;
pub use error::PagerError;
pub use host::{CommandReplaySink, OverlayHost, PagerHost};
pub use idle::IdleQueue;
pub use messages::{AppMsg, Msg, PagerMsg};
pub use model::AppModel;
pub use theme::Theme;
