//! Slateboard Application
//!
//! The host-facing shell: a [`Whiteboard`] with a board and a controls
//! viewport, the toolbar layout, and config file loading.

mod config;
pub mod layout;
mod whiteboard;

pub use config::load_config;
pub use slateboard_core::ConfigError;
pub use whiteboard::{Viewport, ViewportId, Whiteboard, WhiteboardError, WhiteboardResult};
