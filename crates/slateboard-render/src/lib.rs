//! Slateboard Render Library
//!
//! Renderer abstraction for Slateboard. The core describes a frame as
//! [`DrawCommand`](slateboard_core::DrawCommand)s; [`render_frame`] feeds
//! them, together with the grid, selection boxes and controls, to any
//! [`Renderer`]. [`CommandRecorder`] is a renderer that just records.

mod frame;
mod recorder;
mod renderer;

pub use frame::render_frame;
pub use recorder::{CommandRecorder, RecordedFrame};
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
