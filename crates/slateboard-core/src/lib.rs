//! Slateboard Core Library
//!
//! Platform-agnostic model and interaction logic for the Slateboard
//! whiteboard: the board/pixel [`View`] transform, the [`Vector`] model and
//! its [`VectorStore`], persistence, tools, and the mouse-capture
//! [`InteractionRouter`]. Nothing here owns a window or touches pixels;
//! drawing is expressed as [`DrawCommand`]s for a renderer to consume.

pub mod board;
pub mod config;
pub mod control;
pub mod document;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod router;
pub mod snap;
pub mod storage;
pub mod store;
pub mod surface;
pub mod tools;
pub mod vectors;
pub mod view;

pub use board::Board;
pub use config::{BoardConfig, ConfigError, NamedColor};
pub use control::{Control, ControlContext};
pub use document::{Document, DocumentError, DocumentResult, VectorRecord};
pub use draw::DrawCommand;
pub use geometry::{FixedPoint, PRECISION_BITS, bounds_of, boxes_overlap};
pub use input::{Key, MouseResult, PointerEvent, PointerKind};
pub use router::{CaptureState, InteractionRouter, Owner, Routed};
pub use snap::{GRID_SIZE, snap_to_grid};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use store::VectorStore;
pub use surface::Surface;
pub use tools::{Tool, ToolKind, ToolManager, ToolSettings};
pub use vectors::{SerializableColor, Vector, VectorId, VectorKind, VectorStyle};
pub use view::View;
