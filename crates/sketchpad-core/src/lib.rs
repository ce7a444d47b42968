//! Sketchpad Core Library
//!
//! Platform-agnostic drawing state for the Sketchpad canvas editor: tool
//! selection, the pointer drag state machine, shape geometry, and the
//! snapshot-based undo/redo history.

pub mod color;
pub mod config;
pub mod editor;
pub mod history;
pub mod redraw;
pub mod shapes;
pub mod storage;
pub mod surface;
pub mod tools;

pub use color::{Color, ColorParseError};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorError, EditorResult, Notice};
pub use history::{History, Snapshot};
pub use redraw::{RedrawSlot, RedrawTicket};
pub use shapes::Shape;
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use surface::{Stroke, Surface, SurfaceError, SurfaceResult};
pub use tools::{DragEnd, DragUpdate, ToolKind, ToolManager, ToolSelection, ToolState};

/// Re-exported so callers can build pointer positions without a direct kurbo dependency.
pub use kurbo::Point;
