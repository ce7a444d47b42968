//! Tool system: the current tool selection and the pointer drag state machine.

use crate::color::Color;
use crate::shapes::Shape;
use crate::surface::Stroke;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Brush,
    Eraser,
    Line,
    Rectangle,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pencil,
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    /// Freehand tools render each pointer move immediately instead of previewing a shape.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Brush | ToolKind::Eraser)
    }

    /// Identifier used by the tool selector.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a tool selector value that names no tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Error returned when a stroke width is zero, negative or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid stroke width: {0}")]
pub struct InvalidWidth(pub f64);

/// Tool, color and width as pushed by the input controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSelection {
    pub tool: ToolKind,
    pub color: Color,
    width: f64,
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: Color::BLACK,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ToolSelection {
    /// Create a selection. An invalid `width` falls back to [`DEFAULT_STROKE_WIDTH`].
    pub fn new(tool: ToolKind, color: Color, width: f64) -> Self {
        let mut selection = Self {
            tool,
            color,
            ..Self::default()
        };
        if selection.set_width(width).is_err() {
            log::warn!("Ignoring invalid stroke width {width}, using {DEFAULT_STROKE_WIDTH}");
        }
        selection
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the stroke width, rejecting values that are not positive and finite.
    pub fn set_width(&mut self, width: f64) -> Result<(), InvalidWidth> {
        if width.is_finite() && width > 0.0 {
            self.width = width;
            Ok(())
        } else {
            Err(InvalidWidth(width))
        }
    }

    /// Resolve the stroke for the current tool.
    ///
    /// The eraser paints with the canvas background color rather than clearing pixels.
    pub fn stroke(&self, background: Color) -> Stroke {
        let color = if self.tool == ToolKind::Eraser {
            background
        } else {
            self.color
        };
        Stroke::new(color, self.width)
    }
}

/// State of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for pointer-down.
    #[default]
    Idle,
    /// Pointer is held down.
    Dragging {
        /// Where the drag started.
        anchor: Point,
        /// Most recent pointer position; the open end of a freehand path.
        last: Point,
    },
}

/// What the canvas must do in response to a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Extend the freehand path by this segment.
    Segment(Line),
    /// Restore the last committed state and draw this shape preview.
    Preview(Shape),
}

/// How a finished drag must be finalized before committing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEnd {
    /// The path is already on the canvas.
    Freehand,
    /// Draw this shape once more, onto the current canvas.
    Shape(Shape),
}

/// Manages the current tool selection and drag state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Current tool, color and width.
    pub selection: ToolSelection,
    state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(selection: ToolSelection) -> Self {
        Self {
            selection,
            state: ToolState::Idle,
        }
    }

    /// Current tool.
    pub fn tool(&self) -> ToolKind {
        self.selection.tool
    }

    /// Set the current tool. An active drag continues with the new tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.selection.tool = tool;
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Dragging { .. })
    }

    /// Pointer-down: start a drag anchored at `point`.
    pub fn begin(&mut self, point: Point) {
        self.state = ToolState::Dragging {
            anchor: point,
            last: point,
        };
    }

    /// Pointer-move: returns what to render, or `None` when no drag is active.
    pub fn update(&mut self, point: Point) -> Option<DragUpdate> {
        let ToolState::Dragging { anchor, last } = &mut self.state else {
            return None;
        };
        let from = std::mem::replace(last, point);

        let tool = self.selection.tool;
        match Shape::from_drag(tool, *anchor, point) {
            Some(shape) => Some(DragUpdate::Preview(shape)),
            None => Some(DragUpdate::Segment(Line::new(from, point))),
        }
    }

    /// Pointer-up: finish the drag. Returns `None` if no drag was active.
    pub fn end(&mut self, point: Point) -> Option<DragEnd> {
        let ToolState::Dragging { anchor, .. } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;

        match Shape::from_drag(self.selection.tool, anchor, point) {
            Some(shape) => Some(DragEnd::Shape(shape)),
            None => Some(DragEnd::Freehand),
        }
    }

    /// Abort the current drag. Returns true if one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = ToolState::Idle;
        was_active
    }
}
