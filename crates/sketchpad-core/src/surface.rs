//! Drawing surface abstraction.

use crate::color::Color;
use crate::history::Snapshot;
use crate::shapes::Shape;
use kurbo::Point;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),
    #[error("Failed to decode snapshot: {0}")]
    Decode(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Resolved paint for a single draw call. Strokes always use round caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// The raster the editor draws into.
///
/// Implementations own the pixels; the editor only ever mutates them through
/// these calls, from a single thread.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Fill the whole surface with `background`.
    fn clear(&mut self, background: Color);

    /// Draw one round-capped segment of a freehand path.
    fn stroke_segment(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw the outline of a shape.
    fn stroke_shape(&mut self, shape: &Shape, stroke: &Stroke);

    /// Capture the current contents as an encoded snapshot.
    fn encode(&self) -> SurfaceResult<Snapshot>;

    /// Replace the contents with a decoded snapshot.
    ///
    /// Pixels not covered by the snapshot become `background`. On error the
    /// surface is left untouched.
    fn restore(&mut self, snapshot: &Snapshot, background: Color) -> SurfaceResult<()>;

    /// Reallocate at a new size. Contents are unspecified until the next clear or restore.
    fn resize(&mut self, width: u32, height: u32);
}
