//! Sketchpad Render Library
//!
//! A CPU raster implementation of [`sketchpad_core::Surface`] with PNG snapshots.

mod codec;
mod raster;
mod rasterize;

pub use codec::{decode_png, encode_png};
pub use raster::RasterSurface;

use sketchpad_core::{Editor, EditorConfig, Storage};
use std::sync::Arc;

/// Create an editor backed by a blank raster sized from `config`.
pub fn raster_editor(storage: Arc<dyn Storage>, config: EditorConfig) -> Editor<RasterSurface> {
    let surface = RasterSurface::new(config.width, config.height, config.background);
    Editor::new(surface, storage, config)
}
