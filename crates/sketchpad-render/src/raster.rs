//! CPU raster surface.

use crate::codec::{decode_png, encode_png};
use crate::rasterize::{fill_capsule, fill_ring, fill_square, half_width};
use image::{Rgba, RgbaImage, imageops};
use kurbo::{Line, Point};
use sketchpad_core::{Color, Shape, Snapshot, Stroke, Surface, SurfaceResult};

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}

/// An RGBA8 canvas that snapshots itself as PNG.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, to_rgba(background)),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Color of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Color::from(p.0))
    }

    /// Number of pixels that differ from `color`.
    pub fn count_not(&self, color: Color) -> usize {
        let rgba = to_rgba(color);
        self.pixels.pixels().filter(|p| **p != rgba).count()
    }

    /// Export the current contents as PNG.
    pub fn to_png(&self) -> SurfaceResult<Vec<u8>> {
        encode_png(&self.pixels)
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn clear(&mut self, background: Color) {
        let rgba = to_rgba(background);
        self.pixels.pixels_mut().for_each(|p| *p = rgba);
    }

    fn stroke_segment(&mut self, from: Point, to: Point, stroke: &Stroke) {
        fill_capsule(
            &mut self.pixels,
            Line::new(from, to),
            half_width(stroke.width),
            to_rgba(stroke.color),
        );
    }

    fn stroke_shape(&mut self, shape: &Shape, stroke: &Stroke) {
        let hw = half_width(stroke.width);
        let color = to_rgba(stroke.color);
        match shape {
            Shape::Circle(circle) => fill_ring(&mut self.pixels, *circle, hw, color),
            Shape::Line(line) => fill_capsule(&mut self.pixels, *line, hw, color),
            Shape::Rectangle(_) => {
                for side in shape.outline_segments() {
                    fill_capsule(&mut self.pixels, side, hw, color);
                    fill_square(&mut self.pixels, side.p0, hw, color);
                }
            }
        }
    }

    fn encode(&self) -> SurfaceResult<Snapshot> {
        Ok(Snapshot::from(encode_png(&self.pixels)?))
    }

    fn restore(&mut self, snapshot: &Snapshot, background: Color) -> SurfaceResult<()> {
        let decoded = decode_png(snapshot.as_bytes())?;
        if decoded.dimensions() == self.pixels.dimensions() {
            self.pixels = decoded;
        } else {
            log::debug!(
                "Restoring {}x{} snapshot onto {}x{} surface",
                decoded.width(),
                decoded.height(),
                self.pixels.width(),
                self.pixels.height()
            );
            self.clear(background);
            imageops::replace(&mut self.pixels, &decoded, 0, 0);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.pixels.dimensions() != (width, height) {
            self.pixels = RgbaImage::new(width, height);
        }
    }
}
