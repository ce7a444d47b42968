//! PNG encoding and decoding of raster snapshots.

use image::RgbaImage;
use sketchpad_core::{SurfaceError, SurfaceResult};

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> SurfaceResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| SurfaceError::Encode(format!("PNG header: {e}")))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| SurfaceError::Encode(format!("PNG data: {e}")))?;
        writer
            .finish()
            .map_err(|e| SurfaceError::Encode(format!("PNG trailer: {e}")))?;
    }
    Ok(png_data)
}

/// Decode image bytes (PNG) into RGBA pixels.
pub fn decode_png(bytes: &[u8]) -> SurfaceResult<RgbaImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| SurfaceError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}
