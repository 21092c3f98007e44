//! Rendering helpers: colorize 2-D fields and draw colorbar strips.

use image::{ImageBuffer, RgbaImage};
use ndarray::ArrayView2;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::colormaps::{Colormap, Norm, TRANSPARENT};
use crate::error::{EarthCmapError, Result};

/// Render a 2-D field, one pixel per cell, row 0 at the top.
///
/// Non-finite cells are transparent.
pub fn colorize(data: ArrayView2<f32>, colormap: &dyn Colormap, norm: &Norm) -> RgbaImage {
    let (rows, cols) = data.dim();
    let mut img = ImageBuffer::new(cols as u32, rows as u32);

    for ((y, x), &value) in data.indexed_iter() {
        let color = if value.is_finite() {
            colormap.map(value as f64, norm)
        } else {
            TRANSPARENT
        };
        img.put_pixel(x as u32, y as u32, image::Rgba(color));
    }

    debug!(
        colormap = colormap.name(),
        width = cols,
        height = rows,
        "Field colorized"
    );
    img
}

/// Horizontal strip showing every lookup table entry from left to right
pub fn colorbar_strip(colormap: &dyn Colormap, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(EarthCmapError::InvalidParameter {
            param: "size".to_string(),
            message: format!("Colorbar size must be positive, got {}x{}", width, height),
        });
    }

    let mut img = ImageBuffer::new(width, height);
    for x in 0..width {
        let position = (x as f32 + 0.5) / width as f32;
        let color = colormap.map_normalized(position);
        for y in 0..height {
            img.put_pixel(x, y, image::Rgba(color));
        }
    }
    Ok(img)
}

/// Encode an image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| EarthCmapError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer.into_inner())
}

/// Write an image as PNG
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(img)?;
    std::fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        "Image written"
    );
    Ok(())
}
