//! Raster image to target-grid conversion.
//!
//! Loads any image format the `image` crate decodes, converts to
//! grayscale, resizes to the requested character dimensions, and
//! thresholds luminance. Dark pixels become foreground unless inverted.
//! The vertical aspect factor compensates for monospace cells being
//! roughly twice as tall as they are wide.

use std::path::Path;

use image::imageops::{self, FilterType};

use crate::error::{Result, WeaveError};

use super::ArtGrid;

/// Options for converting a raster image into a target grid.
#[derive(Debug, Clone)]
pub struct ImageGridOptions {
    /// Target width in columns; derived from the image when absent.
    pub width: Option<u32>,
    /// Target height in rows, before the vertical squeeze.
    pub height: Option<u32>,
    /// Vertical compression factor applied to the derived height.
    pub y_aspect: f32,
    /// Luminance cutoff; pixels below it count as dark.
    pub threshold: u8,
    /// Swap the foreground and background classification.
    pub invert: bool,
}

impl Default for ImageGridOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            y_aspect: 0.5,
            threshold: 128,
            invert: false,
        }
    }
}

/// Convert an image file into a binary target grid.
pub fn grid_from_image(path: &Path, opts: &ImageGridOptions) -> Result<ArtGrid> {
    let img = image::open(path).map_err(|e| WeaveError::Parse {
        message: format!("Failed to decode image {}: {}", path.display(), e),
        help: Some("Any format supported by the image crate works; PNG is a safe bet".to_string()),
    })?;
    let gray = img.to_luma8();

    let (src_w, src_h) = gray.dimensions();
    let (w, h) = target_size(src_w, src_h, opts);
    let resized = if (w, h) != (src_w, src_h) {
        imageops::resize(&gray, w.max(1), h.max(1), FilterType::Triangle)
    } else {
        gray
    };

    let (w, h) = resized.dimensions();
    let mut grid = ArtGrid::new(w as usize, h as usize);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let dark = pixel.0[0] < opts.threshold;
        grid.set(y as usize, x as usize, dark != opts.invert);
    }
    Ok(grid)
}

/// Compute the character-cell dimensions for a source image.
fn target_size(src_w: u32, src_h: u32, opts: &ImageGridOptions) -> (u32, u32) {
    let aspect = opts.y_aspect.max(f32::EPSILON);
    let round = |v: f32| (v.round() as u32).max(1);

    match (opts.width, opts.height) {
        (Some(w), Some(h)) => (w.max(1), round(h as f32 * aspect)),
        (Some(w), None) => {
            let ratio = w as f32 / src_w.max(1) as f32;
            (w.max(1), round(src_h as f32 * ratio * aspect))
        }
        (None, Some(h)) => {
            let w = h as f32 * (src_w.max(1) as f32 / src_h.max(1) as f32) / aspect;
            (round(w), round(h as f32 * aspect))
        }
        (None, None) => (src_w.max(1), round(src_h as f32 * aspect)),
    }
}
