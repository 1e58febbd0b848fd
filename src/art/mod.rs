//! Art input handling: density classification and target-grid parsing.
//!
//! An art image arrives either as UTF-8 text (one character per cell) or as
//! a raster image. Both routes end in an [`ArtGrid`]: a binary grid where a
//! set cell wants a visible character and a clear cell wants a space.

mod config;
mod density;
mod grid;
mod raster;

pub use config::DensityOverrides;
pub use density::DensityMap;
pub use grid::{decode_utf8_skip, parse_art, ArtGrid};
pub use raster::{grid_from_image, ImageGridOptions};
