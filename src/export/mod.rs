//! Export module for saving generated fields to image files.
//!
//! Supports 16-bit grayscale PNG for the elevation buffer and 8-bit
//! grayscale PNG for the water mask.

mod png;

pub use png::{export_elevation_png, export_water_mask_png, PngExportError, PngExportOptions};
