//! PNG export functionality for elevation and water-mask grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::field::ElevationField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Minimum height value for normalization.
    pub min_height: f32,
    /// Maximum height value for normalization.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: 0.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options with auto-detected height range from the field.
    pub fn auto_range(field: &ElevationField) -> Self {
        let (min, max) = field.height_range();
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Exports the elevation buffer as a 16-bit grayscale PNG.
///
/// Heights are normalized from `[options.min_height, options.max_height]`
/// into the full u16 range.
pub fn export_elevation_png(
    field: &ElevationField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;
    if min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let size = field.size() as u32;
    let range = max - min;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let height = field.elevation[(y * size + x) as usize];
            let normalized = ((height - min) / range).clamp(0.0, 1.0);
            img.put_pixel(x, y, Luma([(normalized * 65535.0) as u16]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert the u16 buffer to bytes for the encoder.
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, size, size, image::ExtendedColorType::L16)?;

    Ok(())
}

/// Exports the water mask as an 8-bit grayscale PNG.
///
/// Mask values are already in [0, 1] and map directly onto the u8 range.
pub fn export_water_mask_png(field: &ElevationField, path: &Path) -> Result<(), PngExportError> {
    let size = field.size() as u32;

    let mut img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let mask = field.water_mask[(y * size + x) as usize].clamp(0.0, 1.0);
            img.put_pixel(x, y, Luma([(mask * 255.0) as u8]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    encoder.write_image(img.as_raw(), size, size, image::ExtendedColorType::L8)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_is_rejected() {
        let field = ElevationField::new(4);
        let options = PngExportOptions {
            min_height: 1.0,
            max_height: 1.0,
            ..Default::default()
        };
        let result = export_elevation_png(&field, Path::new("/nonexistent/out.png"), &options);
        assert!(matches!(
            result,
            Err(PngExportError::InvalidHeightRange(_, _))
        ));
    }

    #[test]
    fn test_auto_range_tracks_field() {
        let mut field = ElevationField::new(4);
        field.elevation[0] = -0.5;
        field.elevation[15] = 2.0;
        let options = PngExportOptions::auto_range(&field);
        assert_eq!(options.min_height, -0.5);
        assert_eq!(options.max_height, 2.0);
    }

    #[test]
    fn test_export_roundtrip_to_tempdir() {
        let mut field = ElevationField::new(8);
        for (i, h) in field.elevation.iter_mut().enumerate() {
            *h = i as f32 / 63.0;
        }
        field.water_mask[10] = 0.5;

        let dir = std::env::temp_dir().join("planetgen_png_test");
        std::fs::create_dir_all(&dir).unwrap();

        let elev_path = dir.join("elev.png");
        let water_path = dir.join("water.png");
        export_elevation_png(&field, &elev_path, &PngExportOptions::default()).unwrap();
        export_water_mask_png(&field, &water_path).unwrap();

        assert!(elev_path.exists());
        assert!(water_path.exists());
    }
}
