//! Direction-based sampling of the elevation field.
//!
//! External collaborators (mesh displacement, terrain-following movement,
//! water detection) query the field by unit direction vector rather than by
//! cell. A single equirectangular lookup distorts badly near the poles, so
//! samples are taken triplanar: three bilinear reads of the grid projected
//! along each principal axis, blended by the normalized absolute components
//! of the direction.

use glam::Vec3;

use super::ElevationField;

/// Water query result for a sample direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSample {
    /// Terrain height at the sample direction.
    pub height: f32,
    /// Reconstructed water surface height. The surface sits halfway down the
    /// carved channel bank: `height + water_mask * river_depth * 0.5`.
    pub water_height: f32,
    /// Water mask strength in [0, 1].
    pub water_mask: f32,
    /// Whether the sample counts as being in water (`water_mask > 0.05`).
    pub has_water: bool,
}

/// Mask strength above which a sample counts as "in water".
const WATER_PRESENCE_THRESHOLD: f32 = 0.05;

impl ElevationField {
    /// Terrain height along a direction vector.
    ///
    /// Returns 0.0 for a zero-length or non-finite direction.
    pub fn height_at(&self, direction: Vec3) -> f32 {
        self.triplanar(&self.elevation, direction)
    }

    /// Water mask strength along a direction vector.
    ///
    /// Returns 0.0 for a zero-length or non-finite direction.
    pub fn water_at(&self, direction: Vec3) -> f32 {
        self.triplanar(&self.water_mask, direction).clamp(0.0, 1.0)
    }

    /// Full water query along a direction vector: terrain height,
    /// reconstructed water-surface height, mask strength and presence.
    pub fn water_data_at(&self, direction: Vec3) -> WaterSample {
        let height = self.height_at(direction);
        let water_mask = self.water_at(direction);
        WaterSample {
            height,
            water_height: height + water_mask * self.river_depth() * 0.5,
            water_mask,
            has_water: water_mask > WATER_PRESENCE_THRESHOLD,
        }
    }

    /// Triplanar blend of three axis-projected bilinear samples.
    fn triplanar(&self, buffer: &[f32], direction: Vec3) -> f32 {
        let weights = direction.abs();
        let total = weights.x + weights.y + weights.z;
        if !total.is_finite() || total <= f32::EPSILON {
            return 0.0;
        }
        let weights = weights / total;

        // Project along each principal axis onto the remaining two components.
        let sample_x = self.bilinear(buffer, direction.z, direction.y);
        let sample_y = self.bilinear(buffer, direction.x, direction.z);
        let sample_z = self.bilinear(buffer, direction.x, direction.y);

        let value = sample_x * weights.x + sample_y * weights.y + sample_z * weights.z;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Bilinear sample of a grid buffer at planar coordinates in [-1, 1].
    ///
    /// The u axis maps onto the wrapping column axis over a full period; the
    /// v axis maps onto the clamped row axis with the endpoints at the poles.
    fn bilinear(&self, buffer: &[f32], u: f32, v: f32) -> f32 {
        let size = self.size();
        let fx = (u * 0.5 + 0.5) * size as f32;
        let fy = ((v * 0.5 + 0.5) * (size as f32 - 1.0)).clamp(0.0, size as f32 - 1.0);

        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;

        let x0 = x0 as i32;
        let y0 = y0 as i32;
        let c00 = buffer[self.index(x0, y0)];
        let c10 = buffer[self.index(x0 + 1, y0)];
        let c01 = buffer[self.index(x0, y0 + 1)];
        let c11 = buffer[self.index(x0 + 1, y0 + 1)];

        let top = c00 * (1.0 - tx) + c10 * tx;
        let bottom = c01 * (1.0 - tx) + c11 * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_field_samples_uniformly() {
        let mut field = ElevationField::new(16);
        field.elevation.fill(0.75);

        for dir in [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::NEG_Y,
            Vec3::new(0.3, -0.8, 0.5).normalize(),
        ] {
            let h = field.height_at(dir);
            assert!((h - 0.75).abs() < 1e-5, "height at {dir:?} was {h}");
        }
    }

    #[test]
    fn test_degenerate_direction_returns_zero() {
        let mut field = ElevationField::new(8);
        field.elevation.fill(1.0);

        assert_eq!(field.height_at(Vec3::ZERO), 0.0);
        assert_eq!(field.height_at(Vec3::new(f32::NAN, 0.0, 0.0)), 0.0);
        assert_eq!(field.water_at(Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_water_data_reconstruction() {
        let mut field = ElevationField::new(8);
        field.elevation.fill(0.4);
        field.water_mask.fill(0.5);
        field.set_river_depth(0.1);

        let sample = field.water_data_at(Vec3::X);
        assert!((sample.height - 0.4).abs() < 1e-5);
        assert!((sample.water_mask - 0.5).abs() < 1e-5);
        // Water surface sits halfway down the carved channel.
        assert!((sample.water_height - (0.4 + 0.5 * 0.1 * 0.5)).abs() < 1e-5);
        assert!(sample.has_water);
    }

    #[test]
    fn test_dry_field_has_no_water() {
        let field = ElevationField::new(8);
        let sample = field.water_data_at(Vec3::Y);
        assert_eq!(sample.water_mask, 0.0);
        assert!(!sample.has_water);
        assert_eq!(sample.water_height, sample.height);
    }
}
