//! Hydrology routing: depression filling, flow accumulation, water masking.
//!
//! Reads the current elevation (assumed rescaled into a [0, 1]-like domain
//! by the orchestrator), then:
//! 1. fills local depressions with a Priority-Flood pass from the grid edges
//! 2. assigns each cell a unique steepest-descent downstream neighbor
//! 3. accumulates upstream contributions in descending filled-height order
//! 4. writes the water mask from lake depth and normalized accumulation and
//!    carves river channels into the elevation buffer

mod config;
mod flood;
mod flow;
mod heap;

pub use config::HydrologyConfig;
pub use flood::priority_flood;
pub use flow::{flow_accumulation, flow_directions, FLOW_SINK};
pub use heap::MinHeap;

use crate::field::ElevationField;

/// Lake depth is amplified by this factor before clamping into the mask.
const LAKE_DEPTH_GAIN: f32 = 12.0;

/// Normalized accumulation above which a cell counts as a river channel.
const RIVER_MASK_THRESHOLD: f32 = 0.1;

/// Routes surface water over the field: fills the water mask completely and
/// lowers masked cells to carve channels.
///
/// A cell becomes a lake where the filled surface stands more than
/// `lake_threshold` above the original terrain, and a river channel where
/// its square-root-normalized flow accumulation exceeds a fixed threshold
/// above sea level. The two masks combine via max, and every masked cell is
/// lowered by exactly `mask * river_depth`. The carving depth is retained on
/// the field for later water-surface reconstruction.
pub fn apply_hydrology(field: &mut ElevationField, config: &HydrologyConfig) {
    let size = field.size();

    let filled = priority_flood(size, &field.elevation);
    let downstream = flow_directions(size, &filled);
    let accumulation = flow_accumulation(size, &filled, &downstream);

    let max_accum = accumulation.iter().copied().max().unwrap_or(1).max(1);
    let inv_sqrt_max = 1.0 / (max_accum as f32).sqrt();

    for i in 0..field.cell_count() {
        let lake_depth = filled[i] - field.elevation[i];
        let lake = if lake_depth > config.lake_threshold {
            (lake_depth * LAKE_DEPTH_GAIN).min(1.0)
        } else {
            0.0
        };

        let normalized = (accumulation[i] as f32).sqrt() * inv_sqrt_max;
        let river = if normalized > RIVER_MASK_THRESHOLD && filled[i] > config.sea_level {
            normalized
        } else {
            0.0
        };

        let mask = lake.max(river).clamp(0.0, 1.0);
        field.water_mask[i] = mask;
        field.elevation[i] -= mask * config.river_depth;
    }

    field.set_river_depth(config.river_depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bowl_center_becomes_lake() {
        // 3x3 bowl: every rim cell is a boundary seed, the center fills up
        // to the lowest rim and its fill depth exceeds the lake threshold.
        let mut field = ElevationField::new(3);
        field.elevation.fill(0.5);
        field.elevation[4] = 0.1;

        let config = HydrologyConfig {
            sea_level: 2.0, // above all terrain, so no river masking
            river_depth: 0.05,
            lake_threshold: 0.05,
        };
        apply_hydrology(&mut field, &config);

        assert!(field.water_mask[4] > 0.0, "bowl center should be a lake");
        for (i, &mask) in field.water_mask.iter().enumerate() {
            if i != 4 {
                assert_eq!(mask, 0.0, "rim cell {i} should stay dry");
            }
        }
    }

    #[test]
    fn test_masked_cells_are_carved_exactly() {
        let mut field = ElevationField::new(16);
        for y in 0..16 {
            for x in 0..16 {
                field.elevation[y * 16 + x] = 0.2 + 0.04 * (x + y) as f32;
            }
        }
        let before = field.elevation.clone();

        let config = HydrologyConfig::default();
        apply_hydrology(&mut field, &config);

        for i in 0..field.cell_count() {
            let expected = before[i] - field.water_mask[i] * config.river_depth;
            assert!(
                (field.elevation[i] - expected).abs() < 1e-6,
                "cell {i} not carved by exactly mask * river_depth"
            );
        }
    }

    #[test]
    fn test_mask_is_in_unit_range() {
        let mut field = ElevationField::new(24);
        for y in 0..24 {
            for x in 0..24 {
                field.elevation[y * 24 + x] =
                    0.5 + 0.3 * ((x as f32 * 0.7).sin() * (y as f32 * 0.45).cos());
            }
        }
        apply_hydrology(&mut field, &HydrologyConfig::default());
        assert!(field
            .water_mask
            .iter()
            .all(|&m| (0.0..=1.0).contains(&m) && m.is_finite()));
    }

    #[test]
    fn test_river_depth_is_retained() {
        let mut field = ElevationField::new(8);
        let config = HydrologyConfig {
            river_depth: 0.07,
            ..Default::default()
        };
        apply_hydrology(&mut field, &config);
        assert_eq!(field.river_depth(), 0.07);
    }

    #[test]
    fn test_determinism() {
        let make = || {
            let mut field = ElevationField::new(20);
            for (i, h) in field.elevation.iter_mut().enumerate() {
                *h = 0.3 + 0.2 * ((i as f32 * 0.13).sin());
            }
            apply_hydrology(&mut field, &HydrologyConfig::default());
            field
        };
        let a = make();
        let b = make();
        assert_eq!(a.elevation, b.elevation);
        assert_eq!(a.water_mask, b.water_mask);
    }
}
