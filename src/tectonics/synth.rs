//! Plate-partition elevation synthesis.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{CrustType, FaultType, Plate, TectonicConfig};
use crate::field::ElevationField;

/// Guards the edge ratio against division by zero when a cell sits exactly
/// on a plate center.
const EDGE_EPSILON: f32 = 1e-4;

/// Small boundary-proximity bump applied to oceanic plates.
const OCEAN_EDGE_BUMP: f32 = 0.05;

/// Fraction of the ridge term removed in trench mode.
const TRENCH_FACTOR: f32 = 0.7;

/// Fraction of the ridge term applied (signed) by transform faults.
const SHEAR_FACTOR: f32 = 0.15;

/// Writes every cell of the elevation field from a Voronoi-like plate
/// partition. The water mask is left untouched.
///
/// Every cell measures its cylindrically wrapped, size-bias-scaled distance
/// to all plate centers. The ratio of the nearest to the second-nearest
/// distance approaches 1 near plate boundaries and stays below 1 deep inside
/// a plate; that edge ratio drives both the base relief and the
/// fault-dependent ridge term. Results are clamped to [0, 1].
///
/// Degenerate inputs produce degenerate but valid output: zero plates leave
/// the field at 0, a single plate has no second-nearest distance and so an
/// edge ratio of 0 everywhere.
pub fn generate_tectonics(field: &mut ElevationField, config: &TectonicConfig) {
    let size = field.size();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let plates: Vec<Plate> = (0..config.plate_count)
        .map(|_| {
            Plate::spawn(
                &mut rng,
                size,
                config.plate_size_variance,
                config.continental_fraction,
                config.desymmetrize_tiling,
            )
        })
        .collect();

    if plates.is_empty() {
        for h in &mut field.elevation {
            *h = 0.0;
        }
        return;
    }

    for y in 0..size {
        for x in 0..size {
            let (nearest, edge) = classify_cell(&plates, x as f32, y as f32, size);
            let plate = &plates[nearest];

            let mut height = match plate.crust {
                CrustType::Continental => plate.uplift * config.plate_delta - edge * config.jitter,
                CrustType::Oceanic => config.ocean_floor + edge * OCEAN_EDGE_BUMP,
            };

            let ridge = edge.powi(5) * plate.uplift;
            height += fault_contribution(config.fault_type, plate, ridge);

            field.elevation[y * size + x] = height.clamp(0.0, 1.0);
        }
    }
}

/// Finds the owning plate of a cell and its boundary-proximity edge ratio.
///
/// Distance ties resolve to the earlier plate in iteration order, so the
/// partition is stable and independent of cell visit order.
fn classify_cell(plates: &[Plate], x: f32, y: f32, size: usize) -> (usize, f32) {
    let mut nearest = 0usize;
    let mut first = f32::INFINITY;
    let mut second = f32::INFINITY;

    for (idx, plate) in plates.iter().enumerate() {
        let dist = plate.scaled_distance(x, y, size);
        if dist < first {
            second = first;
            first = dist;
            nearest = idx;
        } else if dist < second {
            second = dist;
        }
    }

    // A single plate leaves `second` infinite and the ratio collapses to 0.
    let edge = if second.is_finite() {
        first / (second + EDGE_EPSILON)
    } else {
        0.0
    };
    (nearest, edge)
}

/// Signed ridge-term contribution for a fault mode.
fn fault_contribution(fault: FaultType, plate: &Plate, ridge: f32) -> f32 {
    match fault {
        FaultType::Ridge => ridge,
        FaultType::Trench => -TRENCH_FACTOR * ridge,
        FaultType::Shear => match plate.crust {
            CrustType::Continental => SHEAR_FACTOR * ridge,
            CrustType::Oceanic => -SHEAR_FACTOR * ridge,
        },
        FaultType::Mixed => fault_contribution(plate.mixed_fault(), plate, ridge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(plate_count: usize, seed: u64) -> TectonicConfig {
        TectonicConfig {
            plate_count,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_output_is_in_unit_range() {
        let mut field = ElevationField::new(64);
        generate_tectonics(&mut field, &config(12, 42));
        assert!(field
            .elevation
            .iter()
            .all(|&h| (0.0..=1.0).contains(&h) && h.is_finite()));
    }

    #[test]
    fn test_zero_plates_yields_flat_field() {
        let mut field = ElevationField::new(16);
        generate_tectonics(&mut field, &config(0, 42));
        assert!(field.elevation.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_single_continental_plate_fills_uniform() {
        // One plate: no second-nearest distance, edge ratio 0 everywhere, so
        // every cell lands at uplift * plate_delta (clamped to 1).
        let mut field = ElevationField::new(4);
        let cfg = TectonicConfig {
            plate_count: 1,
            jitter: 0.0,
            plate_delta: 1.0,
            continental_fraction: 1.0,
            plate_size_variance: 0.0,
            desymmetrize_tiling: false,
            fault_type: FaultType::Ridge,
            ..Default::default()
        };
        generate_tectonics(&mut field, &cfg);

        let expected = field.elevation[0];
        assert!(expected >= 0.5 && expected <= 1.0);
        assert!(field.elevation.iter().all(|&h| h == expected));
    }

    #[test]
    fn test_classify_single_plate_edge_is_zero() {
        let plates = vec![Plate {
            center_x: 0.0,
            center_y: 0.0,
            uplift: 1.0,
            crust: CrustType::Continental,
            size_bias: 1.0,
            skew: 0.0,
        }];
        for (x, y) in [(0.0, 0.0), (2.0, 3.0), (3.0, 1.0)] {
            let (idx, edge) = classify_cell(&plates, x, y, 4);
            assert_eq!(idx, 0);
            assert_eq!(edge, 0.0);
        }
    }

    #[test]
    fn test_edge_ratio_rises_toward_boundary() {
        let mk = |cx: f32| Plate {
            center_x: cx,
            center_y: 8.0,
            uplift: 1.0,
            crust: CrustType::Continental,
            size_bias: 1.0,
            skew: 0.0,
        };
        let plates = vec![mk(4.0), mk(12.0)];
        let (_, deep) = classify_cell(&plates, 4.0, 8.0, 16);
        let (_, near) = classify_cell(&plates, 7.0, 8.0, 16);
        assert!(near > deep);
        assert!(near < 1.0 + 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = ElevationField::new(48);
        let mut b = ElevationField::new(48);
        generate_tectonics(&mut a, &config(10, 777));
        generate_tectonics(&mut b, &config(10, 777));
        assert_eq!(a.elevation, b.elevation);
    }

    #[test]
    fn test_seed_changes_output() {
        let mut a = ElevationField::new(48);
        let mut b = ElevationField::new(48);
        generate_tectonics(&mut a, &config(10, 1));
        generate_tectonics(&mut b, &config(10, 2));
        assert_ne!(a.elevation, b.elevation);
    }

    #[test]
    fn test_trench_mode_not_above_ridge_mode() {
        // Same seed, same plates; the trench mode subtracts the ridge term
        // where the ridge mode adds it, so no cell can end up higher.
        let mut ridge = ElevationField::new(32);
        let mut trench = ElevationField::new(32);
        let mut cfg = config(8, 5);
        cfg.fault_type = FaultType::Ridge;
        generate_tectonics(&mut ridge, &cfg);
        cfg.fault_type = FaultType::Trench;
        generate_tectonics(&mut trench, &cfg);

        for (r, t) in ridge.elevation.iter().zip(trench.elevation.iter()) {
            assert!(t <= r);
        }
    }
}
