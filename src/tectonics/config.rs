//! Configuration for tectonic synthesis.

use serde::{Deserialize, Serialize};

use super::FaultType;

/// Configuration parameters for tectonic plate synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TectonicConfig {
    /// Number of tectonic plates (8-20 typical for Earth-like).
    pub plate_count: usize,
    /// Strength of boundary lowering on continental plates (0.0-1.0).
    pub jitter: f32,
    /// Flat baseline elevation of oceanic plates (0.0-1.0).
    pub ocean_floor: f32,
    /// Scale applied to continental uplift potential.
    pub plate_delta: f32,
    /// How plate boundaries deform the crust.
    pub fault_type: FaultType,
    /// Random variation of plate sizes (0.0 = all plates equal).
    pub plate_size_variance: f32,
    /// Skew plate centers longitudinally per row to break the north-south
    /// symmetry of Voronoi boundaries.
    pub desymmetrize_tiling: bool,
    /// Fraction of plates that carry continental crust (0.0-1.0).
    pub continental_fraction: f32,
    /// Random seed for reproducible generation.
    pub seed: u64,
}

impl Default for TectonicConfig {
    fn default() -> Self {
        Self {
            plate_count: 12,
            jitter: 0.3,
            ocean_floor: 0.1,
            plate_delta: 0.7,
            fault_type: FaultType::Mixed,
            plate_size_variance: 0.4,
            desymmetrize_tiling: true,
            continental_fraction: 0.45,
            seed: 42,
        }
    }
}

impl TectonicConfig {
    /// Creates a configuration suitable for Earth-like planets.
    pub fn earth_like(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Many small plates with strong boundary relief.
    pub fn archipelago(seed: u64) -> Self {
        Self {
            plate_count: 24,
            jitter: 0.45,
            continental_fraction: 0.3,
            plate_size_variance: 0.6,
            seed,
            ..Default::default()
        }
    }

    /// Few large plates with subdued boundaries.
    pub fn supercontinent(seed: u64) -> Self {
        Self {
            plate_count: 5,
            jitter: 0.15,
            continental_fraction: 0.6,
            plate_size_variance: 0.2,
            seed,
            ..Default::default()
        }
    }
}
