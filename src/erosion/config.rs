//! Erosion configuration.

use serde::{Deserialize, Serialize};

/// Parameters for particle-based hydraulic erosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErosionConfig {
    /// Number of independent droplet traversals.
    pub iterations: u32,
    /// How strongly a droplet keeps its previous direction (0-1).
    /// 0 follows the gradient exactly, 1 never turns.
    pub inertia: f32,
    /// Downhill acceleration factor.
    pub gravity: f32,
    /// Fraction of water lost per step (0-1).
    pub evaporation: f32,
    /// Fraction of the capacity gap eroded per step (0-1).
    pub erosion_rate: f32,
    /// Fraction of excess sediment deposited per step (0-1).
    pub deposition_rate: f32,
    /// Random seed for droplet spawn positions.
    pub seed: u64,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            iterations: 50_000,
            inertia: 0.05,
            gravity: 4.0,
            evaporation: 0.02,
            erosion_rate: 0.3,
            deposition_rate: 0.3,
            seed: 42,
        }
    }
}

impl ErosionConfig {
    /// Creates a configuration with the given seed and default rates.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Light erosion pass for previews and tests.
    pub fn light(seed: u64) -> Self {
        Self {
            iterations: 5_000,
            seed,
            ..Default::default()
        }
    }
}
