//! Hydrology configuration.

use serde::{Deserialize, Serialize};

/// Parameters for hydrology routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrologyConfig {
    /// Height below which river channels are not masked (lakes still are).
    pub sea_level: f32,
    /// Depth carved below masked cells; also scales the reconstructed
    /// water surface.
    pub river_depth: f32,
    /// Minimum depression fill depth for a cell to count as a lake.
    pub lake_threshold: f32,
}

impl Default for HydrologyConfig {
    fn default() -> Self {
        Self {
            sea_level: 0.4,
            river_depth: 0.02,
            lake_threshold: 0.005,
        }
    }
}

impl HydrologyConfig {
    /// Creates a configuration with the given sea level and default carving.
    pub fn with_sea_level(sea_level: f32) -> Self {
        Self {
            sea_level,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HydrologyConfig::default();
        assert!(config.river_depth > 0.0);
        assert!(config.lake_threshold > 0.0);
    }

    #[test]
    fn test_with_sea_level() {
        let config = HydrologyConfig::with_sea_level(0.55);
        assert_eq!(config.sea_level, 0.55);
        assert_eq!(config.river_depth, HydrologyConfig::default().river_depth);
    }
}
