//! Tectonic plate data structures.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Type of crustal material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrustType {
    /// Continental crust: floats high, forms landmasses.
    Continental,
    /// Oceanic crust: sits low on a flat abyssal baseline.
    Oceanic,
}

/// How plate boundaries deform the crust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultType {
    /// Boundaries raise mountain belts.
    Ridge,
    /// Boundaries sink into subduction trenches.
    Trench,
    /// Transform faults: a small signed offset keyed to crust type.
    Shear,
    /// Each plate picks one of the other three modes deterministically
    /// from its own attributes.
    Mixed,
}

/// Lower bound on the plate size bias so no plate collapses to a point.
const MIN_SIZE_BIAS: f32 = 0.25;

/// A plate generator point in grid space. Plates exist only during
/// synthesis and are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plate {
    /// Center column of the plate (grid cells).
    pub center_x: f32,
    /// Center row of the plate (grid cells).
    pub center_y: f32,
    /// Uplift potential in [0.5, 1.0].
    pub uplift: f32,
    /// Crust type of this plate.
    pub crust: CrustType,
    /// Distance scale (>= 0.25). Values above 1 make the plate appear
    /// larger than average, values below 1 smaller.
    pub size_bias: f32,
    /// Longitudinal drift of the effective center across the row range
    /// (grid cells). Zero when desymmetrization is off.
    pub skew: f32,
}

impl Plate {
    /// Draws a plate at a random grid cell with random attributes.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        size: usize,
        size_variance: f32,
        continental_fraction: f32,
        desymmetrize: bool,
    ) -> Self {
        let center_x = rng.random_range(0..size) as f32;
        let center_y = rng.random_range(0..size) as f32;
        let uplift = 0.5 + 0.5 * rng.random::<f32>();

        let crust = if rng.random::<f32>() < continental_fraction {
            CrustType::Continental
        } else {
            CrustType::Oceanic
        };

        let size_bias = (1.0 + size_variance * (rng.random::<f32>() * 2.0 - 1.0)).max(MIN_SIZE_BIAS);

        let skew = if desymmetrize {
            size_variance * size as f32 * (rng.random::<f32>() * 2.0 - 1.0) * 0.25
        } else {
            0.0
        };

        Self {
            center_x,
            center_y,
            uplift,
            crust,
            size_bias,
            skew,
        }
    }

    /// Effective center column at a given row. The skew drifts the center
    /// linearly with latitude so Voronoi boundaries are not perfectly
    /// north-south when wrapping around the seam.
    #[inline]
    pub fn effective_center_x(&self, row: f32, size: usize) -> f32 {
        self.center_x + self.skew * (row / size as f32 - 0.5)
    }

    /// Scaled cylindrical distance from a cell to this plate's effective
    /// center. Horizontal distance wraps, vertical distance does not.
    pub fn scaled_distance(&self, x: f32, y: f32, size: usize) -> f32 {
        let ecx = self.effective_center_x(y, size);
        let mut dx = (x - ecx).abs() % size as f32;
        if dx > size as f32 * 0.5 {
            dx = size as f32 - dx;
        }
        let dy = y - self.center_y;
        (dx * dx + dy * dy).sqrt() / self.size_bias
    }

    /// Stable per-plate fault mode for `FaultType::Mixed`.
    ///
    /// Every cell assigned to the same plate must see the same choice, so
    /// the selection hashes the plate's own coordinates and uplift rather
    /// than anything cell-dependent.
    pub fn mixed_fault(&self) -> FaultType {
        match self.attribute_hash() % 3 {
            0 => FaultType::Ridge,
            1 => FaultType::Trench,
            _ => FaultType::Shear,
        }
    }

    /// Deterministic FNV-1a style hash over the plate's attributes.
    fn attribute_hash(&self) -> u32 {
        let mut hash: u32 = 0x811c_9dc5;
        for bits in [
            self.center_x.to_bits(),
            self.center_y.to_bits(),
            self.uplift.to_bits(),
        ] {
            for byte in bits.to_le_bytes() {
                hash ^= byte as u32;
                hash = hash.wrapping_mul(0x0100_0193);
            }
        }
        hash
    }
}
