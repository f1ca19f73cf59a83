//! ElevationField data structure.

use serde::{Deserialize, Serialize};

/// A square planetary elevation grid with a parallel water mask.
///
/// The grid is cylindrical along the x axis (column indices wrap modulo
/// `size`, i.e. longitude) and bounded along the y axis (row indices clamp
/// at 0 and `size - 1`, i.e. the poles). Elevation values are conventionally
/// normalized to roughly [0, 1] relative to sea level; the water mask holds
/// values in [0, 1] where 0 means dry.
///
/// The field is created once per generation run and mutated in place by each
/// pipeline stage; no stage reallocates the buffers. Callers are free to
/// rewrite the raw buffers between stages (normalization, smoothing), as long
/// as every value stays finite and roughly bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationField {
    size: usize,
    /// Height values in row-major order, length `size * size`.
    pub elevation: Vec<f32>,
    /// River/lake coverage strength in [0, 1], row-major, length `size * size`.
    pub water_mask: Vec<f32>,
    /// Channel carving depth used by the last hydrology pass. Retained so
    /// external collaborators can reconstruct the water surface.
    river_depth: f32,
}

impl ElevationField {
    /// Creates a zeroed field at the given resolution.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            elevation: vec![0.0; cells],
            water_mask: vec![0.0; cells],
            river_depth: 0.0,
        }
    }

    /// Grid resolution (width and height).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Channel depth carved by the last hydrology pass.
    pub fn river_depth(&self) -> f32 {
        self.river_depth
    }

    pub(crate) fn set_river_depth(&mut self, depth: f32) {
        self.river_depth = depth;
    }

    /// Wraps a column index onto the cylindrical x axis.
    #[inline]
    pub fn wrap_x(&self, x: i32) -> usize {
        x.rem_euclid(self.size as i32) as usize
    }

    /// Clamps a row index to the bounded y axis.
    #[inline]
    pub fn clamp_y(&self, y: i32) -> usize {
        y.clamp(0, self.size as i32 - 1) as usize
    }

    /// Row-major buffer index for a (possibly out-of-range) cell coordinate.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        self.clamp_y(y) * self.size + self.wrap_x(x)
    }

    /// Height at a cell, with x wrapping and y clamping.
    #[inline]
    pub fn height(&self, x: i32, y: i32) -> f32 {
        self.elevation[self.index(x, y)]
    }

    /// Sets the height at a cell, with x wrapping and y clamping.
    #[inline]
    pub fn set_height(&mut self, x: i32, y: i32, value: f32) {
        let idx = self.index(x, y);
        self.elevation[idx] = value;
    }

    /// Adds a delta to the height at a cell, with x wrapping and y clamping.
    #[inline]
    pub fn add_height(&mut self, x: i32, y: i32, delta: f32) {
        let idx = self.index(x, y);
        self.elevation[idx] += delta;
    }

    /// Water mask at a cell, with x wrapping and y clamping.
    #[inline]
    pub fn water(&self, x: i32, y: i32) -> f32 {
        self.water_mask[self.index(x, y)]
    }

    /// Returns (min, max) over the elevation buffer.
    pub fn height_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &h in &self.elevation {
            min = min.min(h);
            max = max.max(h);
        }
        (min, max)
    }

    /// Replaces non-finite elevation values with 0 and clamps the rest into
    /// `[-bound, bound]`. Runs after any stage that can destabilize the
    /// buffer numerically.
    pub fn sanitize_elevation(&mut self, bound: f32) {
        for h in &mut self.elevation {
            if !h.is_finite() {
                *h = 0.0;
            } else {
                *h = h.clamp(-bound, bound);
            }
        }
    }

    /// Replaces non-finite mask values with 0 and clamps the rest into [0, 1].
    pub fn sanitize_water_mask(&mut self) {
        for m in &mut self.water_mask {
            if !m.is_finite() {
                *m = 0.0;
            } else {
                *m = m.clamp(0.0, 1.0);
            }
        }
    }
}
