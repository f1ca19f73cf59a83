//! Flow directions and accumulation over a depression-filled grid.

/// Sentinel downstream index for cells with no lower neighbor.
pub const FLOW_SINK: u32 = u32::MAX;

/// For each cell, the index of its unique downstream neighbor, or
/// [`FLOW_SINK`] if no 8-neighbor sits strictly below it.
///
/// Steepest descent on the filled surface: the lowest neighbor wins, and a
/// neighbor only qualifies if its filled height is strictly below the
/// cell's own. The x axis wraps, the y axis is bounded.
pub fn flow_directions(size: usize, filled: &[f32]) -> Vec<u32> {
    let cells = size * size;
    assert_eq!(filled.len(), cells);

    let mut downstream = vec![FLOW_SINK; cells];

    for y in 0..size {
        for x in 0..size {
            let own = filled[y * size + x];
            let mut best_idx = FLOW_SINK;
            let mut best_height = own;

            for dy in -1i32..=1 {
                let ny = y as i32 + dy;
                if ny < 0 || ny >= size as i32 {
                    continue;
                }
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x as i32 + dx).rem_euclid(size as i32) as usize;
                    let n_idx = ny as usize * size + nx;
                    if filled[n_idx] < best_height {
                        best_height = filled[n_idx];
                        best_idx = n_idx as u32;
                    }
                }
            }

            downstream[y * size + x] = best_idx;
        }
    }

    downstream
}

/// Per-cell count of upstream cells draining through it, including itself.
///
/// Cells are processed in descending filled-height order, so every cell's
/// own count is final before it is added to its downstream target. This is
/// an upstream-to-downstream topological pass over the implicit flow graph:
/// a downstream target always has a strictly lower filled height than its
/// source, so it cannot have been processed earlier.
pub fn flow_accumulation(size: usize, filled: &[f32], downstream: &[u32]) -> Vec<u32> {
    let cells = size * size;
    assert_eq!(filled.len(), cells);
    assert_eq!(downstream.len(), cells);

    let mut order: Vec<u32> = (0..cells as u32).collect();
    order.sort_by(|&a, &b| {
        filled[b as usize]
            .partial_cmp(&filled[a as usize])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut accumulation = vec![1u32; cells];
    for &i in &order {
        let target = downstream[i as usize];
        if target != FLOW_SINK {
            accumulation[target as usize] =
                accumulation[target as usize].saturating_add(accumulation[i as usize]);
        }
    }

    accumulation
}
