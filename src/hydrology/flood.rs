//! Priority-Flood depression filling (Barnes et al. 2014).

use super::MinHeap;

/// Returns a depression-filled copy of the height grid.
///
/// All four grid edges are seeded into a min-priority queue as open
/// boundaries. The left and right columns are seeded too even though the x
/// axis wraps, matching the established drainage behavior of this pipeline.
/// Cells are then visited lowest-first; each unvisited 8-neighbor (x
/// wrapping, y bounded) is raised to at least the height of the cell it was
/// reached from, which makes the filled surface monotone non-decreasing
/// along every path from a boundary inward and leaves no local depressions.
pub fn priority_flood(size: usize, heights: &[f32]) -> Vec<f32> {
    let cells = size * size;
    assert_eq!(heights.len(), cells);
    if size == 0 {
        return Vec::new();
    }

    let mut filled = heights.to_vec();
    let mut visited = vec![false; cells];
    let mut heap = MinHeap::with_capacity(size * 4);

    let mut seed = |idx: usize, visited: &mut [bool], heap: &mut MinHeap| {
        if !visited[idx] {
            visited[idx] = true;
            heap.push(filled[idx], idx as u32);
        }
    };

    for x in 0..size {
        seed(x, &mut visited, &mut heap); // top row
        seed((size - 1) * size + x, &mut visited, &mut heap); // bottom row
    }
    for y in 0..size {
        seed(y * size, &mut visited, &mut heap); // left column
        seed(y * size + size - 1, &mut visited, &mut heap); // right column
    }

    while let Some((height, idx)) = heap.pop() {
        let x = (idx as usize) % size;
        let y = (idx as usize) / size;

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
                if visited[n_idx] {
                    continue;
                }
                visited[n_idx] = true;

                let new_height = filled[n_idx].max(height);
                filled[n_idx] = new_height;
                heap.push(new_height, n_idx as u32);
            }
        }
    }

    filled
}
