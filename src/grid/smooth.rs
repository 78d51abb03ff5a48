//! 3x3 neighborhood smoothing over a health grid.
//!
//! Each output value is the rounded mean of the cell and its existing
//! neighbors: corner cells average 4 values, edge cells 6, interior cells 9.

use crate::grid::types::{HealthGrid, SmoothedGrid};

/// Compute the neighborhood-mean grid. Deterministic; the empty grid maps to
/// an empty result.
pub fn smooth(grid: &HealthGrid) -> SmoothedGrid {
    let n = grid.dimension();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            let mut sum = 0u32;
            let mut count = 0u32;
            for di in -1..=1i64 {
                for dj in -1..=1i64 {
                    let ni = i as i64 + di;
                    let nj = j as i64 + dj;
                    if ni >= 0 && ni < n as i64 && nj >= 0 && nj < n as i64 {
                        sum += u32::from(grid.health(ni as usize, nj as usize));
                        count += 1;
                    }
                }
            }
            // Integer round-half-up of sum/count.
            row.push(((2 * sum + count) / (2 * count)) as u8);
        }
        out.push(row);
    }

    SmoothedGrid::new(out)
}
