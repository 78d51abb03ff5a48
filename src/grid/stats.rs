//! Summary statistics over the active health grid.

use crate::grid::types::{HealthGrid, SectorCell};
use serde::Serialize;

/// Counts of cells per health bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthDistribution {
    /// health <= 20
    pub critical: usize,
    /// 21..=40
    pub warning: usize,
    /// 41..=60
    pub moderate: usize,
    /// 61..=80
    pub healthy: usize,
    /// 81..=100
    pub pristine: usize,
}

impl HealthDistribution {
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.moderate + self.healthy + self.pristine
    }
}

/// Derived summary of a non-empty grid. Recomputed on demand, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct GridStats {
    /// Rounded mean health across all cells.
    pub avg: u8,
    /// Cell with the minimum health; row-major first occurrence wins ties.
    pub most_critical: SectorCell,
    pub distribution: HealthDistribution,
}

/// Compute stats, or `None` for the empty grid.
pub fn stats(grid: &HealthGrid) -> Option<GridStats> {
    let mut sum = 0u64;
    let mut count = 0u64;
    let mut most_critical: Option<&SectorCell> = None;
    let mut distribution = HealthDistribution::default();

    for cell in grid.cells() {
        sum += u64::from(cell.health);
        count += 1;
        match cell.health {
            0..=20 => distribution.critical += 1,
            21..=40 => distribution.warning += 1,
            41..=60 => distribution.moderate += 1,
            61..=80 => distribution.healthy += 1,
            _ => distribution.pristine += 1,
        }
        match most_critical {
            Some(best) if best.health <= cell.health => {}
            _ => most_critical = Some(cell),
        }
    }

    let most_critical = most_critical?.clone();
    let avg = ((2 * sum + count) / (2 * count)) as u8;
    Some(GridStats {
        avg,
        most_critical,
        distribution,
    })
}
