//! Core grid types: sector cells and the owned health grid.

use serde::{Deserialize, Serialize};

/// Grid dimension of the current deployment (10x10 sectors per scan).
pub const GRID_DIMENSION: usize = 10;

/// One grid position with a health score and optional survey metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCell {
    pub row: usize,
    pub col: usize,
    /// Health score, 0-100.
    pub health: u8,
    pub species_count: Option<u32>,
    pub water_temp_c: Option<f32>,
}

/// Square matrix of sector cells addressed `[row][col]`; row 0 is the
/// southernmost map row. Replaced wholesale on a new scan, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthGrid {
    rows: Vec<Vec<SectorCell>>,
}

impl HealthGrid {
    /// The empty grid (no scan yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a grid from pre-validated square rows.
    pub fn from_rows(rows: Vec<Vec<SectorCell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from bare health values, synthesizing cell coordinates.
    pub fn from_health_values(values: &[Vec<u8>]) -> Self {
        let rows = values
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, &h)| SectorCell {
                        row: r,
                        col: c,
                        health: h,
                        species_count: None,
                        water_temp_c: None,
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Side length. Zero for the empty grid.
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Health value at `[row][col]`. Panics when out of range, like slice
    /// indexing.
    pub fn health(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col].health
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&SectorCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &SectorCell> {
        self.rows.iter().flatten()
    }

    pub fn rows(&self) -> &[Vec<SectorCell>] {
        &self.rows
    }
}

/// Derived neighborhood-mean grid. Same shape as its source grid; stale the
/// instant the source is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedGrid {
    values: Vec<Vec<u8>>,
}

impl SmoothedGrid {
    pub fn new(values: Vec<Vec<u8>>) -> Self {
        Self { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Smoothed value at `[row][col]`. Panics when out of range.
    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.values[row][col]
    }

    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }
}
