//! Plain-text serializers for the grid and the ranked roadmap.
//!
//! Pure functions; writing the output anywhere is the caller's business.

use crate::grid::types::{HealthGrid, SectorCell};
use std::fmt::Write;

/// Render the grid as a fixed-width text table, or `None` when empty.
///
/// Health values are right-aligned to width 4 under a title banner.
pub fn grid_table(grid: &HealthGrid) -> Option<String> {
    if grid.is_empty() {
        return None;
    }

    let mut out = String::from("Reef Health Map\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");
    for row in grid.rows() {
        for cell in row {
            let _ = write!(out, "{:>4}", cell.health);
        }
        out.push('\n');
    }
    Some(out)
}

/// Render the ranked list as CSV with 1-based ranks, or `None` when empty.
pub fn ranking_csv(ranking: &[SectorCell]) -> Option<String> {
    if ranking.is_empty() {
        return None;
    }

    let mut out = String::from("Rank,Row,Col,Health Score\n");
    for (i, cell) in ranking.iter().enumerate() {
        let _ = writeln!(out, "{},{},{},{}", i + 1, cell.row, cell.col, cell.health);
    }
    Some(out)
}
