//! Wire-format types for the remote grid and ranking services.
//!
//! Field names follow the service contract exactly. `species_count` and
//! `water_temp_c` are enrichment fields that some deployments omit; unknown
//! fields the services add (internal ids, coverage percentages) are ignored.

use crate::grid::types::SectorCell;
use serde::{Deserialize, Serialize};

/// One cell as the services encode it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCell {
    /// `[row, col]`, 0-based.
    pub coordinates: [usize; 2],
    pub health_score: u8,
    #[serde(default)]
    pub species_count: Option<u32>,
    #[serde(default)]
    pub water_temp_c: Option<f32>,
}

impl WireCell {
    /// Convert into the domain cell type.
    pub fn into_sector(self) -> SectorCell {
        SectorCell {
            row: self.coordinates[0],
            col: self.coordinates[1],
            health: self.health_score,
            species_count: self.species_count,
            water_temp_c: self.water_temp_c,
        }
    }
}

/// Response body of the grid service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub grid: Vec<Vec<WireCell>>,
    pub raw_point_count: u64,
}

/// Response body of the ranking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub urgent_restoration_needed: Vec<WireCell>,
}
