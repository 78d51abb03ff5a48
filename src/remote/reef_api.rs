//! Typed client for the ocean grid and ranking services.
//!
//! Decoding and structural validation happen here, at the edge; everything
//! past this module works with domain types only.

use crate::bounds::BoundingBox;
use crate::error::{ReefError, ReefResult};
use crate::grid::types::{HealthGrid, SectorCell};
use crate::remote::http_client::HttpClient;
use crate::remote::wire::{RankResponse, ScanResponse, WireCell};
use url::Url;

const OCEAN_MATRIX_PATH: &str = "/ocean-matrix";
const RESTORATION_ROADMAP_PATH: &str = "/restoration-roadmap";

/// A successfully fetched grid plus the raw observation count behind it.
#[derive(Debug, Clone)]
pub struct ScanPayload {
    pub grid: HealthGrid,
    pub raw_point_count: u64,
}

/// Client for the two remote reef services.
#[derive(Clone)]
pub struct ReefApiClient {
    http: HttpClient,
    base: Url,
}

impl ReefApiClient {
    pub fn new(http: HttpClient, base: Url) -> Self {
        Self { http, base }
    }

    fn endpoint(&self, path: &str, bounds: &BoundingBox) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.query_pairs_mut()
            .append_pair("min_lat", &bounds.min_lat.to_string())
            .append_pair("max_lat", &bounds.max_lat.to_string())
            .append_pair("min_lon", &bounds.min_lon.to_string())
            .append_pair("max_lon", &bounds.max_lon.to_string());
        url
    }

    /// Fetch the health grid for the given bounds.
    pub async fn fetch_grid(&self, bounds: &BoundingBox) -> ReefResult<ScanPayload> {
        let url = self.endpoint(OCEAN_MATRIX_PATH, bounds);
        tracing::debug!("fetching grid: {url}");
        let resp: ScanResponse = self.http.get_json(url).await?;
        let grid = grid_from_wire(resp.grid)?;
        Ok(ScanPayload {
            grid,
            raw_point_count: resp.raw_point_count,
        })
    }

    /// Fetch the degradation ranking for the given bounds.
    ///
    /// The returned order is trusted verbatim; only the length and the score
    /// range are checked against the active grid.
    pub async fn fetch_ranking(
        &self,
        bounds: &BoundingBox,
        expected_len: usize,
    ) -> ReefResult<Vec<SectorCell>> {
        let url = self.endpoint(RESTORATION_ROADMAP_PATH, bounds);
        tracing::debug!("fetching ranking: {url}");
        let resp: RankResponse = self.http.get_json(url).await?;

        let cells = resp.urgent_restoration_needed;
        if cells.len() != expected_len {
            return Err(ReefError::MalformedResponse(format!(
                "ranking has {} cells, expected {expected_len}",
                cells.len()
            )));
        }
        for cell in &cells {
            check_health_range(cell)?;
        }
        Ok(cells.into_iter().map(WireCell::into_sector).collect())
    }
}

fn check_health_range(cell: &WireCell) -> ReefResult<()> {
    if cell.health_score > 100 {
        return Err(ReefError::MalformedResponse(format!(
            "health score {} out of range at [{}, {}]",
            cell.health_score, cell.coordinates[0], cell.coordinates[1]
        )));
    }
    Ok(())
}

/// Validate the wire grid shape and convert it into a [`HealthGrid`].
fn grid_from_wire(rows: Vec<Vec<WireCell>>) -> ReefResult<HealthGrid> {
    let n = rows.len();
    if n == 0 {
        return Err(ReefError::MalformedResponse("empty grid".into()));
    }
    for row in &rows {
        if row.len() != n {
            return Err(ReefError::MalformedResponse(format!(
                "grid is not square: {n} rows but a row of {} cells",
                row.len()
            )));
        }
        for cell in row {
            check_health_range(cell)?;
        }
    }

    let cells = rows
        .into_iter()
        .map(|row| row.into_iter().map(WireCell::into_sector).collect())
        .collect();
    Ok(HealthGrid::from_rows(cells))
}
