//! Scan orchestration: viewport to fixed-span target to active grid.

use crate::bounds::BoundingBox;
use crate::error::{ReefError, ReefResult};
use crate::events::ReefEvent;
use crate::grid::types::HealthGrid;
use crate::remote::reef_api::ScanPayload;
use serde::Serialize;

use super::GridSession;

/// What a successful scan installed.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// The fixed-span box actually scanned (not the viewport).
    pub bounds: BoundingBox,
    /// Raw observation count behind the grid.
    pub raw_point_count: u64,
    /// Side length of the installed grid.
    pub dimension: usize,
}

impl GridSession {
    /// Scan the fixed-span area centered on the current viewport and make
    /// the result the active grid.
    ///
    /// On success the previous grid, smoothed overlay, ranking, and
    /// completion flags are all replaced or cleared in one transition. On
    /// failure the session holds no grid and no bounds, and stays usable for
    /// a retry. Sequential identical scans are independent authoritative
    /// fetches; nothing is cached.
    pub async fn scan(&mut self) -> ReefResult<ScanSummary> {
        if self.state.request_in_flight {
            return Err(ReefError::Busy);
        }

        let target = self.viewport.current().scan_target(self.span_deg);
        tracing::info!(
            "scanning {:.4}..{:.4} lat, {:.4}..{:.4} lon",
            target.min_lat,
            target.max_lat,
            target.min_lon,
            target.max_lon
        );

        self.state.request_in_flight = true;
        let result = self.api.fetch_grid(&target).await;
        self.state.request_in_flight = false;

        match result {
            Ok(ScanPayload {
                grid,
                raw_point_count,
            }) => {
                let dimension = grid.dimension();
                self.state.grid = grid;
                self.state.active_bounds = Some(target);
                self.state.smoothed = None;
                self.state.ranking = None;
                self.state.scan_complete = false;
                self.state.rank_complete = false;

                self.events.emit(ReefEvent::ScanComplete {
                    bounds: target,
                    raw_point_count,
                });
                Ok(ScanSummary {
                    bounds: target,
                    raw_point_count,
                    dimension,
                })
            }
            Err(e) => {
                self.state.grid = HealthGrid::empty();
                self.state.active_bounds = None;
                self.state.smoothed = None;
                self.state.ranking = None;
                self.state.scan_complete = false;
                self.state.rank_complete = false;

                tracing::warn!("scan failed: {e}");
                self.events.emit(ReefEvent::ScanFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
