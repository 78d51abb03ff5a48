//! Rank orchestration: server-authoritative restoration priority.

use crate::error::{ReefError, ReefResult};
use crate::events::ReefEvent;
use crate::grid::types::SectorCell;

use super::GridSession;

impl GridSession {
    /// Request the degradation ranking for the active grid's bounds and
    /// store the ordered result verbatim (this core does not re-sort).
    ///
    /// One-shot per scan: once a ranking is stored, a new scan is required
    /// before ranking again. Uses the active bounds, never the viewport, so
    /// the ranking reflects exactly the scanned area.
    pub async fn rank(&mut self) -> ReefResult<&[SectorCell]> {
        if self.state.request_in_flight {
            return Err(ReefError::Busy);
        }
        let Some(bounds) = self.state.active_bounds else {
            return Err(ReefError::PreconditionUnmet("no active grid to rank".into()));
        };
        if self.state.rank_complete {
            return Err(ReefError::PreconditionUnmet(
                "active grid is already ranked; scan again to re-rank".into(),
            ));
        }

        let expected = self.state.grid.cell_count();
        self.state.request_in_flight = true;
        let result = self.api.fetch_ranking(&bounds, expected).await;
        self.state.request_in_flight = false;

        match result {
            Ok(cells) => {
                self.state.rank_complete = true;
                tracing::info!("ranking stored: {} sectors", cells.len());
                self.events.emit(ReefEvent::RankComplete {
                    sector_count: cells.len(),
                });
                Ok(self.state.ranking.insert(cells).as_slice())
            }
            Err(e) => {
                tracing::warn!("rank failed: {e}");
                self.events.emit(ReefEvent::RankFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
