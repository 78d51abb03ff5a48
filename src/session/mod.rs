//! Grid session manager — the one owner of scan/rank/smooth state.
//!
//! [`GridSession`] holds the whole [`SessionState`] value and is the only
//! thing that mutates it, through the operations defined here and in the
//! scan/rank submodules. Every operation resolves as a single atomic
//! transition: the state invariants hold before and after each call, never
//! observed mid-update. Derived data (smoothed grid, ranking) is invalidated
//! structurally — recomputed from scratch, never incrementally patched.
//!
//! Invariants:
//! - `active_bounds` is `None` iff the grid is empty.
//! - `rank_complete` implies bounds are present and the ranking corresponds
//!   to them.
//! - At most one network operation is in flight; `scan`/`rank` are rejected
//!   with [`ReefError::Busy`] while one is outstanding.

mod rank;
mod scan;

pub use scan::ScanSummary;

use crate::bounds::{BoundingBox, BoundsTracker};
use crate::config::RuntimeConfig;
use crate::error::{ReefError, ReefResult};
use crate::events::{EventBus, ReefEvent};
use crate::grid;
use crate::grid::stats::GridStats;
use crate::grid::types::{HealthGrid, SectorCell, SmoothedGrid};
use crate::remote::http_client::HttpClient;
use crate::remote::reef_api::ReefApiClient;
use tokio::sync::broadcast;

/// Everything a session owns. Created empty, destroyed with the session.
#[derive(Debug, Default)]
pub struct SessionState {
    grid: HealthGrid,
    active_bounds: Option<BoundingBox>,
    smoothed: Option<SmoothedGrid>,
    ranking: Option<Vec<SectorCell>>,
    scan_complete: bool,
    rank_complete: bool,
    request_in_flight: bool,
}

impl SessionState {
    /// The active grid. Empty until a scan succeeds.
    pub fn grid(&self) -> &HealthGrid {
        &self.grid
    }

    /// Bounds of the active grid, distinct from the map's viewport.
    pub fn active_bounds(&self) -> Option<BoundingBox> {
        self.active_bounds
    }

    pub fn smoothed(&self) -> Option<&SmoothedGrid> {
        self.smoothed.as_ref()
    }

    pub fn ranking(&self) -> Option<&[SectorCell]> {
        self.ranking.as_deref()
    }

    /// True once a smoothed overlay has been produced for the active grid.
    pub fn scan_complete(&self) -> bool {
        self.scan_complete
    }

    /// True once the active grid has been ranked.
    pub fn rank_complete(&self) -> bool {
        self.rank_complete
    }

    pub fn request_in_flight(&self) -> bool {
        self.request_in_flight
    }
}

/// The grid session manager.
pub struct GridSession {
    api: ReefApiClient,
    events: EventBus,
    viewport: BoundsTracker,
    span_deg: f64,
    state: SessionState,
}

impl GridSession {
    /// Create an empty session talking to the configured services.
    pub fn new(config: &RuntimeConfig) -> Self {
        let http = HttpClient::new(config.request_timeout_ms);
        Self {
            api: ReefApiClient::new(http, config.service_url.clone()),
            events: EventBus::new(32),
            viewport: BoundsTracker::new(),
            span_deg: config.scan_span_deg,
            state: SessionState::default(),
        }
    }

    /// Subscribe to session notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ReefEvent> {
        self.events.subscribe()
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Record the viewport reported by the map widget.
    pub fn update_viewport(&mut self, bbox: BoundingBox) {
        self.viewport.update(bbox);
    }

    /// The last reported viewport.
    pub fn viewport(&self) -> BoundingBox {
        self.viewport.current()
    }

    /// Produce the smoothed overlay for the active grid and mark smoothing
    /// complete. Rejected when no grid is active.
    pub fn smooth(&mut self) -> ReefResult<&SmoothedGrid> {
        if self.state.grid.is_empty() {
            return Err(ReefError::PreconditionUnmet(
                "no active grid to smooth".into(),
            ));
        }
        let smoothed = grid::smooth::smooth(&self.state.grid);
        self.state.scan_complete = true;
        Ok(self.state.smoothed.insert(smoothed))
    }

    /// Summary statistics of the active grid; `None` when no grid is active.
    pub fn stats(&self) -> Option<GridStats> {
        grid::stats::stats(&self.state.grid)
    }

    /// The active grid as a fixed-width text table; `None` when empty.
    pub fn export_grid(&self) -> Option<String> {
        grid::export::grid_table(&self.state.grid)
    }

    /// The stored ranking as CSV; `None` when no ranking is stored.
    pub fn export_ranking(&self) -> Option<String> {
        self.state
            .ranking
            .as_deref()
            .and_then(grid::export::ranking_csv)
    }
}
