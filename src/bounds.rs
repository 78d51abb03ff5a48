//! Geographic bounding boxes and viewport tracking.

use crate::error::{ReefError, ReefResult};
use serde::{Deserialize, Serialize};

/// Default viewport over the Florida Keys reef tract, used until the map
/// widget reports a position.
pub const DEFAULT_VIEWPORT: BoundingBox = BoundingBox {
    min_lat: 24.65,
    max_lat: 24.95,
    min_lon: -80.95,
    max_lon: -80.65,
};

/// A geographic bounding box. Immutable once constructed; always replaced
/// wholesale, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Construct a box, enforcing finite values and `min < max` on both axes.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> ReefResult<Self> {
        if [min_lat, max_lat, min_lon, max_lon]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(ReefError::InvalidBounds(
                "coordinates must be finite".into(),
            ));
        }
        if min_lat >= max_lat || min_lon >= max_lon {
            return Err(ReefError::InvalidBounds(format!(
                "degenerate box: lat {min_lat}..{max_lat}, lon {min_lon}..{max_lon}"
            )));
        }
        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// Center point as `(lat, lon)`.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// The fixed-span box centered on this box's centroid. Scans always cover
    /// a constant area regardless of how far the map is zoomed out.
    pub fn scan_target(&self, span_deg: f64) -> BoundingBox {
        let (lat, lon) = self.centroid();
        let half = span_deg / 2.0;
        BoundingBox {
            min_lat: lat - half,
            max_lat: lat + half,
            min_lon: lon - half,
            max_lon: lon + half,
        }
    }
}

/// Last-known map viewport. Updated by the map widget on user interaction,
/// read to build scan requests. Malformed widget input is the widget's
/// responsibility, not this tracker's.
#[derive(Debug, Clone, Copy)]
pub struct BoundsTracker {
    current: BoundingBox,
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self {
            current: DEFAULT_VIEWPORT,
        }
    }

    /// Replace the tracked viewport unconditionally.
    pub fn update(&mut self, bbox: BoundingBox) {
        self.current = bbox;
    }

    /// The last tracked viewport, or [`DEFAULT_VIEWPORT`].
    pub fn current(&self) -> BoundingBox {
        self.current
    }
}

impl Default for BoundsTracker {
    fn default() -> Self {
        Self::new()
    }
}
