// Copyright 2026 ReefGuard Contributors
// SPDX-License-Identifier: Apache-2.0

//! ReefGuard event bus — session notifications for UI layers.
//!
//! The EventBus is a `tokio::sync::broadcast` channel that carries
//! [`ReefEvent`] values. Any consumer — a map UI, a log sink, the CLI — can
//! subscribe independently. When no subscribers exist, events are silently
//! dropped (zero overhead).

use crate::bounds::BoundingBox;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Every notification the session emits. Serialized to JSON for UI streaming.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReefEvent {
    /// A scan fetched and installed a new active grid.
    ScanComplete {
        bounds: BoundingBox,
        raw_point_count: u64,
    },
    /// A scan failed; the session holds no grid.
    ScanFailed { error: String },
    /// A ranking was stored for the active grid.
    RankComplete { sector_count: usize },
    /// A ranking request failed; no ranking is stored.
    RankFailed { error: String },
}

/// Short user-facing message with optional detail, for toast-style display.
#[derive(Clone, Debug, Serialize)]
pub struct Notice {
    pub message: String,
    pub detail: Option<String>,
}

impl ReefEvent {
    /// The toast copy for this event.
    pub fn notice(&self) -> Notice {
        match self {
            ReefEvent::ScanComplete {
                raw_point_count, ..
            } => Notice {
                message: "Ocean Area Scanned!".to_string(),
                detail: Some(format!(
                    "Found {raw_point_count} marine records in this sector."
                )),
            },
            ReefEvent::ScanFailed { error } => Notice {
                message: "Scan Failed".to_string(),
                detail: Some(error.clone()),
            },
            ReefEvent::RankComplete { sector_count } => Notice {
                message: "Restoration Roadmap Generated".to_string(),
                detail: Some(format!("{sector_count} priority sectors identified.")),
            },
            ReefEvent::RankFailed { error } => Notice {
                message: "Sorting Failed".to_string(),
                detail: Some(error.clone()),
            },
        }
    }
}

/// The session's notification bus.
///
/// Orchestrators emit events through this bus; consumers subscribe to
/// receive a stream of all of them.
pub struct EventBus {
    sender: broadcast::Sender<ReefEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all subscribers. Silently ignores if no subscribers.
    pub fn emit(&self, event: ReefEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ReefEvent> {
        self.sender.subscribe()
    }
}
