//! End-to-end session flows against mocked remote services.
//!
//! Covers the full scan/smooth/rank/export lifecycle and the state
//! invariants the session guarantees after every transition.

use reefguard_runtime::bounds::{BoundingBox, DEFAULT_VIEWPORT};
use reefguard_runtime::config::RuntimeConfig;
use reefguard_runtime::error::ReefError;
use reefguard_runtime::events::ReefEvent;
use reefguard_runtime::session::GridSession;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Deterministic health spread with values across all buckets.
fn spread(row: usize, col: usize) -> u8 {
    ((row * 13 + col * 7) % 101) as u8
}

fn wire_grid(n: usize, health: impl Fn(usize, usize) -> u8) -> serde_json::Value {
    let rows: Vec<Vec<serde_json::Value>> = (0..n)
        .map(|r| {
            (0..n)
                .map(|c| {
                    json!({
                        "coordinates": [r, c],
                        "health_score": health(r, c),
                        "species_count": (r + c) as u32,
                        "water_temp_c": 27.5,
                    })
                })
                .collect()
        })
        .collect();
    json!({ "grid": rows, "raw_point_count": 137 })
}

/// The full ascending-health ordering the ranking service would return.
fn wire_ranking(n: usize, health: impl Fn(usize, usize) -> u8) -> serde_json::Value {
    let mut cells: Vec<(usize, usize, u8)> = Vec::with_capacity(n * n);
    for r in 0..n {
        for c in 0..n {
            cells.push((r, c, health(r, c)));
        }
    }
    cells.sort_by_key(|&(_, _, h)| h);

    let ordered: Vec<serde_json::Value> = cells
        .into_iter()
        .map(|(r, c, h)| {
            json!({
                "coordinates": [r, c],
                "health_score": h,
                "species_count": (r + c) as u32,
                "water_temp_c": 27.5,
            })
        })
        .collect();
    json!({ "urgent_restoration_needed": ordered })
}

fn session_for(server: &MockServer) -> GridSession {
    let config = RuntimeConfig::default()
        .with_overrides(Some(&server.uri()), Some(2_000))
        .unwrap();
    GridSession::new(&config)
}

async fn mount_grid(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/ocean-matrix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_ranking(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/restoration-roadmap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[tokio::test]
async fn scan_installs_grid_with_fixed_span_bounds() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, |_, _| 50)).await;

    let mut session = session_for(&server);
    let summary = session.scan().await.unwrap();

    assert_eq!(summary.dimension, 10);
    assert_eq!(summary.raw_point_count, 137);

    let state = session.state();
    assert!(!state.grid().is_empty());
    assert_eq!(state.grid().cell_count(), 100);

    // Target box: fixed 0.30 span centered on the default viewport centroid.
    let bounds = state.active_bounds().unwrap();
    assert_close(bounds.max_lat - bounds.min_lat, 0.30);
    assert_close(bounds.max_lon - bounds.min_lon, 0.30);
    let (vlat, vlon) = DEFAULT_VIEWPORT.centroid();
    let (blat, blon) = bounds.centroid();
    assert_close(vlat, blat);
    assert_close(vlon, blon);

    // Fresh scan: nothing derived yet.
    assert!(state.smoothed().is_none());
    assert!(state.ranking().is_none());
    assert!(!state.scan_complete());
    assert!(!state.rank_complete());
    assert!(!state.request_in_flight());
}

#[tokio::test]
async fn uniform_grid_stats_scenario() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, |_, _| 50)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();

    let stats = session.stats().unwrap();
    assert_eq!(stats.avg, 50);
    assert_eq!(stats.distribution.moderate, 100);
    assert_eq!(stats.distribution.critical, 0);
    assert_eq!(stats.distribution.warning, 0);
    assert_eq!(stats.distribution.healthy, 0);
    assert_eq!(stats.distribution.pristine, 0);
}

#[tokio::test]
async fn sequential_scans_are_independent_fetches() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, |_, _| 50)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    session.scan().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn failed_scan_clears_grid_and_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ocean-matrix"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wire_grid(10, |_, _| 50)))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    assert!(!session.state().grid().is_empty());

    // Second scan hits no mock and gets a 404.
    let err = session.scan().await.unwrap_err();
    assert!(matches!(err, ReefError::NetworkUnreachable(_)));

    let state = session.state();
    assert!(state.grid().is_empty());
    assert!(state.active_bounds().is_none());
    assert!(!state.request_in_flight());
}

#[tokio::test]
async fn undecodable_scan_response_is_malformed() {
    let server = MockServer::start().await;
    mount_grid(&server, json!({ "unexpected": true })).await;

    let mut session = session_for(&server);
    let err = session.scan().await.unwrap_err();
    assert!(matches!(err, ReefError::MalformedResponse(_)));
    assert!(session.state().grid().is_empty());
    assert!(session.state().active_bounds().is_none());
}

#[tokio::test]
async fn scan_retries_through_transient_5xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ocean-matrix"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_grid(&server, wire_grid(10, |_, _| 50)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    assert_eq!(session.state().grid().cell_count(), 100);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn rank_stores_full_ordering_verbatim() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, spread)).await;
    mount_ranking(&server, wire_ranking(10, spread)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    session.rank().await.unwrap();

    let state = session.state();
    assert!(state.rank_complete());

    let ranking = state.ranking().unwrap();
    assert_eq!(ranking.len(), state.grid().cell_count());
    for pair in ranking.windows(2) {
        assert!(pair[0].health <= pair[1].health);
    }

    let csv = session.export_ranking().unwrap();
    assert!(csv.starts_with("Rank,Row,Col,Health Score\n"));
    assert_eq!(csv.lines().count(), 101);
    let first = csv.lines().nth(1).unwrap();
    assert!(first.starts_with("1,"));
}

#[tokio::test]
async fn rank_is_rejected_after_completion() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, spread)).await;
    mount_ranking(&server, wire_ranking(10, spread)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    session.rank().await.unwrap();

    let err = session.rank().await.unwrap_err();
    assert!(matches!(err, ReefError::PreconditionUnmet(_)));
    // The stored ranking is untouched.
    assert_eq!(session.state().ranking().unwrap().len(), 100);
}

#[tokio::test]
async fn rank_without_a_scan_is_rejected() {
    let server = MockServer::start().await;
    let mut session = session_for(&server);

    let err = session.rank().await.unwrap_err();
    assert!(matches!(err, ReefError::PreconditionUnmet(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn truncated_ranking_is_malformed() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, spread)).await;

    // A roadmap with only the ten worst sectors instead of the full ordering.
    let mut truncated = wire_ranking(10, spread);
    let list = truncated["urgent_restoration_needed"]
        .as_array_mut()
        .unwrap();
    list.truncate(10);
    mount_ranking(&server, truncated).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();

    let err = session.rank().await.unwrap_err();
    assert!(matches!(err, ReefError::MalformedResponse(_)));
    assert!(session.state().ranking().is_none());
    assert!(!session.state().rank_complete());
    // The active grid is unaffected by a rank failure.
    assert!(!session.state().grid().is_empty());
}

#[tokio::test]
async fn new_scan_invalidates_all_derived_state() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, spread)).await;
    mount_ranking(&server, wire_ranking(10, spread)).await;

    let mut session = session_for(&server);
    session.scan().await.unwrap();
    session.smooth().unwrap();
    session.rank().await.unwrap();

    let state = session.state();
    assert!(state.smoothed().is_some());
    assert!(state.ranking().is_some());
    assert!(state.scan_complete());
    assert!(state.rank_complete());

    session.scan().await.unwrap();

    let state = session.state();
    assert!(state.smoothed().is_none());
    assert!(state.ranking().is_none());
    assert!(!state.scan_complete());
    assert!(!state.rank_complete());
}

#[tokio::test]
async fn session_emits_scan_and_rank_notifications() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, spread)).await;
    mount_ranking(&server, wire_ranking(10, spread)).await;

    let mut session = session_for(&server);
    let mut rx = session.subscribe();

    session.scan().await.unwrap();
    match rx.try_recv().unwrap() {
        ReefEvent::ScanComplete {
            raw_point_count, ..
        } => {
            assert_eq!(raw_point_count, 137);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    session.rank().await.unwrap();
    match rx.try_recv().unwrap() {
        ReefEvent::RankComplete { sector_count } => assert_eq!(sector_count, 100),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_scan_emits_failure_notice() {
    let server = MockServer::start().await;
    let mut session = session_for(&server);
    let mut rx = session.subscribe();

    let _ = session.scan().await;

    match rx.try_recv().unwrap() {
        ReefEvent::ScanFailed { error } => {
            assert!(error.contains("unreachable"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn viewport_override_changes_scanned_area() {
    let server = MockServer::start().await;
    mount_grid(&server, wire_grid(10, |_, _| 50)).await;

    let mut session = session_for(&server);
    let viewport = BoundingBox::new(-18.4, -18.0, 147.0, 147.6).unwrap();
    session.update_viewport(viewport);
    session.scan().await.unwrap();

    let bounds = session.state().active_bounds().unwrap();
    let (vlat, vlon) = viewport.centroid();
    let (blat, blon) = bounds.centroid();
    assert_close(vlat, blat);
    assert_close(vlon, blon);
    assert_close(bounds.max_lat - bounds.min_lat, 0.30);
}
