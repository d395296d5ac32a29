//! Integration tests for the poll worker lifecycle
//!
//! These tests validate the complete refresh workflow against a scripted
//! transport: Live-mode cadence, Filtered-mode suppression, clear
//! semantics, the empty-result short-circuit, and prediction failure
//! isolation.

mod common;

use common::{sample, ScriptedApi};
use feedwatch::backend::{BackendMessage, FeedBackend};
use feedwatch::config::AppConfig;
use feedwatch::error::FeedError;
use std::thread;
use std::time::Duration;

/// Config with a fast cadence so tests settle quickly.
fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.poll.interval_ms = 50;
    config
}

fn drain_all(handle: &feedwatch::FrontendHandle) -> Vec<BackendMessage> {
    handle.drain()
}

#[test]
fn test_backend_creation_and_shutdown() {
    let api = ScriptedApi::new(|_, _| Ok(Vec::new()));
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(50));

    handle.shutdown();
    assert!(worker.join().is_ok(), "Worker thread should exit cleanly");
}

#[test]
fn test_live_mode_fetches_on_load_and_on_cadence() {
    let api = ScriptedApi::new(|_, _| {
        Ok(vec![
            sample("2024-01-01 10:00:00", 150.0),
            sample("2024-01-01 09:00:00", 160.0),
        ])
    });
    let ranges = api.range_log();
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(300));
    handle.shutdown();
    worker.join().unwrap();

    let requested = ranges.lock().unwrap();
    assert!(
        requested.len() >= 3,
        "expected repeated live fetches, got {}",
        requested.len()
    );
    // Live ranges with no clear span the trailing window up to "now".
    for range in requested.iter() {
        let span = range.end - range.start;
        assert_eq!(span.num_seconds(), 300);
    }

    let messages = drain_all(&handle);
    let charts: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            BackendMessage::ChartUpdated(series) => Some(series),
            _ => None,
        })
        .collect();
    assert!(!charts.is_empty());
    for series in charts {
        assert_eq!(series.labels(), ["2024-01-01 09", "2024-01-01 10"]);
        assert_eq!(series.values(), [160.0, 150.0]);
    }
    assert!(messages
        .iter()
        .any(|m| matches!(m, BackendMessage::PredictionUpdated(_))));
}

#[test]
fn test_filtered_mode_suppresses_cadence() {
    let api = ScriptedApi::new(|_, _| Ok(vec![sample("2024-01-01 09:00:00", 160.0)]));
    let ranges = api.range_log();
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());

    // Pin a window straight away, before the first live tick can run.
    let pinned = feedwatch::TimeRange::new(
        chrono::DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
        chrono::DateTime::from_timestamp(1_704_153_599, 0).unwrap(),
    );
    handle.set_filter(pinned);
    thread::sleep(Duration::from_millis(400));

    let fetches_while_pinned = {
        let requested = ranges.lock().unwrap();
        requested.iter().filter(|r| **r == pinned).count()
    };
    assert_eq!(
        fetches_while_pinned, 1,
        "filtered mode must fetch only on the explicit action"
    );

    // An explicit refresh is still honored.
    handle.refresh();
    thread::sleep(Duration::from_millis(150));
    let after_refresh = {
        let requested = ranges.lock().unwrap();
        requested.iter().filter(|r| **r == pinned).count()
    };
    assert_eq!(after_refresh, 2);

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_clear_anchors_live_range_without_immediate_fetch() {
    let api = ScriptedApi::new(|_, _| Ok(vec![sample("2024-01-01 09:00:00", 160.0)]));
    let ranges = api.range_log();
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(120));

    let before_clear = chrono::Utc::now();
    handle.clear();

    thread::sleep(Duration::from_millis(400));
    handle.shutdown();
    worker.join().unwrap();

    // Pre-clear live ranges slide back a full window; post-clear ranges are
    // anchored at the clear instant, so the anchor cleanly separates them.
    let requested = ranges.lock().unwrap();
    let anchored: Vec<_> = requested
        .iter()
        .filter(|r| r.start >= before_clear - chrono::Duration::seconds(1))
        .collect();
    assert!(
        !anchored.is_empty(),
        "live cadence must resume after clear"
    );
    for range in &anchored {
        assert_eq!(range.start, anchored[0].start);
    }

    let messages = drain_all(&handle);
    assert!(messages
        .iter()
        .any(|m| matches!(m, BackendMessage::ChartCleared)));
}

#[test]
fn test_empty_result_skips_chart_and_prediction() {
    let api = ScriptedApi::new(|_, _| Ok(Vec::new()))
        .with_prediction(|_, _| panic!("prediction must not be fetched for an empty range"));
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(120));
    handle.shutdown();
    worker.join().unwrap();

    let messages = drain_all(&handle);
    assert!(!messages
        .iter()
        .any(|m| matches!(m, BackendMessage::ChartUpdated(_))));
    assert!(!messages
        .iter()
        .any(|m| matches!(m, BackendMessage::PredictionUpdated(_))));
    assert!(messages.iter().any(|m| matches!(
        m,
        BackendMessage::Notice {
            is_error: false,
            ..
        }
    )));
}

#[test]
fn test_prediction_failure_keeps_chart_and_notifies() {
    let api = ScriptedApi::new(|_, _| Ok(vec![sample("2024-01-01 09:00:00", 160.0)]))
        .with_prediction(|_, _| Err(FeedError::Parse("prediction body: truncated".into())));
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(120));
    handle.shutdown();
    worker.join().unwrap();

    let messages = drain_all(&handle);
    assert!(messages
        .iter()
        .any(|m| matches!(m, BackendMessage::ChartUpdated(_))));
    assert!(!messages
        .iter()
        .any(|m| matches!(m, BackendMessage::PredictionUpdated(_))));
    assert!(messages.iter().any(|m| matches!(
        m,
        BackendMessage::Notice { is_error: true, .. }
    )));
}

#[test]
fn test_fetch_failure_does_not_stop_the_loop() {
    // First fetch fails, later fetches succeed.
    let api = ScriptedApi::new(|call, _| {
        if call == 0 {
            Err(FeedError::Parse("weights body: not json".into()))
        } else {
            Ok(vec![sample("2024-01-01 09:00:00", 160.0)])
        }
    });
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    thread::sleep(Duration::from_millis(300));
    handle.shutdown();
    worker.join().unwrap();

    let messages = drain_all(&handle);
    assert!(messages.iter().any(|m| matches!(
        m,
        BackendMessage::Notice { is_error: true, .. }
    )));
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, BackendMessage::ChartUpdated(_))),
        "later cycles must succeed after a failed one"
    );
}

#[cfg(feature = "mock-feeder")]
#[test]
fn test_mock_feeder_swap_produces_data() {
    let api = ScriptedApi::new(|_, _| Ok(Vec::new()));
    let (backend, handle) = FeedBackend::with_api(fast_config(), Box::new(api));

    let worker = thread::spawn(move || backend.run());
    handle.use_mock_feeder(true);
    thread::sleep(Duration::from_millis(300));
    handle.shutdown();
    worker.join().unwrap();

    let messages = drain_all(&handle);
    assert!(messages
        .iter()
        .any(|m| matches!(m, BackendMessage::ChartUpdated(_))));
}
