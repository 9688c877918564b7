//! Batch orchestrator tests with a scripted geocoder.
//!
//! Covers skipping of resolved rows, resumability across runs, statistics
//! accumulation and the periodic checkpoint cadence.

mod helpers;

use std::time::Duration;

use geobatch::{run_batch, BatchSettings, GeocodeStatus, RunStats};
use helpers::*;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_resolved_rows_are_never_queried() {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        &dir,
        &[
            ("ул. Ленина 1", "Москва", Some((55.75, 37.62))),
            ("пр. Мира 2", "Москва", None),
            ("ул. Баумана 3", "Казань", Some((55.79, 49.11))),
            ("ул. Гагарина 4", "Самара", None),
        ],
    );
    let store = store_for(&path);
    let mut table = store.load().unwrap();
    let geocoder = always_exact();

    let report = run_batch(
        &mut table,
        &geocoder,
        &store,
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(geocoder.addresses(), vec!["пр. Мира 2", "ул. Гагарина 4"]);
    assert_eq!(report.total, 4);
    assert_eq!(report.already_resolved, 2);
    assert_eq!(report.processed, 2);
    assert!(!report.interrupted);
    // Pre-resolved coordinates are untouched
    assert_eq!(table.records()[0].lat, Some(55.75));
    assert_eq!(table.records()[2].lon, Some(49.11));
}

#[tokio::test]
async fn test_second_run_issues_no_requests() {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        &dir,
        &[
            ("a1", "r", Some((1.0, 2.0))),
            ("a2", "r", None),
            ("a3", "r", None),
            ("a4", "r", None),
        ],
    );
    let store = store_for(&path);

    let first = always_exact();
    let mut table = store.load().unwrap();
    run_batch(&mut table, &first, &store, &fast_settings(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(first.call_count(), 3);

    let second = always_exact();
    let mut reloaded = store.load().unwrap();
    assert_eq!(reloaded.resolved_count(), 4);
    let report = run_batch(
        &mut reloaded,
        &second,
        &store,
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();
    assert_eq!(second.call_count(), 0);
    assert_eq!(report.processed, 0);
    assert_eq!(report.stats, RunStats::default());
}

#[tokio::test]
async fn test_unresolved_rows_are_retried_on_next_run() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, &[("a1", "r", None), ("a2", "r", None)]);
    let store = store_for(&path);

    let failing = ScriptedGeocoder::new(|_, _, _| unresolved(GeocodeStatus::Timeout));
    let mut table = store.load().unwrap();
    let report = run_batch(&mut table, &failing, &store, &fast_settings(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.stats.error, 2);

    let recovering = always_exact();
    let mut reloaded = store.load().unwrap();
    run_batch(&mut reloaded, &recovering, &store, &fast_settings(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(recovering.call_count(), 2);
    assert_eq!(store.load().unwrap().resolved_count(), 2);
}

#[tokio::test]
async fn test_statistics_accumulate_per_status() {
    let dir = TempDir::new().unwrap();
    let addresses: Vec<String> = (0..6).map(|i| format!("addr {i}")).collect();
    let rows: Vec<(&str, &str, Option<(f64, f64)>)> =
        addresses.iter().map(|a| (a.as_str(), "r", None)).collect();
    let path = write_table(&dir, &rows);
    let store = store_for(&path);
    let mut table = store.load().unwrap();

    let geocoder = ScriptedGeocoder::new(|call, _, _| match call {
        1 => exact(55.0, 37.0),
        2 => Step::Return(geobatch::GeocodeOutcome::located(
            geobatch::Coordinates::new(56.0, 38.0),
            &geobatch::PrecisionTier::Street,
        )),
        3 => unresolved(GeocodeStatus::NotFound),
        4 => unresolved(GeocodeStatus::NoCoords),
        5 => unresolved(GeocodeStatus::ParseError("expected value".into())),
        _ => unresolved(GeocodeStatus::RequestError("connection refused".into())),
    });

    let report = run_batch(&mut table, &geocoder, &store, &fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        report.stats,
        RunStats {
            ok: 2,
            not_found: 1,
            low_precision: 1,
            error: 3,
        }
    );
    // Low-precision coordinates are stored, failures leave the row empty
    let saved = store.load().unwrap();
    assert_eq!(saved.records()[1].lat, Some(56.0));
    assert_eq!(saved.records()[1].lon, Some(38.0));
    assert!(!saved.records()[2].is_resolved());
    assert_eq!(saved.resolved_count(), 2);
}

#[tokio::test]
async fn test_periodic_checkpoint_is_written_mid_run() {
    let dir = TempDir::new().unwrap();
    let addresses: Vec<String> = (0..5).map(|i| format!("addr {i}")).collect();
    let rows: Vec<(&str, &str, Option<(f64, f64)>)> =
        addresses.iter().map(|a| (a.as_str(), "r", None)).collect();
    let path = write_table(&dir, &rows);
    let store = store_for(&path);
    let mut table = store.load().unwrap();

    // Observe the file from inside the loop: before the 4th request the
    // checkpoint taken after the 2nd record must already be on disk.
    let observer = store_for(&path);
    let geocoder = ScriptedGeocoder::new(move |call, _, _| {
        if call == 4 {
            let on_disk = observer.load().unwrap();
            assert_eq!(on_disk.resolved_count(), 2);
        }
        exact(50.0, 30.0)
    });

    let settings = BatchSettings {
        checkpoint_every: 2,
        ..fast_settings()
    };
    run_batch(&mut table, &geocoder, &store, &settings, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(store.load().unwrap().resolved_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_delay_follows_every_record_including_failures() {
    let dir = TempDir::new().unwrap();
    let addresses: Vec<String> = (0..4).map(|i| format!("addr {i}")).collect();
    let rows: Vec<(&str, &str, Option<(f64, f64)>)> =
        addresses.iter().map(|a| (a.as_str(), "r", None)).collect();
    let path = write_table(&dir, &rows);
    let store = store_for(&path);
    let mut table = store.load().unwrap();

    let geocoder = ScriptedGeocoder::new(|_, _, _| unresolved(GeocodeStatus::Timeout));
    let delay = Duration::from_millis(250);
    let settings = BatchSettings {
        request_delay: delay,
        ..fast_settings()
    };

    let started = tokio::time::Instant::now();
    let report = run_batch(&mut table, &geocoder, &store, &settings, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.stats.error, 4);
    assert!(started.elapsed() >= delay * 4, "elapsed {:?}", started.elapsed());
}

#[tokio::test]
async fn test_empty_table_completes() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, &[]);
    let store = store_for(&path);
    let mut table = store.load().unwrap();
    let geocoder = always_exact();

    let report = run_batch(&mut table, &geocoder, &store, &fast_settings(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.total, 0);
    assert_eq!(geocoder.call_count(), 0);
}

#[tokio::test]
async fn test_final_save_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, &[("a1", "r", None)]);
    let mut table = store_for(&path).load().unwrap();

    let unwritable = geobatch::CheckpointStore::new(
        dir.path().join("missing").join("map_prices.csv"),
        geobatch::TableSchema::default(),
    );
    let geocoder = always_exact();
    let result = run_batch(
        &mut table,
        &geocoder,
        &unwritable,
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await;
    assert!(result.is_err());
    // The work itself still happened in memory
    assert_eq!(table.resolved_count(), 1);
}
