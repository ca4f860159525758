use std::{sync::Arc, time::Duration};

use rstest::rstest;
use strand::{
    assets::{AssetCache, DiskAssetCache, MemAssetCache, StoreOptions},
    core::CacheKey,
    events::{DownloadProgress, Event, EventBus},
    fetch::{FetchError, FetchOptions},
    platform::time::Instant,
};
use strand_test_utils::{Blob, BlobServer, pattern_bytes};

use crate::common::{drain, fetcher, mem_fetcher};

fn progress(events: Vec<Event>) -> Vec<DownloadProgress> {
    events
        .into_iter()
        .filter_map(|e| match e {
            Event::Download(p) => Some(p),
            Event::Worker(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn second_fetch_is_served_from_cache_silently() {
    let data = pattern_bytes(64 * 1024, 1);
    let server = BlobServer::new([(
        "m.bin",
        Blob::new(data.clone()).chunked(8192, Duration::ZERO),
    )])
    .await;
    let bus = EventBus::new(1024);
    let mut rx = bus.subscribe();
    let fetcher = mem_fetcher(bus);

    let first = fetcher.fetch(&server.url("m.bin")).await.unwrap();
    assert!(!drain(&mut rx).is_empty());

    let second = fetcher.fetch(&server.url("m.bin")).await.unwrap();
    assert_eq!(first, data);
    assert_eq!(second, first);
    assert_eq!(server.hits("m.bin"), 1);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn disk_cache_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let data = pattern_bytes(10_000, 2);
    let server = BlobServer::new([("w.bin", Blob::new(data.clone()))]).await;
    let store = StoreOptions::new(dir.path());

    for _ in 0..2 {
        let cache: Arc<dyn AssetCache> = Arc::new(DiskAssetCache::open(&store).await.unwrap());
        let fetched = fetcher(cache, EventBus::default(), FetchOptions::default())
            .fetch(&server.url("w.bin"))
            .await
            .unwrap();
        assert_eq!(fetched, data);
    }
    assert_eq!(server.hits("w.bin"), 1);
}

#[tokio::test]
async fn fragment_does_not_change_the_cache_entry() {
    let server = BlobServer::new([("w.bin", Blob::new("weights"))]).await;
    let fetcher = mem_fetcher(EventBus::default());

    let mut with_fragment = server.url("w.bin");
    with_fragment.set_fragment(Some("section"));
    fetcher.fetch(&server.url("w.bin")).await.unwrap();
    fetcher.fetch(&with_fragment).await.unwrap();
    assert_eq!(server.hits("w.bin"), 1);
}

#[tokio::test]
async fn shards_join_in_input_order_not_arrival_order() {
    // shard 0 is the slowest, shard 2 the fastest
    let shards: Vec<_> = (0..3u64)
        .map(|i| {
            let delay = Duration::from_millis(30 * (3 - i));
            (
                format!("shard-{i}.bin"),
                Blob::new(pattern_bytes(4096 + usize::try_from(i).unwrap(), i + 10))
                    .chunked(1024, delay),
            )
        })
        .collect();
    let expected: Vec<u8> = shards
        .iter()
        .enumerate()
        .flat_map(|(i, _)| {
            let i = u64::try_from(i).unwrap();
            pattern_bytes(4096 + usize::try_from(i).unwrap(), i + 10).to_vec()
        })
        .collect();
    let server = BlobServer::new(shards).await;
    let urls: Vec<_> = (0..3).map(|i| server.url(&format!("shard-{i}.bin"))).collect();

    let assembled = mem_fetcher(EventBus::default())
        .assemble(&urls)
        .await
        .unwrap();
    assert_eq!(assembled.len(), 4096 * 3 + 3);
    assert_eq!(assembled.as_ref(), expected.as_slice());
}

#[tokio::test]
async fn progress_is_monotonic_and_ends_at_full_length() {
    let total = 512 * 1024;
    let server = BlobServer::new([(
        "big.bin",
        Blob::new(pattern_bytes(total, 3)).chunked(16 * 1024, Duration::from_millis(4)),
    )])
    .await;
    let bus = EventBus::new(4096);
    let mut rx = bus.subscribe();
    let fetcher = fetcher(
        Arc::new(MemAssetCache::new()),
        bus,
        FetchOptions::default().with_progress_interval(Duration::from_millis(20)),
    );

    let bytes = fetcher.fetch(&server.url("big.bin")).await.unwrap();
    assert_eq!(bytes.len(), total);

    let reports = progress(drain(&mut rx));
    assert!(reports.len() >= 2);
    for pair in reports.windows(2) {
        assert!(pair[0].received <= pair[1].received);
        assert!(pair[0].percent <= pair[1].percent);
    }
    for report in &reports {
        assert_eq!(report.total, Some(total as u64));
        assert!(report.received <= total as u64);
        assert!(report.message().contains("Download URL: "));
    }
}

#[tokio::test]
async fn progress_events_respect_the_interval() {
    let interval = Duration::from_millis(100);
    let server = BlobServer::new([(
        "slow.bin",
        Blob::new(pattern_bytes(64 * 1024, 4)).chunked(1024, Duration::from_millis(5)),
    )])
    .await;
    let bus = EventBus::new(4096);
    let mut rx = bus.subscribe();
    let fetcher = fetcher(
        Arc::new(MemAssetCache::new()),
        bus,
        FetchOptions::default().with_progress_interval(interval),
    );

    let started = Instant::now();
    fetcher.fetch(&server.url("slow.bin")).await.unwrap();
    let elapsed = started.elapsed();

    let reports = progress(drain(&mut rx));
    let max_reports = elapsed.as_millis() / interval.as_millis() + 1;
    assert!(!reports.is_empty());
    assert!(
        reports.len() as u128 <= max_reports,
        "{} reports in {elapsed:?}",
        reports.len()
    );
}

#[tokio::test]
async fn unknown_length_reports_without_percent() {
    let server = BlobServer::new([(
        "chunked.bin",
        Blob::new(pattern_bytes(8192, 5))
            .chunked(1024, Duration::ZERO)
            .without_content_length(),
    )])
    .await;
    let bus = EventBus::new(64);
    let mut rx = bus.subscribe();

    mem_fetcher(bus)
        .fetch(&server.url("chunked.bin"))
        .await
        .unwrap();

    let reports = progress(drain(&mut rx));
    let first = reports.first().unwrap();
    assert_eq!(first.total, None);
    assert_eq!(first.percent, None);
    assert!(first.message().contains("Estimated time remaining: unknown"));
}

#[rstest]
#[case::broken_body(
    Blob::new(pattern_bytes(8192, 6))
        .chunked(1024, Duration::from_millis(2))
        .fail_after(3)
)]
#[case::server_error(Blob::new("x").with_status(503))]
#[tokio::test]
async fn failed_download_is_not_cached(#[case] blob: Blob) {
    let server = BlobServer::new([("bad.bin", blob)]).await;
    let cache = Arc::new(MemAssetCache::new());
    let fetcher = fetcher(cache.clone(), EventBus::default(), FetchOptions::default());

    let err = fetcher.fetch(&server.url("bad.bin")).await.unwrap_err();
    assert!(matches!(err, FetchError::Net(_) | FetchError::Stream { .. }));
    assert!(!cache.contains(&CacheKey::from_url(&server.url("bad.bin"))));

    fetcher.fetch(&server.url("bad.bin")).await.unwrap_err();
    assert_eq!(server.hits("bad.bin"), 2);
}
