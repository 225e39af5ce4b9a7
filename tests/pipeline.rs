//! End-to-end: file store → poller → channel source → range → CSV.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use nanotemp::data::export_range;
use nanotemp::source::fetch_series;
use nanotemp::{
    ChannelSource, DataSource, ExportOutcome, FileStore, PollOutcome, Poller, TimeRange,
};
use tempfile::TempDir;

const READINGS: &str = r#"{
    "1700000120": 22.25,
    "1700000000": 20.5,
    "1700000060": 21
}"#;

fn range(start: i64, end: i64) -> TimeRange {
    TimeRange::new(
        DateTime::from_timestamp(start, 0).unwrap(),
        DateTime::from_timestamp(end, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_file_to_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("readings.json");
    fs::write(&input, READINGS).unwrap();

    let store = FileStore::new(&input);
    let series = match fetch_series(&store).await {
        PollOutcome::Ready(series) => series,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(series.len(), 3);
    assert_eq!(series.latest().unwrap().value, 22.25);

    let outcome = export_range(dir.path(), series.samples(), &range(1_700_000_000, 1_700_000_060))
        .unwrap();
    let ExportOutcome::Written { path, rows } = outcome else {
        panic!("expected a written file");
    };
    assert_eq!(rows, 2);
    assert_eq!(
        path.file_name().unwrap(),
        "temperature_data_2023-11-14_2023-11-14.csv"
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "FormattedTime,Temperature\n22:13:20 14/11/2023,20.5\n22:14:20 14/11/2023,21.0\n"
    );

    let outcome = export_range(dir.path(), series.samples(), &range(0, 10)).unwrap();
    assert_eq!(outcome, ExportOutcome::NoData);
}

#[tokio::test]
async fn test_poller_feeds_channel_source() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("readings.json");
    fs::write(&input, "null").unwrap();

    let (tx, mut source) = ChannelSource::create("readings");
    let handle = Poller::new(Arc::new(FileStore::new(&input)))
        .interval(Duration::from_millis(10))
        .spawn(tx);

    // Empty path first, then readings appear on a later tick
    let first = wait_for_series(&mut source).await;
    assert!(first.is_empty());

    fs::write(&input, READINGS).unwrap();
    let mut latest = wait_for_series(&mut source).await;
    while latest.len() != 3 {
        latest = wait_for_series(&mut source).await;
    }
    assert!(source.error().is_none());

    // A broken file keeps the error visible without producing a series
    fs::write(&input, r#"{"later": 1}"#).unwrap();
    tokio::time::timeout(Duration::from_secs(2), async {
        while !source.error().is_some_and(|e| e.contains("later")) {
            source.poll();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    handle.stop().await;
}

async fn wait_for_series(source: &mut ChannelSource) -> nanotemp::Series {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if let Some(series) = source.poll() {
                return series;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap()
}
