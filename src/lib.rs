// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # nanotemp
//!
//! A terminal dashboard and library for temperature readings kept in a
//! Firebase Realtime Database.
//!
//! Readings are stored under one path as a flat map from Unix-epoch second
//! strings to numbers. This crate polls that map, turns it into an ordered
//! series of samples, charts it live, and exports any time range to CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐   ┌─────────┐   watch    ┌─────────┐           │
//! │  │  store  │──▶│ Poller  │──────────▶│ source  │           │
//! │  │(fetch)  │   │(normalize)           │ (poll)  │           │
//! │  └─────────┘   └─────────┘            └────┬────┘           │
//! │  Firebase | File                           ▼                │
//! │                 ┌──────────┐         ┌─────────┐            │
//! │                 │   data   │◀────────│   app   │──▶ ui      │
//! │                 │(range,csv)         │ (state) │            │
//! │                 └──────────┘         └─────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`store`]**: Snapshot stores ([`SnapshotStore`] trait) for the
//!   Realtime Database REST API and local JSON files
//! - **[`source`]**: The background [`Poller`] and the non-blocking
//!   [`DataSource`] the dashboard reads from
//! - **[`data`]**: Normalization into a [`Series`], range filtering,
//!   summaries and CSV export
//! - **[`app`]**: Dashboard state, chart cursor and range picker
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a database (credential from NANOTEMP_AUTH or nanotemp.toml)
//! nanotemp --url https://my-project.firebaseio.com
//!
//! # Replay a JSON export of the readings
//! nanotemp --file readings.json
//!
//! # Export a range without opening the dashboard
//! nanotemp --file readings.json --export --from 2024-01-01 --to "2024-01-02 12:00"
//! ```
//!
//! ### Normalizing a snapshot
//!
//! ```
//! use nanotemp::data::{normalize, RawSnapshot};
//!
//! let mut raw = RawSnapshot::new();
//! raw.insert("1700000060".to_string(), 21.0);
//! raw.insert("1700000000".to_string(), 20.5);
//!
//! let samples = normalize(Some(&raw)).unwrap();
//! assert_eq!(samples[0].value, 20.5);
//! assert_eq!(samples[0].display_text, "22:13:20 14/11/2023");
//! ```
//!
//! ### Polling a store in the background
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use nanotemp::{ChannelSource, DataSource, FileStore, Poller};
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(FileStore::new("readings.json"));
//! let (tx, mut source) = ChannelSource::create("readings.json");
//! let handle = Poller::new(store).interval(Duration::from_secs(1)).spawn(tx);
//!
//! tokio::time::sleep(Duration::from_secs(2)).await;
//! if let Some(series) = source.poll() {
//!     println!("{} samples", series.len());
//! }
//! handle.stop().await;
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod source;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{filter_range, normalize, ExportOutcome, Sample, Series, Summary, TimeRange};
pub use error::{ExportError, NormalizeError, StoreError};
pub use source::{ChannelSource, DataSource, PollOutcome, Poller, PollerHandle};
pub use store::{FileStore, FirebaseStore, SnapshotStore};
