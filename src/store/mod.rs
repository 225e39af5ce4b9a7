//! Snapshot stores holding the raw temperature readings.
//!
//! A store exposes one operation: read everything under a fixed path in a
//! single request. There is no pagination, streaming or subscription; each
//! poll asks for the full snapshot again.

mod file;
mod firebase;

pub use file::FileStore;
pub use firebase::{FirebaseStore, FirebaseStoreBuilder, DEFAULT_PATH};

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::data::RawSnapshot;
use crate::error::StoreError;

/// A remote (or local) store that returns full snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync + Debug {
    /// Read the full current snapshot.
    ///
    /// Returns `Ok(None)` when nothing is stored under the path.
    async fn get(&self) -> Result<Option<RawSnapshot>, StoreError>;

    /// Returns a human-readable description of the store, for the status bar.
    fn description(&self) -> &str;
}

/// Interpret a Realtime Database JSON body as a snapshot.
///
/// - `null` means the path is empty.
/// - An object maps timestamp keys to numbers.
/// - An array is how the database renders small, dense integer keys; each
///   non-null element is keyed by its index.
pub fn parse_snapshot(body: Value) -> Result<Option<RawSnapshot>, StoreError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| reading(&key, &value).map(|r| (key, r)))
            .collect::<Result<RawSnapshot, StoreError>>()
            .map(Some),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(index, value)| {
                let key = index.to_string();
                reading(&key, &value).map(|r| (key, r))
            })
            .collect::<Result<RawSnapshot, StoreError>>()
            .map(Some),
        other => Err(StoreError::Parse(format!(
            "Expected an object of readings, got {}",
            other
        ))),
    }
}

fn reading(key: &str, value: &Value) -> Result<f64, StoreError> {
    value
        .as_f64()
        .ok_or_else(|| StoreError::Parse(format!("Reading at {:?} is not a number: {}", key, value)))
}
