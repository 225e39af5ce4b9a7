//! Firebase Realtime Database store using the REST interface.
//!
//! Every read is `GET <database-url>/<path>.json`, which returns the whole
//! subtree under `path` as JSON (`null` when empty). The optional credential
//! is sent as the `auth` query parameter and never appears in descriptions
//! or logs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nanotemp::store::{FirebaseStore, SnapshotStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FirebaseStore::builder()
//!         .database_url("https://example-default-rtdb.firebaseio.com")
//!         .path("/TemperatureData")
//!         .build()?;
//!
//!     if let Some(snapshot) = store.get().await? {
//!         println!("{} readings", snapshot.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::{parse_snapshot, SnapshotStore};
use crate::data::RawSnapshot;
use crate::error::StoreError;

/// Default location of the readings inside the database.
pub const DEFAULT_PATH: &str = "/TemperatureData";

/// Store backed by a Firebase Realtime Database.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: Client,
    url: String,
    auth: Option<String>,
    description: String,
}

impl FirebaseStore {
    /// Create a new builder for configuring the store.
    pub fn builder() -> FirebaseStoreBuilder {
        FirebaseStoreBuilder::default()
    }

    /// The REST URL that is read on every poll.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotStore for FirebaseStore {
    async fn get(&self) -> Result<Option<RawSnapshot>, StoreError> {
        let mut request = self.client.get(&self.url);
        if let Some(ref auth) = self.auth {
            request = request.query(&[("auth", auth)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Auth(format!("Database rejected credential ({})", status)));
        }

        if !status.is_success() {
            return Err(StoreError::Http(format!("API returned status {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.without_url().to_string()))?;

        let snapshot = parse_snapshot(body)?;
        debug!(
            "Read {} entries from {}",
            snapshot.as_ref().map_or(0, |s| s.len()),
            self.description
        );
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`FirebaseStore`].
#[derive(Debug, Default)]
pub struct FirebaseStoreBuilder {
    database_url: Option<String>,
    path: Option<String>,
    auth: Option<String>,
    timeout: Option<Duration>,
}

impl FirebaseStoreBuilder {
    /// Set the database URL (e.g., "https://<project>-default-rtdb.firebaseio.com").
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the path of the readings (default: "/TemperatureData").
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the database secret or ID token sent with each request.
    pub fn auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<FirebaseStore, StoreError> {
        let Some(database_url) = self.database_url else {
            return Err(StoreError::Connection("No database URL configured".to_string()));
        };
        let path = self.path.unwrap_or_else(|| DEFAULT_PATH.to_string());
        let base = database_url.trim_end_matches('/');
        let path = path.trim_matches('/');

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(10)))
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(FirebaseStore {
            client,
            url: format!("{}/{}.json", base, path),
            auth: self.auth.filter(|a| !a.is_empty()),
            description: format!("firebase: {}/{}", base, path),
        })
    }
}
