//! Data source abstraction for receiving normalized series.
//!
//! The dashboard never talks to the store directly. A [`Poller`] task
//! fetches and normalizes snapshots on a fixed interval and publishes one
//! [`PollOutcome`] per tick; the UI thread picks the latest outcome up
//! through a [`DataSource`] without blocking.

mod channel;
mod poller;

pub use channel::ChannelSource;
pub use poller::{fetch_series, Poller, PollerHandle};

use std::fmt::Debug;

use crate::data::Series;

/// Result of one poll tick.
#[derive(Debug, Clone, Default)]
pub enum PollOutcome {
    /// No tick has completed yet.
    #[default]
    Pending,
    /// The snapshot was read and normalized. May be empty ("no data").
    Ready(Series),
    /// The store was unavailable or the snapshot was malformed.
    Failed(String),
}

/// Trait for receiving series from various sources.
///
/// # Example
///
/// ```
/// use nanotemp::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("example");
/// if let Some(series) = source.poll() {
///     println!("Got {} samples", series.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest series.
    ///
    /// Returns `Some(series)` if a new series is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Series>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the last tick failed.
    fn error(&self) -> Option<&str>;
}
