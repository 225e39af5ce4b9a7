//! Channel-based data source.
//!
//! Receives poll outcomes via a tokio watch channel. The poller is the
//! producer; only the most recent outcome is ever observed, so a slow UI
//! never renders a stale tick after a newer one.

use tokio::sync::watch;

use super::{DataSource, PollOutcome};
use crate::data::Series;

/// A data source that receives poll outcomes via a channel.
///
/// # Example
///
/// ```
/// use nanotemp::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("firebase: https://example.firebaseio.com");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<PollOutcome>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where the outcomes come from
    pub fn new(receiver: watch::Receiver<PollOutcome>, source_description: &str) -> Self {
        Self {
            receiver,
            description: source_description.to_string(),
            last_error: None,
        }
    }

    /// Create a channel pair for sending outcomes to a ChannelSource.
    ///
    /// Returns (sender, source); hand the sender to a [`Poller`](super::Poller).
    pub fn create(source_description: &str) -> (watch::Sender<PollOutcome>, Self) {
        let (tx, rx) = watch::channel(PollOutcome::Pending);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Series> {
        // A closed channel may still hold one unseen outcome
        let closed = self.receiver.has_changed().is_err();
        let outcome = {
            let current = self.receiver.borrow_and_update();
            current.has_changed().then(|| current.clone())
        };

        let Some(outcome) = outcome else {
            if closed && self.last_error.is_none() {
                self.last_error = Some("Poller stopped".to_string());
            }
            return None;
        };

        match outcome {
            PollOutcome::Ready(series) => {
                self.last_error = None;
                Some(series)
            }
            PollOutcome::Failed(message) => {
                self.last_error = Some(message);
                None
            }
            PollOutcome::Pending => None,
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
