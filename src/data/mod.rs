//! Data models and processing for temperature snapshots.
//!
//! This module turns raw store snapshots into ordered, typed samples and
//! derives everything the dashboard shows from them.
//!
//! ## Submodules
//!
//! - [`sample`]: Record normalization ([`normalize`], [`Sample`], [`Series`])
//! - [`range`]: Closed time-range selection ([`filter_range`], [`TimeRange`])
//! - [`summary`]: Latest, minimum and maximum readings ([`Summary`])
//! - [`export`]: CSV export of a selected range
//!
//! ## Data Flow
//!
//! ```text
//! RawSnapshot (key -> value, any order)
//!        │
//!        ▼
//! normalize()  ──▶ MalformedKey (whole batch rejected)
//!        │
//!        ▼
//! Series (samples sorted by instant)
//!        │
//!        ├──▶ Summary::of()        (header and summary panel)
//!        │
//!        └──▶ filter_range()       (range picker)
//!                    │
//!                    ▼
//!              export_range()      (CSV file)
//! ```

pub mod export;
pub mod range;
pub mod sample;
pub mod summary;

pub use export::{export_file_name, export_range, write_csv, ExportOutcome};
pub use range::{filter_range, parse_utc_datetime, TimeRange};
pub use sample::{normalize, RawSnapshot, Sample, Series, DISPLAY_FORMAT};
pub use summary::Summary;
