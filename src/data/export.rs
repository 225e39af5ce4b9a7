//! CSV export of a selected time range.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::range::TimeRange;
use super::sample::Sample;
use crate::error::ExportError;

/// Column headers of the exported CSV.
pub const CSV_HEADER: [&str; 2] = ["FormattedTime", "Temperature"];

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written with this many data rows.
    Written { path: PathBuf, rows: usize },
    /// Nothing fell inside the range; no file was created.
    NoData,
}

/// Write samples as CSV: a header row, then `display_text,value` per sample.
///
/// Values always keep a fractional part (`21.0`, not `21`).
pub fn write_csv<W: io::Write>(writer: W, samples: &[Sample]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for sample in samples {
        let value = format!("{:?}", sample.value);
        wtr.write_record([sample.display_text.as_str(), value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name for an export of `range`: `temperature_data_<start>_<end>.csv`.
pub fn export_file_name(range: &TimeRange) -> String {
    format!(
        "temperature_data_{}_{}.csv",
        range.start_date(),
        range.end_date()
    )
}

/// Filter `samples` to `range` and write them into `dir`.
///
/// An empty selection is reported as [`ExportOutcome::NoData`] and leaves
/// the filesystem untouched.
pub fn export_range(
    dir: &Path,
    samples: &[Sample],
    range: &TimeRange,
) -> Result<ExportOutcome, ExportError> {
    let selected = range.select(samples);
    if selected.is_empty() {
        return Ok(ExportOutcome::NoData);
    }

    let path = dir.join(export_file_name(range));
    let file = File::create(&path)?;
    write_csv(file, selected)?;

    info!("Exported {} samples to {}", selected.len(), path.display());
    Ok(ExportOutcome::Written {
        path,
        rows: selected.len(),
    })
}
