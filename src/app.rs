//! Application state and interaction logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};

use crate::data::{export_range, ExportOutcome, Sample, Series, TimeRange};
use crate::source::DataSource;
use crate::ui::Theme;

/// Shown wherever a selection or series has nothing in it.
pub const NO_DATA: &str = "No data available";

/// Shown when the selected export range matches no samples.
pub const NO_DATA_IN_RANGE: &str = "No data available for the selected time range.";

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Which part of the range picker has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeField {
    #[default]
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

impl RangeField {
    /// Cycle to the next field.
    pub fn next(self) -> Self {
        match self {
            RangeField::StartDate => RangeField::StartTime,
            RangeField::StartTime => RangeField::EndDate,
            RangeField::EndDate => RangeField::EndTime,
            RangeField::EndTime => RangeField::StartDate,
        }
    }

    /// Cycle to the previous field.
    pub fn prev(self) -> Self {
        match self {
            RangeField::StartDate => RangeField::EndTime,
            RangeField::StartTime => RangeField::StartDate,
            RangeField::EndDate => RangeField::StartTime,
            RangeField::EndTime => RangeField::EndDate,
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, RangeField::StartDate | RangeField::EndDate)
    }
}

/// Start/end date and time-of-day pickers for the export range.
///
/// Dates step by day, times by minute; times wrap around midnight without
/// changing the date, like a clock face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePicker {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub focus: RangeField,
}

impl RangePicker {
    /// All four fields set to `now` (whole seconds).
    pub fn new(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        let time = now.time().with_nanosecond(0).unwrap_or(now.time());
        Self {
            start_date: date,
            start_time: time,
            end_date: date,
            end_time: time,
            focus: RangeField::default(),
        }
    }

    /// The closed UTC range the fields describe.
    pub fn range(&self) -> TimeRange {
        TimeRange::from_parts(self.start_date, self.start_time, self.end_date, self.end_time)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Move the focused field by `steps` days or minutes.
    pub fn step(&mut self, steps: i64) {
        if self.focus.is_date() {
            self.shift_date(TimeDelta::days(steps));
        } else {
            self.shift_time(TimeDelta::minutes(steps));
        }
    }

    /// Move the focused field by `steps` blocks of thirty days or one hour.
    pub fn step_large(&mut self, steps: i64) {
        if self.focus.is_date() {
            self.shift_date(TimeDelta::days(30 * steps));
        } else {
            self.shift_time(TimeDelta::hours(steps));
        }
    }

    fn shift_date(&mut self, delta: TimeDelta) {
        let date = match self.focus {
            RangeField::StartDate => &mut self.start_date,
            RangeField::EndDate => &mut self.end_date,
            _ => return,
        };
        if let Some(shifted) = date.checked_add_signed(delta) {
            *date = shifted;
        }
    }

    fn shift_time(&mut self, delta: TimeDelta) {
        let time = match self.focus {
            RangeField::StartTime => &mut self.start_time,
            RangeField::EndTime => &mut self.end_time,
            _ => return,
        };
        *time = time.overflowing_add_signed(delta).0;
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    /// Most recent successfully normalized series. Kept when a later tick
    /// fails, so the last good chart stays on screen.
    pub series: Option<Series>,
    pub load_error: Option<String>,

    // Chart cursor: index into the series; `None` follows the latest sample
    pub cursor: Option<usize>,

    // Export
    pub range: RangePicker,
    pub export_dir: PathBuf,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source` and exporting into `export_dir`.
    ///
    /// The range picker starts at the current UTC date and time.
    pub fn new(source: Box<dyn DataSource>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            running: true,
            show_help: false,
            source,
            series: None,
            load_error: None,
            cursor: None,
            range: RangePicker::new(Utc::now()),
            export_dir: export_dir.into(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new series.
    ///
    /// Returns `true` if a new series replaced the current one. A failed
    /// tick only updates `load_error`; the previous series is kept.
    pub fn reload_data(&mut self) -> bool {
        let polled = self.source.poll();
        self.load_error = self.source.error().map(str::to_string);

        let Some(series) = polled else {
            return false;
        };

        if let Some(index) = self.cursor {
            if index + 1 >= series.len() {
                self.cursor = None;
            }
        }
        self.series = Some(series);
        true
    }

    /// Samples of the current series (empty before the first tick).
    pub fn samples(&self) -> &[Sample] {
        self.series.as_ref().map(|s| s.samples()).unwrap_or(&[])
    }

    /// Index of the sample under the chart cursor.
    pub fn cursor_index(&self) -> Option<usize> {
        let len = self.samples().len();
        if len == 0 {
            return None;
        }
        Some(self.cursor.unwrap_or(len - 1).min(len - 1))
    }

    /// The sample under the chart cursor (the latest one by default).
    pub fn cursor_sample(&self) -> Option<&Sample> {
        self.cursor_index().and_then(|i| self.samples().get(i))
    }

    /// Move the chart cursor `n` samples back in time.
    pub fn cursor_prev_n(&mut self, n: usize) {
        if let Some(index) = self.cursor_index() {
            self.cursor = Some(index.saturating_sub(n));
        }
    }

    /// Move the chart cursor `n` samples forward; reaching the end follows
    /// the latest sample again.
    pub fn cursor_next_n(&mut self, n: usize) {
        let len = self.samples().len();
        if let Some(index) = self.cursor_index() {
            let next = index + n;
            self.cursor = if next + 1 >= len { None } else { Some(next) };
        }
    }

    pub fn cursor_first(&mut self) {
        if !self.samples().is_empty() {
            self.cursor = Some(0);
        }
    }

    pub fn cursor_last(&mut self) {
        self.cursor = None;
    }

    /// Samples inside the range picker's current selection.
    pub fn selection(&self) -> &[Sample] {
        self.range.range().select(self.samples())
    }

    /// Reset the range picker to the current date and time.
    pub fn reset_range(&mut self) {
        let focus = self.range.focus;
        self.range = RangePicker::new(Utc::now());
        self.range.focus = focus;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the selected range as CSV into the export directory.
    pub fn export_selection(&self) -> Result<ExportOutcome> {
        let Some(ref series) = self.series else {
            bail!("No data to export");
        };
        Ok(export_range(&self.export_dir, series.samples(), &self.range.range())?)
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}
