//! Runtime configuration.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config <FILE>`, or `nanotemp.toml` in the working
//!    directory if present)
//! 3. `NANOTEMP_*` environment variables (e.g. `NANOTEMP_DATABASE_URL`,
//!    `NANOTEMP_AUTH`)
//! 4. Command-line flags
//!
//! The store credential is only ever read from the file or the
//! environment; there is no flag for it so it never lands in shell history.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::store::{FileStore, FirebaseStore, SnapshotStore};

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_NAME: &str = "nanotemp";

/// Prefix of the environment variables read as settings.
pub const ENV_PREFIX: &str = "NANOTEMP";

/// Interval suffix to milliseconds multiplier (longer suffixes first).
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Realtime Database URL. Required unless `file` is set.
    pub database_url: Option<String>,
    /// Path of the readings inside the database.
    pub path: String,
    /// Database secret or ID token.
    pub auth: Option<String>,
    /// Read snapshots from this JSON file instead of the database.
    pub file: Option<PathBuf>,
    /// Wait between polls, e.g. "1s" or "500ms".
    pub refresh: String,
    /// Request timeout for the database.
    pub timeout: String,
    /// Directory CSV exports are written to.
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            path: crate::store::DEFAULT_PATH.to_string(),
            auth: None,
            file: None,
            refresh: "1s".to_string(),
            timeout: "10s".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

/// Values given on the command line, applied over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub path: Option<String>,
    pub file: Option<PathBuf>,
    pub refresh: Option<String>,
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the optional config file, the process environment
    /// and the command-line overrides.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(config_file, overrides, None)
    }

    /// Like [`Settings::load`], reading environment variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        overrides: &Overrides,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .set_override_option("database_url", overrides.database_url.clone())?
            .set_override_option("path", overrides.path.clone())?
            .set_override_option("file", path_string(&overrides.file))?
            .set_override_option("refresh", overrides.refresh.clone())?
            .set_override_option("export_dir", path_string(&overrides.export_dir))?;

        let settings: Settings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        // Fail early on malformed intervals rather than on the first poll
        settings.refresh_interval()?;
        settings.request_timeout()?;

        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_interval(&self.refresh).context("Invalid refresh interval")
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        parse_interval(&self.timeout).context("Invalid request timeout")
    }

    /// Build the store these settings describe.
    pub fn open_store(&self) -> Result<Arc<dyn SnapshotStore>> {
        if let Some(ref file) = self.file {
            return Ok(Arc::new(FileStore::new(file)));
        }

        let Some(ref url) = self.database_url else {
            bail!(
                "No database URL configured (use --url, {}_DATABASE_URL or a config file), \
                 or pass --file",
                ENV_PREFIX
            );
        };

        let mut builder = FirebaseStore::builder()
            .database_url(url.as_str())
            .path(self.path.as_str())
            .timeout(self.request_timeout()?);
        if let Some(ref auth) = self.auth {
            builder = builder.auth(auth.as_str());
        }

        Ok(Arc::new(builder.build()?))
    }
}

fn path_string(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.display().to_string())
}

/// Parse interval strings like "1s", "500ms", "2m", "1h", or bare seconds.
///
/// Zero is rejected: the poller must always wait between ticks.
pub fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim();

    let millis = match UNITS.iter().find_map(|(suffix, multiplier)| {
        s.strip_suffix(suffix).map(|value| (value, multiplier))
    }) {
        Some((value, multiplier)) => value.trim().parse::<f64>()? * multiplier,
        None => s.parse::<f64>().context(format!("Unknown interval format: {}", s))? * 1_000.0,
    };

    if !millis.is_finite() || millis < 1.0 {
        bail!("Interval must be at least 1ms: {}", s);
    }

    Ok(Duration::from_millis(millis as u64))
}
