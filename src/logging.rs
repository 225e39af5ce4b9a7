//! Tracing subscriber initialization.
//!
//! The dashboard owns the terminal, so interactive runs only log when a log
//! file is given. One-shot commands (export) log to stderr.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `NANOTEMP_LOG` env var (per-target directives, e.g. `nanotemp=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. `--verbose` flag → `nanotemp=debug`
//! 4. Default level: `info` for the crate, `warn` elsewhere

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Drop everything (interactive mode without a log file).
    Off,
    /// Write to stderr.
    Stderr,
    /// Append to a file.
    File(&'a Path),
}

/// Initialize the global tracing subscriber.
///
/// Call once, early in `main()`.
pub fn init(target: LogTarget<'_>, verbose: bool) -> Result<()> {
    let filter = build_env_filter(verbose);

    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(use_ansi)
                        .without_time()
                        .compact(),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}

/// Build an `EnvFilter` respecting the priority chain:
/// `NANOTEMP_LOG` > `RUST_LOG` > verbosity default.
fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var("NANOTEMP_LOG") {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(default_directive(verbose))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,nanotemp=debug"
    } else {
        "warn,nanotemp=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }

    #[test]
    fn test_off_installs_nothing() {
        assert!(init(LogTarget::Off, false).is_ok());
    }
}
