use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use nanotemp::app::{App, NO_DATA_IN_RANGE};
use nanotemp::config::{Overrides, Settings};
use nanotemp::data::{export_range, parse_utc_datetime, ExportOutcome, TimeRange};
use nanotemp::logging::{self, LogTarget};
use nanotemp::source::{fetch_series, ChannelSource, PollOutcome, Poller};
use nanotemp::{events, ui};

/// How often the UI picks up the latest poll outcome.
const UI_TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "nanotemp")]
#[command(about = "Live dashboard and CSV export for temperature readings in a Firebase Realtime Database")]
struct Args {
    /// Config file (TOML). Defaults to ./nanotemp.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Realtime Database URL, e.g. https://my-project.firebaseio.com
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Path of the readings inside the database
    #[arg(short, long)]
    path: Option<String>,

    /// Read readings from a JSON file instead of the database
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval (e.g., "1s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Directory CSV exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Export the --from/--to range to CSV and exit
    #[arg(short, long, requires_all = ["from", "to"])]
    export: bool,

    /// Start of the export range, UTC (e.g., "2024-01-01 08:00")
    #[arg(long, requires = "export")]
    from: Option<String>,

    /// End of the export range, UTC, inclusive
    #[arg(long, requires = "export")]
    to: Option<String>,

    /// Write logs to this file while the dashboard is open
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        database_url: args.url.clone(),
        path: args.path.clone(),
        file: args.file.clone(),
        refresh: args.refresh.clone(),
        export_dir: args.export_dir.clone(),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;

    // The dashboard owns the terminal, so it only logs to a file
    let log_target = match (args.export, args.log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (true, None) => LogTarget::Stderr,
        (false, None) => LogTarget::Off,
    };
    logging::init(log_target, args.verbose)?;

    // Handle export mode (non-interactive)
    if args.export {
        let (Some(from), Some(to)) = (args.from.as_deref(), args.to.as_deref()) else {
            bail!("--export needs both --from and --to");
        };
        let range = TimeRange::new(parse_utc_datetime(from)?, parse_utc_datetime(to)?);
        return export_to_file(&settings, &range);
    }

    run_dashboard(&settings)
}

/// Fetch once and export `range` as CSV
fn export_to_file(settings: &Settings, range: &TimeRange) -> Result<()> {
    let store = settings.open_store()?;
    let rt = tokio::runtime::Runtime::new()?;

    let series = match rt.block_on(fetch_series(store.as_ref())) {
        PollOutcome::Ready(series) => series,
        PollOutcome::Failed(e) => bail!("Failed to read {}: {}", store.description(), e),
        PollOutcome::Pending => bail!("No snapshot read from {}", store.description()),
    };

    match export_range(&settings.export_dir, series.samples(), range)? {
        ExportOutcome::Written { path, rows } => {
            println!("Exported {} samples to: {}", rows, path.display());
        }
        ExportOutcome::NoData => println!("{}", NO_DATA_IN_RANGE),
    }
    Ok(())
}

/// Run the poller in the background and the dashboard on this thread
fn run_dashboard(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    let interval = settings.refresh_interval()?;

    // Build a tokio runtime for the poller
    let rt = tokio::runtime::Runtime::new()?;

    let (tx, source) = ChannelSource::create(store.description());
    let handle = rt.block_on(async move { Poller::new(store).interval(interval).spawn(tx) });

    let app = App::new(Box::new(source), settings.export_dir.clone());
    let result = run_tui(app);

    // Signal shutdown and wait for the poller to finish
    rt.block_on(handle.stop());
    info!("Dashboard closed");

    result
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(UI_TICK)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Pick up whatever the poller published since the last pass
        if last_refresh.elapsed() >= UI_TICK {
            app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
