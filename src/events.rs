use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, NO_DATA_IN_RANGE};
use crate::data::ExportOutcome;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Chart cursor
        KeyCode::Left | KeyCode::Char('h') => app.cursor_prev_n(1),
        KeyCode::Right | KeyCode::Char('l') => app.cursor_next_n(1),
        KeyCode::Char('H') => app.cursor_prev_n(10),
        KeyCode::Char('L') => app.cursor_next_n(10),
        KeyCode::Home => app.cursor_first(),
        KeyCode::End => app.cursor_last(),

        // Range picker
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.range.focus_prev();
            } else {
                app.range.focus_next();
            }
        }
        KeyCode::BackTab => app.range.focus_prev(),
        KeyCode::Up | KeyCode::Char('k') => app.range.step(1),
        KeyCode::Down | KeyCode::Char('j') => app.range.step(-1),
        KeyCode::PageUp => app.range.step_large(1),
        KeyCode::PageDown => app.range.step_large(-1),
        KeyCode::Char('t') => app.reset_range(),

        // Reload
        KeyCode::Char('r') => {
            app.reload_data();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => export(app),

        _ => {}
    }
}

/// Export the selected range and report the outcome in the status bar
fn export(app: &mut App) {
    let message = match app.export_selection() {
        Ok(ExportOutcome::Written { path, rows }) => {
            format!("Exported {} samples to {}", rows, path.display())
        }
        Ok(ExportOutcome::NoData) => NO_DATA_IN_RANGE.to_string(),
        Err(e) => format!("Export failed: {}", e),
    };
    app.set_status_message(message);
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel adjusts the focused range field
        MouseEventKind::ScrollUp => app.range.step(1),
        MouseEventKind::ScrollDown => app.range.step(-1),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RangeField;
    use crate::data::{Sample, Series};
    use crate::source::{ChannelSource, PollOutcome};
    use chrono::DateTime;
    use crossterm::event::KeyEventKind;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_samples(dir: &TempDir, seconds: &[i64]) -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), dir.path());
        let samples = seconds
            .iter()
            .map(|&t| Sample::from_epoch_seconds(t, t as f64).unwrap())
            .collect();
        tx.send(PollOutcome::Ready(Series::new(samples))).unwrap();
        app.reload_data();
        app
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_samples(&dir, &[]);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = app_with_samples(&dir, &[]);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_samples(&dir, &[]);
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_focus_and_step() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_samples(&dir, &[]);
        let before = app.range.clone();

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.range.focus, RangeField::StartTime);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.range.focus, RangeField::StartDate);

        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.range.start_date, before.start_date.succ_opt().unwrap());
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.range, before);
    }

    #[test]
    fn test_cursor_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_samples(&dir, &[1, 2, 3]);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.cursor_sample().unwrap().value, 2.0);
        handle_key_event(&mut app, key(KeyCode::Home));
        assert_eq!(app.cursor_sample().unwrap().value, 1.0);
        handle_key_event(&mut app, key(KeyCode::End));
        assert_eq!(app.cursor_sample().unwrap().value, 3.0);
    }

    #[test]
    fn test_export_key_reports_outcome() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_samples(&dir, &[10, 20, 30]);

        app.range = crate::app::RangePicker::new(DateTime::from_timestamp(40, 0).unwrap());
        handle_key_event(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.get_status_message(), Some(NO_DATA_IN_RANGE));

        app.range = crate::app::RangePicker::new(DateTime::from_timestamp(0, 0).unwrap());
        app.range.end_time = chrono::NaiveTime::from_hms_opt(0, 1, 0).unwrap();
        let mut press = key(KeyCode::Char('e'));
        press.kind = KeyEventKind::Press;
        handle_key_event(&mut app, press);
        assert!(app.get_status_message().unwrap().starts_with("Exported 3 samples"));
        assert!(dir
            .path()
            .join("temperature_data_1970-01-01_1970-01-01.csv")
            .exists());
    }
}
