//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, NO_DATA};

/// Render the header bar with the latest reading.
///
/// Displays: title, latest temperature, when it was recorded.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" NANOTEMP ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref series) = app.series else {
        let line = Line::from(vec![title, Span::raw("│ Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let line = match series.latest() {
        Some(latest) => Line::from(vec![
            title,
            Span::raw("│ Temperature: "),
            Span::styled(
                format!("{} °C", format_value(latest.value)),
                Style::default()
                    .fg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ Recorded at: "),
            Span::raw(latest.display_text.as_str()),
        ]),
        None => Line::from(vec![
            title,
            Span::raw("│ "),
            Span::styled(NO_DATA, Style::default().add_modifier(Modifier::DIM)),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a temperature for display (two decimals at most).
pub fn format_value(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref series) = app.series {
        format!(
            " {} | Updated {:.1}s ago | ←→:cursor Tab:field ↑↓:adjust e:export ?:help q:quit",
            app.source_description(),
            series.fetched_at.elapsed().as_secs_f64(),
        )
    } else {
        format!(" {} | Loading... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Chart"),
        Line::from("  ←/→ h/l     Move cursor"),
        Line::from("  H/L         Move cursor 10 samples"),
        Line::from("  Home/End    First/latest sample"),
        Line::from(""),
        section(" Export range"),
        Line::from("  Tab/S-Tab   Next/previous field"),
        Line::from("  ↑/↓ k/j     Day or minute"),
        Line::from("  PgUp/PgDn   30 days or one hour"),
        Line::from("  t           Reset to now"),
        Line::from("  e           Export to CSV"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload data"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(21.0), "21");
        assert_eq!(format_value(21.5), "21.5");
        assert_eq!(format_value(21.456), "21.46");
        assert_eq!(format_value(-3.10), "-3.1");
    }
}
