//! Terminal rendering.
//!
//! [`render`] draws the whole dashboard from [`App`] state; the first frame
//! and every later tick go through it.
//!
//! ```text
//! ┌ header: latest reading ─────────────────────────┐
//! │ chart                                          │
//! ├ summary ──────────────┬ export range ───────────┤
//! └ status bar ───────────┴─────────────────────────┘
//! ```

pub mod chart;
pub mod common;
pub mod range;
pub mod summary;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub use theme::Theme;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// Draw one frame of the dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(10),   // Chart
        Constraint::Length(7), // Summary and range picker
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    common::render_header(frame, app, chunks[0]);
    chart::render(frame, app, chunks[1]);
    summary::render(frame, app, bottom[0]);
    range::render(frame, app, bottom[1]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
