//! Summary panel rendering.
//!
//! Latest, lowest and highest reading of the whole series, each with the
//! time it was recorded.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use super::common::format_value;
use crate::app::{App, NO_DATA};
use crate::data::Sample;

/// Render the summary panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app
        .series
        .as_ref()
        .map(|series| series.summary())
        .unwrap_or_default();

    let block = Block::default()
        .title(format!(" Summary ({} samples) ", summary.count))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style());

    let row = |label: &'static str, sample: Option<&Sample>| match sample {
        Some(sample) => Row::new(vec![
            Cell::from(label).style(app.theme.header),
            Cell::from(format!("{} °C", format_value(sample.value))),
            Cell::from(sample.display_text.clone()),
        ]),
        None => Row::new(vec![
            Cell::from(label).style(app.theme.header),
            Cell::from(NO_DATA).style(Style::default().add_modifier(Modifier::DIM)),
            Cell::from(""),
        ]),
    };

    let rows = vec![
        row("Latest", summary.latest.as_ref()),
        row("Min", summary.min.as_ref()),
        row("Max", summary.max.as_ref()),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(18),
            Constraint::Min(19),
        ],
    )
    .block(block);

    frame.render_widget(table, area);
}
