//! Export range picker rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RangeField, NO_DATA_IN_RANGE};
use crate::data::export_file_name;

/// Render the range picker panel.
///
/// Shows the four fields (the focused one highlighted), how many samples
/// the range selects, and the file an export would write.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let picker = &app.range;
    let range = picker.range();

    let field = |which: RangeField, text: String| {
        let style = if picker.focus == which {
            app.theme.focused
        } else {
            Style::default()
        };
        Span::styled(format!(" {} ", text), style)
    };

    let label = |text: &'static str| Span::styled(text, app.theme.header);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let selected = app.selection().len();
    let outcome = if range.is_inverted() {
        Span::styled("Start is after end", Style::default().fg(app.theme.error))
    } else if selected == 0 {
        Span::styled(NO_DATA_IN_RANGE, dim)
    } else {
        Span::raw(format!("{} samples selected", selected))
    };

    let lines = vec![
        Line::from(vec![
            label("From "),
            field(RangeField::StartDate, picker.start_date.format("%Y-%m-%d").to_string()),
            field(RangeField::StartTime, picker.start_time.format("%H:%M:%S").to_string()),
            Span::styled(" UTC", dim),
        ]),
        Line::from(vec![
            label("To   "),
            field(RangeField::EndDate, picker.end_date.format("%Y-%m-%d").to_string()),
            field(RangeField::EndTime, picker.end_time.format("%H:%M:%S").to_string()),
            Span::styled(" UTC", dim),
        ]),
        Line::from(outcome),
        Line::from(vec![
            Span::styled("→ ", dim),
            Span::raw(export_file_name(&range)),
        ]),
        Line::from(Span::styled("Tab:field ↑↓:adjust t:now e:export", dim)),
    ];

    let block = Block::default()
        .title(" Export range ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
