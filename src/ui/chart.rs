//! Temperature chart rendering.
//!
//! Plots the whole series as a line against UTC time. The sample under the
//! cursor is marked and its reading shown in the chart title.

use chrono::DateTime;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::common::format_value;
use crate::app::{App, NO_DATA};
use crate::data::{Sample, Summary};

/// Minimum headroom above and below the plotted values, in degrees.
const MIN_Y_PADDING: f64 = 0.5;

/// Spans longer than this get dates on the time axis.
const ONE_DAY_SECS: f64 = 86_400.0;

/// Render the chart panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let samples = app.samples();
    let cursor = app.cursor_sample();

    let title = match cursor {
        Some(sample) => format!(
            " Temperature │ {} │ {} °C ",
            sample.display_text,
            format_value(sample.value)
        ),
        None => " Temperature ".to_string(),
    };

    let block = Block::default()
        .title(Span::styled(title, app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.border_style());

    if samples.is_empty() {
        let text = if app.series.is_some() {
            NO_DATA
        } else {
            "Loading..."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points = plot_points(samples);
    let cursor_point: Vec<(f64, f64)> = cursor
        .filter(|sample| !sample.value.is_nan())
        .map(|sample| vec![(sample.epoch_seconds(), sample.value)])
        .unwrap_or_default();

    let [x_min, x_max] = x_bounds(samples);
    let [y_min, y_max] = y_bounds(&Summary::of(samples));
    let axis_style = app.theme.border_style();

    let datasets = vec![
        Dataset::default()
            .name("°C")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.line))
            .data(&points),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(app.theme.cursor))
            .data(&cursor_point),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels(time_labels(x_min, x_max)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::from(format!("{:.1}", y_min)),
                    Span::from(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::from(format!("{:.1}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// (epoch seconds, value) pairs, skipping readings that cannot be plotted.
fn plot_points(samples: &[Sample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .filter(|sample| !sample.value.is_nan())
        .map(|sample| (sample.epoch_seconds(), sample.value))
        .collect()
}

/// Time axis bounds; a single instant is widened by a second each side.
fn x_bounds(samples: &[Sample]) -> [f64; 2] {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return [0.0, 1.0];
    };
    let (min, max) = (first.epoch_seconds(), last.epoch_seconds());
    if max > min {
        [min, max]
    } else {
        [min - 1.0, max + 1.0]
    }
}

/// Value axis bounds with ten percent headroom, never less than half a degree.
fn y_bounds(summary: &Summary) -> [f64; 2] {
    let (Some(min), Some(max)) = (&summary.min, &summary.max) else {
        return [0.0, 1.0];
    };
    let padding = ((max.value - min.value) * 0.1).max(MIN_Y_PADDING);
    [min.value - padding, max.value + padding]
}

fn time_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let format = if max - min > ONE_DAY_SECS {
        "%d/%m %H:%M"
    } else {
        "%H:%M"
    };
    let label = |seconds: f64| {
        DateTime::from_timestamp(seconds.floor() as i64, 0)
            .map(|instant| instant.format(format).to_string())
            .unwrap_or_default()
    };
    vec![
        Span::from(label(min)),
        Span::from(label((min + max) / 2.0)),
        Span::from(label(max)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(i64, f64)]) -> Vec<Sample> {
        points
            .iter()
            .map(|&(t, v)| Sample::from_epoch_seconds(t, v).unwrap())
            .collect()
    }

    #[test]
    fn test_x_bounds() {
        assert_eq!(x_bounds(&samples(&[(10, 1.0), (70, 2.0)])), [10.0, 70.0]);
        assert_eq!(x_bounds(&samples(&[(10, 1.0)])), [9.0, 11.0]);
    }

    #[test]
    fn test_y_bounds_padding() {
        let wide = Summary::of(&samples(&[(1, 10.0), (2, 30.0)]));
        assert_eq!(y_bounds(&wide), [8.0, 32.0]);

        let flat = Summary::of(&samples(&[(1, 20.0), (2, 20.0)]));
        assert_eq!(y_bounds(&flat), [19.5, 20.5]);
    }

    #[test]
    fn test_plot_points_skip_nan() {
        let points = plot_points(&samples(&[(1, 20.0), (2, f64::NAN), (3, 21.0)]));
        assert_eq!(points, vec![(1.0, 20.0), (3.0, 21.0)]);
    }

    #[test]
    fn test_time_labels() {
        let labels = time_labels(0.0, 3_600.0);
        assert_eq!(labels[0].content, "00:00");
        assert_eq!(labels[2].content, "01:00");

        let labels = time_labels(0.0, 2.0 * ONE_DAY_SECS);
        assert_eq!(labels[2].content, "03/01 00:00");
    }
}
