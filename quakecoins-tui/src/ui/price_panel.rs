//! Panel 2 — Price: BTC daily close line chart.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use quakecoins_core::pipeline::DashboardSnapshot;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.snapshot {
        Some(snapshot) if !snapshot.prices.rows.is_empty() => render_chart(f, area, snapshot),
        _ => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No price data yet. Press r to fetch.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let rows = &snapshot.prices.rows;

    let data: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.price_usd))
        .collect();

    let min_y = data.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = data
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (max_y - min_y).abs().max(1.0) * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = data.len().saturating_sub(1) as f64;

    let name = format!("BTC/USD [{}]", snapshot.prices.origin.label());
    let dataset = Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let first_date = rows.first().map(|r| r.date.to_string()).unwrap_or_default();
    let last_date = rows.last().map(|r| r.date.to_string()).unwrap_or_default();

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_date, theme::muted()),
                    Span::styled(last_date, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("USD", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
