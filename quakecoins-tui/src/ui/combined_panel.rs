//! Panel 4 — Combined: BTC price vs daily quake count scatter. Marker
//! weight stands in for the mean magnitude (heavier glyph, stronger day).

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
        Some(snapshot) if snapshot.aligned.len() > 1 => render_scatter(f, area, snapshot),
        _ => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Need at least two aligned days. Press r to fetch.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_scatter(f: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let mut quiet: Vec<(f64, f64)> = Vec::new();
    let mut mild: Vec<(f64, f64)> = Vec::new();
    let mut moderate: Vec<(f64, f64)> = Vec::new();
    let mut strong: Vec<(f64, f64)> = Vec::new();

    for row in &snapshot.aligned {
        let point = (f64::from(row.eq_count), row.price_usd);
        if row.eq_count == 0 {
            quiet.push(point);
        } else if row.avg_mag < 4.5 {
            mild.push(point);
        } else if row.avg_mag < 6.0 {
            moderate.push(point);
        } else {
            strong.push(point);
        }
    }

    let max_count = snapshot
        .aligned
        .iter()
        .map(|r| f64::from(r.eq_count))
        .fold(0.0, f64::max);
    let min_price = snapshot
        .aligned
        .iter()
        .map(|r| r.price_usd)
        .fold(f64::INFINITY, f64::min);
    let max_price = snapshot
        .aligned
        .iter()
        .map(|r| r.price_usd)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (max_price - min_price).abs().max(1.0) * 0.05;
    let y_min = min_price - padding;
    let y_max = max_price + padding;
    let x_max = max_count.max(1.0) + 1.0;

    let datasets = vec![
        scatter("quiet", &quiet, symbols::Marker::Dot, theme::MUTED),
        scatter("M<4.5", &mild, symbols::Marker::Dot, theme::ACCENT),
        scatter("M<6.0", &moderate, symbols::Marker::HalfBlock, theme::WARNING),
        scatter("M>=6.0", &strong, symbols::Marker::Block, theme::NEGATIVE),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Quakes/day", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{x_max:.0}"), theme::muted()),
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

fn scatter<'a>(
    name: &'a str,
    data: &'a [(f64, f64)],
    marker: symbols::Marker,
    color: ratatui::style::Color,
) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(marker)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Scatter)
        .data(data)
}
