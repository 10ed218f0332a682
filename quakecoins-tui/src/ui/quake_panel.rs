//! Panel 3 — Quakes: per-day event counts (bars) and mean magnitude
//! (sparkline), over the aligned table so quiet days show as gaps.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Paragraph, Sparkline};
use ratatui::Frame;

use quakecoins_core::pipeline::DashboardSnapshot;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No earthquake data yet. Press r to fetch.",
                theme::muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);

    render_counts(f, chunks[0], snapshot);
    render_magnitudes(f, chunks[1], snapshot);
}

fn render_counts(f: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    // Day-of-month labels; counts come from the aligned rows so every
    // date in the window has a bar slot (possibly zero-height).
    let bars: Vec<(String, u64)> = snapshot
        .aligned
        .iter()
        .map(|r| (r.date.format("%d").to_string(), u64::from(r.eq_count)))
        .collect();
    let bars_ref: Vec<(&str, u64)> = bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();

    let title = format!(
        " Events/day >= M{:.1} [{}] ",
        snapshot.options.min_magnitude,
        snapshot.quakes.origin.label(),
    );
    let chart = BarChart::default()
        .block(Block::default().title(Span::styled(title, theme::panel_title(false))))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(theme::NEUTRAL))
        .value_style(Style::default().fg(theme::NEUTRAL))
        .data(&bars_ref);

    f.render_widget(chart, area);
}

fn render_magnitudes(f: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    // Tenths of a magnitude unit so the sparkline has integer resolution.
    let mags: Vec<u64> = snapshot
        .aligned
        .iter()
        .map(|r| (r.avg_mag * 10.0).round() as u64)
        .collect();
    let peak = mags.iter().copied().max().unwrap_or(0);

    let spark = Sparkline::default()
        .block(Block::default().title(Span::styled(
            format!(" Avg magnitude (peak M{:.1}) ", peak as f64 / 10.0),
            theme::panel_title(false),
        )))
        .style(Style::default().fg(theme::WARNING))
        .data(&mags);

    f.render_widget(spark, area);
}
