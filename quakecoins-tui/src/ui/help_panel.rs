//! Panel 6 — Help: key bindings and data-source notes.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Navigation", theme::accent())));
    for (key, what) in [
        ("1-6", "jump to panel"),
        ("Tab / Shift-Tab", "next / previous panel"),
        ("q", "quit"),
    ] {
        lines.push(binding(key, what));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Dashboard", theme::accent())));
    for (key, what) in [
        ("r", "re-fetch and recompute everything"),
        ("j/k", "select control (Overview) or scroll (Table)"),
        ("h/l", "adjust the selected control"),
        ("e", "error history overlay"),
        ("g/G", "jump to top/bottom of the table"),
    ] {
        lines.push(binding(key, what));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Data sources", theme::accent())));
    lines.push(Line::from(Span::styled(
        "  Bitcoin: CoinGecko market-chart API (daily, USD)",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  Earthquakes: USGS FDSN event catalog (GeoJSON)",
        theme::muted(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  A failed fetch silently switches that series to synthetic",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  data (SYNTH badge in the status bar) so the dashboard",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  keeps working offline.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn binding<'a>(key: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key:<16}"), theme::neutral()),
        Span::styled(what, theme::muted()),
    ])
}
