//! Modal overlays — welcome screen and error history.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

use super::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let rect = centered_rect(60, 50, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Quakes & Coins ");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Bitcoin prices vs global earthquakes.",
            theme::accent(),
        )),
        Line::from(Span::styled(
            "A totally unnecessary but fun mashup.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Data: CoinGecko API + USGS Earthquake Catalog.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "When a provider is unreachable the dashboard quietly",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "switches to synthetic data (watch the SYNTH badges).",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The correlation figures are a snapshot, not statistics.",
            theme::warning(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to begin.", theme::accent())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(70, 60, area);
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" Errors ({}) [Esc]close ", app.error_history.len()));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    if app.error_history.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("No errors recorded.", theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .skip(app.error_scroll)
        .take(inner.height as usize)
        .map(|rec| {
            Line::from(vec![
                Span::styled(
                    rec.timestamp.format("%H:%M:%S ").to_string(),
                    theme::muted(),
                ),
                Span::styled(format!("[{}] ", rec.category.label()), theme::warning()),
                Span::raw(rec.message.clone()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
