//! Panel 5 — Table: the aligned rows, scrollable.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("No data yet. Press r to fetch.", theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("BTC (USD)"),
        Cell::from("Quakes"),
        Cell::from("Avg mag"),
    ])
    .style(theme::accent().add_modifier(Modifier::BOLD));

    let visible = area.height.saturating_sub(2) as usize;
    let rows: Vec<Row> = snapshot
        .aligned
        .iter()
        .skip(app.table_scroll)
        .take(visible)
        .map(|r| {
            let mag_cell = if r.eq_count == 0 {
                Cell::from("-").style(theme::muted())
            } else {
                Cell::from(format!("{:.2}", r.avg_mag)).style(theme::magnitude(r.avg_mag))
            };
            Row::new(vec![
                Cell::from(r.date.to_string()),
                Cell::from(format!("{:>12.2}", r.price_usd)).style(theme::accent()),
                Cell::from(format!("{:>6}", r.eq_count)).style(theme::neutral()),
                mag_cell,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2);

    f.render_widget(table, area);
}
