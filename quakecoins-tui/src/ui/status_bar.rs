//! Bottom status bar — panel hints, origin badges, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Panel hints
    spans.push(Span::styled(
        " 1:Overview 2:Price 3:Quakes 4:Combined 5:Table 6:Help e:errors r:refresh q:quit",
        theme::muted(),
    ));

    spans.push(Span::raw(" | "));

    // Origin badges for the current snapshot.
    if let Some(snapshot) = &app.snapshot {
        spans.push(Span::styled(
            format!("BTC:{}", snapshot.prices.origin.label()),
            theme::origin(snapshot.prices.origin),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("EQ:{}", snapshot.quakes.origin.label()),
            theme::origin(snapshot.quakes.origin),
        ));
        spans.push(Span::raw(" | "));
    }

    if app.refreshing {
        spans.push(Span::styled("fetching... ", theme::warning()));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}
