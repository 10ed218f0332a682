//! Panel 1 — Overview: controls, headline metrics, correlation snapshot.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use quakecoins_core::pipeline::{
    MAX_DAYS, MIN_DAYS, MIN_MAGNITUDE_CEIL, MIN_MAGNITUDE_FLOOR,
};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[j/k]select control [h/l]adjust [r]refresh",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    // Controls as sliders.
    lines.push(control_line(
        "Lookback (days)",
        app.controls.days.to_string(),
        slider_fraction(
            f64::from(app.controls.days),
            f64::from(MIN_DAYS),
            f64::from(MAX_DAYS),
        ),
        app.control_cursor == 0,
    ));
    lines.push(control_line(
        "Min magnitude",
        format!("{:.1}", app.controls.min_magnitude),
        slider_fraction(
            app.controls.min_magnitude,
            MIN_MAGNITUDE_FLOOR,
            MIN_MAGNITUDE_CEIL,
        ),
        app.control_cursor == 1,
    ));
    lines.push(Line::from(""));

    let Some(snapshot) = &app.snapshot else {
        lines.push(Line::from(Span::styled(
            "No data yet. Press r to fetch.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    // Selected range.
    lines.push(Line::from(vec![
        Span::styled("Range: ", theme::muted()),
        Span::styled(
            format!("{} .. {}", snapshot.start, snapshot.end),
            theme::accent(),
        ),
        Span::raw("   "),
        Span::styled(
            format!("BTC:{}", snapshot.prices.origin.label()),
            theme::origin(snapshot.prices.origin),
        ),
        Span::raw(" "),
        Span::styled(
            format!("EQ:{}", snapshot.quakes.origin.label()),
            theme::origin(snapshot.quakes.origin),
        ),
    ]));
    lines.push(Line::from(""));

    // Headline metrics.
    if let Some(last) = snapshot.prices.last_price() {
        lines.push(Line::from(vec![
            Span::styled("Last BTC price: ", theme::muted()),
            Span::styled(format!("${last:>12.2}"), theme::accent()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Total quakes:   ", theme::muted()),
        Span::styled(
            format!("{:>13}", snapshot.quakes.total_events()),
            theme::neutral(),
        ),
    ]));
    if let Some(day) = snapshot.quakes.strongest_day() {
        lines.push(Line::from(vec![
            Span::styled("Strongest day:  ", theme::muted()),
            Span::styled(
                format!("{} (avg M{:.1}, {} events)", day.date, day.avg_mag, day.eq_count),
                theme::magnitude(day.avg_mag),
            ),
        ]));
    }
    lines.push(Line::from(""));

    // Correlation snapshot.
    lines.push(Line::from(Span::styled(
        "Correlation snapshot (naive Pearson, not statistics):",
        theme::warning(),
    )));
    lines.push(coefficient_line(
        "price vs quake count",
        snapshot.correlations.price_vs_count,
    ));
    lines.push(coefficient_line(
        "price vs avg magnitude",
        snapshot.correlations.price_vs_mag,
    ));

    f.render_widget(Paragraph::new(lines), area);
}

fn slider_fraction(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

fn control_line(label: &str, value: String, frac: f64, is_active: bool) -> Line<'_> {
    let style = if is_active {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::muted()
    };

    let bar_width: usize = 30;
    let filled = (frac * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    Line::from(vec![
        Span::styled(format!("{label:>16}: "), style),
        Span::styled(bar, if is_active { theme::accent() } else { theme::muted() }),
        Span::styled(format!(" {value}"), style),
    ])
}

fn coefficient_line(label: &str, value: Option<f64>) -> Line<'_> {
    match value {
        Some(r) => Line::from(vec![
            Span::styled(format!("{label:>24}: "), theme::muted()),
            Span::styled(format!("{r:+.4}"), theme::coefficient(r)),
        ]),
        None => Line::from(vec![
            Span::styled(format!("{label:>24}: "), theme::muted()),
            Span::styled("undefined (constant column or too few rows)", theme::muted()),
        ]),
    }
}
