//! Neon-on-dark theme tokens for the dashboard.

use quakecoins_core::domain::DataOrigin;
use ratatui::style::{Color, Modifier, Style};

/// Electric cyan — focus, highlights, the price line.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
/// Neon green — live data, positive coefficients.
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
/// Hot pink — negative coefficients, errors.
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
/// Neon orange — warnings, synthetic-data badges.
pub const WARNING: Color = Color::Rgb(255, 140, 0);
/// Cool purple — secondary info.
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
/// Steel blue — muted text, axis labels.
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Badge style for a series origin: live data green, synthetic orange.
pub fn origin(origin: DataOrigin) -> Style {
    match origin {
        DataOrigin::Live => positive(),
        DataOrigin::Synthetic => warning(),
    }
}

/// Color for a correlation coefficient by sign and strength.
pub fn coefficient(r: f64) -> Style {
    match r {
        r if r >= 0.5 => positive(),
        r if r >= 0.0 => Style::default().fg(ACCENT),
        r if r >= -0.5 => neutral(),
        _ => negative(),
    }
}

/// Color for a mean magnitude value.
pub fn magnitude(mag: f64) -> Style {
    match mag {
        m if m >= 6.0 => negative(),
        m if m >= 4.5 => warning(),
        m if m > 0.0 => Style::default().fg(ACCENT),
        _ => muted(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_badges_are_distinct() {
        assert_ne!(origin(DataOrigin::Live), origin(DataOrigin::Synthetic));
    }

    #[test]
    fn coefficient_color_tracks_sign() {
        assert_eq!(coefficient(0.8), positive());
        assert_eq!(coefficient(-0.8), negative());
    }

    #[test]
    fn magnitude_color_escalates() {
        assert_eq!(magnitude(0.0), muted());
        assert_eq!(magnitude(5.0), warning());
        assert_eq!(magnitude(7.1), negative());
    }
}
