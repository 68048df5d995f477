//! Theme and Colors

use ratatui::style::{Color, Modifier, Style};

/// Spinner color (xterm 69, a soft blue)
pub const SPINNER_BLUE: Color = Color::Indexed(69);

/// User lines
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Bot name and list titles
pub const ACCENT: Color = Color::Rgb(150, 180, 255);

/// Hints and descriptions
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Spinner glyphs
#[must_use]
pub fn spinner() -> Style {
    Style::default().fg(SPINNER_BLUE)
}

/// Screen titles
#[must_use]
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Secondary text
#[must_use]
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Highlighted list row
#[must_use]
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
