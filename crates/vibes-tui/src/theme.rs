//! Color palette and style constants for the vibes TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(30, 185, 84); // Spotify green
pub const C_AXIS: Color = Color::Rgb(196, 144, 176);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_TAG: Color = Color::Rgb(80, 140, 200);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_accent() -> Style {
    Style::default().fg(C_ACCENT)
}

pub fn style_accent_bold() -> Style {
    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR)
}

pub fn style_warning() -> Style {
    Style::default().fg(C_WARNING)
}

pub fn style_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
