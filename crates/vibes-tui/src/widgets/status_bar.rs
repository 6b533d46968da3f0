//! Status bar — bottom line with connection state and keybindings.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, View};
use crate::theme::{C_ACCENT, C_MUTED, C_SECONDARY};

/// Draw the keybindings footer bar (one row).
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let conn_span = if state.view == View::Content {
        Span::styled("●", Style::default().fg(C_ACCENT))
    } else {
        Span::styled("○", Style::default().fg(C_MUTED))
    };

    let hints: &[(&str, &str)] = match state.view {
        View::Connect => &[("c", "connect"), ("q", "quit")],
        View::Loading => &[("q", "quit")],
        View::Content => &[("q", "quit")],
        View::Error => &[("r", "try again"), ("q", "quit")],
    };

    let mut spans = vec![conn_span, Span::raw("  ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(C_MUTED)));
        }
        spans.push(Span::styled(*key, Style::default().fg(C_ACCENT)));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(C_SECONDARY),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
