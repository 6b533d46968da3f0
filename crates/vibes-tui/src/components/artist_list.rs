//! Top-artists list for the content view.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

pub struct ArtistList;

/// Truncate to `max` display columns, appending an ellipsis if anything was
/// cut. Width-aware so CJK names don't overflow the panel.
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.to_string().width();
        if used + w > max.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

impl Component for ArtistList {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_border())
            .padding(Padding::horizontal(1))
            .title(Span::styled(" top artists ", theme::style_accent()));

        let inner_width = area.width.saturating_sub(4) as usize;
        let lines: Vec<Line> = state
            .artists
            .iter()
            .enumerate()
            .map(|(i, artist)| {
                let rank = format!("{}. ", i + 1);
                let name_width = inner_width.saturating_sub(rank.width());
                Line::from(vec![
                    Span::styled(rank, theme::style_muted()),
                    Span::styled(
                        truncate_to_width(&artist.name, name_width),
                        theme::style_default(),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_width_aware() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer name", 8), "a longe…");
        // Double-width characters count double.
        assert_eq!(truncate_to_width("坂本龍一", 5), "坂本…");
    }
}
