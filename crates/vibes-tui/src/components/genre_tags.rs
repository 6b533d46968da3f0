//! Genre tag cloud — the fallback content when audio features are
//! unavailable.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

pub struct GenreTags;

impl Component for GenreTags {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_border())
            .padding(Padding::uniform(1))
            .title(Span::styled(" genres ", theme::style_accent()));

        let mut spans: Vec<Span> = Vec::new();
        for (i, genre) in state.genres.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!("#{}", genre.name),
                ratatui::style::Style::default().fg(theme::C_TAG),
            ));
            if genre.count > 1 {
                spans.push(Span::styled(
                    format!("×{}", genre.count),
                    theme::style_muted(),
                ));
            }
        }

        let paragraph = if spans.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No genre data for these artists.",
                theme::style_secondary(),
            )))
        } else {
            Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true })
        };

        frame.render_widget(paragraph.block(block), area);
    }
}
