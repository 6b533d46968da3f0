//! Error screen — the human-readable failure plus the way out.

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

pub struct ErrorPanel;

impl Component for ErrorPanel {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => vec![Action::TryAgain],
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_error())
            .padding(Padding::uniform(1))
            .title(Span::styled(" something went wrong ", theme::style_error()));

        let message = state
            .error_message
            .as_deref()
            .unwrap_or("Unknown error.")
            .to_string();

        let lines = vec![
            Line::from(Span::styled(message, theme::style_default())),
            Line::default(),
            Line::from(vec![
                Span::styled("Press ", theme::style_secondary()),
                Span::styled("r", theme::style_accent_bold()),
                Span::styled(" to try again.", theme::style_secondary()),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    #[test]
    fn retry_key_produces_try_again() {
        let mut panel = ErrorPanel;
        let state = AppState::new(true);
        let key = KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(panel.handle_key(key, &state), vec![Action::TryAgain]);
    }
}
