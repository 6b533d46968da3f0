//! Connect screen — the resting state before any authorization attempt.

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

pub struct ConnectPanel;

impl Component for ConnectPanel {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter if state.client_id_present => {
                vec![Action::Connect]
            }
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_border())
            .padding(Padding::uniform(1))
            .title(Span::styled(" what am i listening to? ", theme::style_accent()));

        let mut lines = vec![
            Line::from(Span::styled(
                "See your month in music: top artists, and either an audio-feature",
                theme::style_default(),
            )),
            Line::from(Span::styled(
                "radar or your genre mix, straight from your Spotify listening.",
                theme::style_default(),
            )),
            Line::default(),
        ];

        if state.client_id_present {
            lines.push(Line::from(vec![
                Span::styled("Press ", theme::style_secondary()),
                Span::styled("c", theme::style_accent_bold()),
                Span::styled(
                    " to connect your Spotify account. A browser window will open.",
                    theme::style_secondary(),
                ),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "No client id configured. Set SPOTIFY_CLIENT_ID or add it to the",
                theme::style_warning(),
            )));
            lines.push(Line::from(Span::styled(
                "config file, then restart.",
                theme::style_warning(),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn press(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn connect_requires_a_client_id() {
        let mut panel = ConnectPanel;
        let with_id = AppState::new(true);
        let without_id = AppState::new(false);

        assert_eq!(panel.handle_key(press('c'), &with_id), vec![Action::Connect]);
        assert!(panel.handle_key(press('c'), &without_id).is_empty());
    }
}
