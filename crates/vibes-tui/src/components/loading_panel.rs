//! Loading screen — spinner plus a phase-specific status line.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use vibes_core::auth::FlowPhase;

use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Default)]
pub struct LoadingPanel {
    frame_idx: usize,
}

fn phase_label(phase: FlowPhase) -> &'static str {
    match phase {
        FlowPhase::Redirecting => "Opening your browser…",
        FlowPhase::AwaitingCallback => "Waiting for you to approve in the browser…",
        FlowPhase::Exchanging => "Exchanging the code for a token…",
        FlowPhase::Connected => "Fetching your top artists and tracks…",
        FlowPhase::Disconnected | FlowPhase::Failed => "Working…",
    }
}

impl Component for LoadingPanel {
    fn tick(&mut self, _state: &AppState) {
        self.frame_idx = (self.frame_idx + 1) % SPINNER_FRAMES.len();
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::style_border())
            .padding(Padding::uniform(1));

        let mut lines = vec![Line::from(vec![
            Span::styled(SPINNER_FRAMES[self.frame_idx], theme::style_accent()),
            Span::raw(" "),
            Span::styled(phase_label(state.phase), theme::style_default()),
        ])];

        // If the browser didn't open, the URL is the user's escape hatch.
        if state.phase == FlowPhase::AwaitingCallback {
            if let Some(url) = &state.auth_url {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    "If no browser opened, visit:",
                    theme::style_secondary(),
                )));
                lines.push(Line::from(Span::styled(url.clone(), theme::style_muted())));
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
