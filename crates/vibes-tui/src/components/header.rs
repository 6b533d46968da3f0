//! Header — app title plus whose listening data is on screen.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, View};
use crate::component::Component;
use crate::theme;

pub struct Header;

impl Component for Header {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![Span::styled("♪ vibes", theme::style_accent_bold())];

        if state.view == View::Content {
            let who = state.display_name.as_deref().unwrap_or("you");
            spans.push(Span::styled(
                format!("  top artists this month for {who}"),
                theme::style_secondary(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
