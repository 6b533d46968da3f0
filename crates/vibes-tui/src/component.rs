//! Component trait — the interface every UI panel implements.
//!
//! Components are self-contained: they own their render state (spinner
//! frames, scroll offsets) and read shared data from `AppState`. They never
//! mutate shared state directly; they return `Vec<Action>` and the App
//! event-loop dispatches those.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event. Returns actions to be dispatched.
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called each tick (~100ms). For spinner animation and the like.
    fn tick(&mut self, _state: &AppState) {}

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
