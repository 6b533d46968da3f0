//! Shared application state — the single source of truth components read from.
//!
//! Components never mutate this directly; they emit `Action`s and the App
//! applies transitions through the methods below. The view enum is a strict
//! machine: Connect → Loading → Content | Error, with Error → Connect on
//! "try again".

use vibes_core::auth::FlowPhase;
use vibes_core::dashboard::{self, DashboardData, FeatureAverages, GenreCount};

/// Which screen fills the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Connect,
    Loading,
    Content,
    Error,
}

/// What the content view shows. Radar and genre tags are mutually exclusive:
/// the radar needs feature averages, the tags are the degraded fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Radar,
    Genres,
}

pub struct AppState {
    pub view: View,
    pub phase: FlowPhase,
    /// False when no client id is configured; the connect panel warns instead
    /// of offering a dead button.
    pub client_id_present: bool,
    pub display_name: Option<String>,
    pub artists: Vec<vibes_core::api::Artist>,
    pub genres: Vec<GenreCount>,
    pub avg_features: Option<FeatureAverages>,
    pub error_message: Option<String>,
    /// The authorize URL of the in-flight attempt, kept so the user can open
    /// it by hand if the browser launch failed.
    pub auth_url: Option<String>,
}

impl AppState {
    pub fn new(client_id_present: bool) -> Self {
        Self {
            view: View::default(),
            phase: FlowPhase::default(),
            client_id_present,
            display_name: None,
            artists: Vec::new(),
            genres: Vec::new(),
            avg_features: None,
            error_message: None,
            auth_url: None,
        }
    }

    pub fn to_loading(&mut self, phase: FlowPhase) {
        self.view = View::Loading;
        self.phase = phase;
        self.error_message = None;
    }

    pub fn to_content(&mut self, data: DashboardData) {
        self.view = View::Content;
        self.phase = FlowPhase::Connected;
        self.display_name = data.display_name;
        self.genres = dashboard::top_genres(&data.artists);
        self.artists = data.artists;
        self.avg_features = data.avg_features;
        self.error_message = None;
        self.auth_url = None;
    }

    pub fn to_error(&mut self, message: String) {
        self.view = View::Error;
        self.phase = FlowPhase::Failed;
        self.error_message = Some(message);
        self.auth_url = None;
    }

    /// Back to square one. Session data is cleared by the App alongside this.
    pub fn to_connect(&mut self) {
        self.view = View::Connect;
        self.phase = FlowPhase::Disconnected;
        self.display_name = None;
        self.artists.clear();
        self.genres.clear();
        self.avg_features = None;
        self.error_message = None;
        self.auth_url = None;
    }

    pub fn content_mode(&self) -> ContentMode {
        if self.avg_features.is_some() {
            ContentMode::Radar
        } else {
            ContentMode::Genres
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibes_core::api::Artist;
    use vibes_core::dashboard::FeatureAverages;

    fn data(avg: Option<FeatureAverages>) -> DashboardData {
        let artists: Vec<Artist> =
            serde_json::from_str(r#"[{"id":"a","name":"A","genres":["dub","pop"]}]"#).unwrap();
        DashboardData {
            display_name: Some("listener".to_string()),
            artists,
            tracks: Vec::new(),
            avg_features: avg,
        }
    }

    #[test]
    fn error_to_connect_resets_everything() {
        let mut state = AppState::new(true);
        state.to_loading(FlowPhase::Redirecting);
        state.to_error("boom".to_string());
        assert_eq!(state.view, View::Error);
        assert_eq!(state.phase, FlowPhase::Failed);

        state.to_connect();
        assert_eq!(state.view, View::Connect);
        assert_eq!(state.phase, FlowPhase::Disconnected);
        assert!(state.error_message.is_none());
        assert!(state.artists.is_empty());
    }

    #[test]
    fn content_mode_is_radar_only_with_averages() {
        let mut state = AppState::new(true);
        state.to_content(data(Some(FeatureAverages([0.5; 9]))));
        assert_eq!(state.content_mode(), ContentMode::Radar);

        state.to_content(data(None));
        assert_eq!(state.content_mode(), ContentMode::Genres);
        assert_eq!(state.genres[0].name, "dub");
    }

    #[test]
    fn loading_clears_a_stale_error() {
        let mut state = AppState::new(true);
        state.to_error("boom".to_string());
        state.to_loading(FlowPhase::Redirecting);
        assert!(state.error_message.is_none());
        assert_eq!(state.view, View::Loading);
    }
}
