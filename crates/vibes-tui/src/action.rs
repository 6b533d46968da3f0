//! Action enum — user-initiated intents produced by components.

/// All actions that can flow through the app.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the authorization flow (connect screen).
    Connect,
    /// Discard the failed session and return to the connect screen.
    TryAgain,
    Quit,
    Noop,
}
