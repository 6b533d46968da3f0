//! Session store — the two pieces of per-run mutable state.
//!
//! Holds the access token and the transient PKCE code verifier. Modelled as a
//! trait so the auth flow can run against a fake in tests; the real store is a
//! plain in-memory struct that lives as long as the process (a connect attempt
//! never outlives the run, and tokens are deliberately not persisted to disk).

/// Two string slots: access token and PKCE verifier. Single-writer — only the
/// app event loop touches it.
pub trait SessionStore {
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: &str);
    fn clear_token(&mut self);

    fn set_verifier(&mut self, verifier: &str);
    /// One-shot read: returns the stored verifier and clears the slot.
    fn take_verifier(&mut self) -> Option<String>;
    fn clear_verifier(&mut self);

    /// Wipe both slots — used by "try again" so the next attempt starts fresh.
    fn clear_all(&mut self) {
        self.clear_token();
        self.clear_verifier();
    }
}

#[derive(Debug, Default)]
pub struct MemorySession {
    token: Option<String>,
    verifier: Option<String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear_token(&mut self) {
        self.token = None;
    }

    fn set_verifier(&mut self, verifier: &str) {
        self.verifier = Some(verifier.to_string());
    }

    fn take_verifier(&mut self) -> Option<String> {
        self.verifier.take()
    }

    fn clear_verifier(&mut self) {
        self.verifier = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_is_one_shot() {
        let mut s = MemorySession::new();
        s.set_verifier("abc");
        assert_eq!(s.take_verifier().as_deref(), Some("abc"));
        assert_eq!(s.take_verifier(), None);
    }

    #[test]
    fn clear_all_wipes_both_slots() {
        let mut s = MemorySession::new();
        s.set_token("tok");
        s.set_verifier("ver");
        s.clear_all();
        assert_eq!(s.token(), None);
        assert_eq!(s.take_verifier(), None);
    }

    #[test]
    fn token_roundtrip() {
        let mut s = MemorySession::new();
        assert_eq!(s.token(), None);
        s.set_token("tok");
        assert_eq!(s.token(), Some("tok"));
        s.clear_token();
        assert_eq!(s.token(), None);
    }
}
