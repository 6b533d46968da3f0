use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub callback: CallbackConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// Client id of your Spotify app (Dashboard → your app → Settings).
    /// `SPOTIFY_CLIENT_ID` in the environment overrides this.
    #[serde(default)]
    pub client_id: String,
    /// Redirect URI registered with the app. When empty, one is derived from
    /// the callback bind address and port.
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default = "default_scopes")]
    pub scopes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// User-configurable output paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where `vibes snapshot` writes its JSON.
    /// Defaults to `<data dir>/spotify-vibes.json`.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            redirect_uri: String::new(),
            scopes: default_scopes(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_scopes() -> String {
    "user-top-read user-read-private".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_snapshot_path() -> PathBuf {
    platform::data_dir().join("spotify-vibes.json")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config.with_env_overrides());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config.with_env_overrides())
    }

    /// Fold environment overrides into the loaded file. Reading the
    /// environment happens here, once, so `client_id()` stays a pure
    /// accessor.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("SPOTIFY_CLIENT_ID") {
            let v = v.trim();
            if !v.is_empty() {
                self.spotify.client_id = v.to_string();
            }
        }
        self
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    /// Client id as configured (`SPOTIFY_CLIENT_ID` from the environment is
    /// folded in by `load()`).
    pub fn client_id(&self) -> String {
        self.spotify.client_id.trim().to_string()
    }

    /// Configured redirect URI, or one derived from the callback listener.
    pub fn redirect_uri(&self) -> String {
        let configured = self.spotify.redirect_uri.trim();
        if !configured.is_empty() {
            return configured.to_string();
        }
        format!(
            "http://{}:{}/callback",
            self.callback.bind_address, self.callback.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.spotify.client_id.is_empty());
        assert_eq!(config.spotify.scopes, "user-top-read user-read-private");
        assert_eq!(config.callback.bind_address, "127.0.0.1");
        assert_eq!(config.callback.port, 8888);
        assert!(config.paths.snapshot_path.ends_with("spotify-vibes.json"));
    }

    #[test]
    fn redirect_uri_derives_from_callback_listener() {
        let config = Config::default();
        assert_eq!(config.redirect_uri(), "http://127.0.0.1:8888/callback");
    }

    #[test]
    fn explicit_redirect_uri_wins() {
        let mut config = Config::default();
        config.spotify.redirect_uri = "https://example.com/cb".to_string();
        assert_eq!(config.redirect_uri(), "https://example.com/cb");
    }

    #[test]
    fn client_id_ignores_the_ambient_environment() {
        // The env override is applied once, in with_env_overrides(); the
        // accessor itself never consults the environment, so tests that build
        // a Config by hand are deterministic.
        let mut config = Config::default();
        config.spotify.client_id = " file-id ".to_string();
        assert_eq!(config.client_id(), "file-id");
    }
}
