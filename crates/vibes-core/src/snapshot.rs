//! Headless snapshot export — `vibes snapshot`.
//!
//! Refreshes an access token from a long-lived refresh token (client id +
//! secret, no PKCE — this path is meant for CI/cron, not the interactive
//! flow) and writes the listener's current top artists and tracks to a flat
//! JSON file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::api::{self, Artist, Track};
use crate::auth;

/// Snapshots are small by design: enough for an embed, not an archive.
pub const SNAPSHOT_ITEM_LIMIT: u32 = 6;

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub display_name: String,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub generated_at: DateTime<Utc>,
}

/// Run the export. Credentials come from the environment:
/// `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REFRESH_TOKEN`.
pub async fn run(client: &Client, out_path: &Path) -> Result<PathBuf> {
    let client_id = env_var("SPOTIFY_CLIENT_ID")?;
    let client_secret = env_var("SPOTIFY_CLIENT_SECRET")?;
    let refresh_token = env_var("SPOTIFY_REFRESH_TOKEN")?;

    let token = auth::refresh_access_token(client, &client_id, &client_secret, &refresh_token)
        .await
        .context("token refresh failed")?;

    let (profile, artists, tracks) = tokio::join!(
        api::get_profile(client, &token),
        api::get_top_artists(client, &token, SNAPSHOT_ITEM_LIMIT),
        api::get_top_tracks(client, &token, SNAPSHOT_ITEM_LIMIT),
    );

    let snapshot = Snapshot {
        display_name: profile?.display_name.unwrap_or_default(),
        artists: artists?,
        tracks: tracks?,
        generated_at: Utc::now(),
    };

    write_snapshot(&snapshot, out_path)?;
    info!(
        path = %out_path.display(),
        artists = snapshot.artists.len(),
        tracks = snapshot.tracks.len(),
        "snapshot written"
    );
    Ok(out_path.to_path_buf())
}

pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing snapshot to {}", path.display()))?;
    Ok(())
}

fn env_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => bail!(
            "missing env: set SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET and \
             SPOTIFY_REFRESH_TOKEN (missing {name})"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_file_has_the_expected_shape() {
        let artists: Vec<Artist> =
            serde_json::from_str(r#"[{"id":"a1","name":"Artist","genres":["dub"]}]"#).unwrap();
        let tracks: Vec<Track> =
            serde_json::from_str(r#"[{"id":"t1","name":"Track","artists":[{"name":"Artist"}]}]"#)
                .unwrap();
        let snapshot = Snapshot {
            display_name: "listener".to_string(),
            artists,
            tracks,
            generated_at: Utc::now(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spotify-vibes.json");
        write_snapshot(&snapshot, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["display_name"], "listener");
        assert_eq!(value["artists"][0]["name"], "Artist");
        assert_eq!(value["tracks"][0]["id"], "t1");
        assert!(value["generated_at"].is_string());
    }
}
