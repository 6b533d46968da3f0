//! Spotify Web API client
//!
//! Thin typed wrappers over the handful of resource calls the dashboard
//! needs. Every call carries the bearer token; non-2xx responses become
//! `ConnectError::Api` with whatever message the body offers.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConnectError;

pub const API_BASE: &str = "https://api.spotify.com/v1";

/// The "recent listening" window used for all top-item queries.
pub const TIME_RANGE: &str = "short_term";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Artist as embedded in a track object — no genres or images there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// One track's audio-feature record. Every field is optional: the endpoint
/// returns `null` entries for unknown ids and may omit fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioFeatures {
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    /// Raw decibels, roughly -60..0.
    pub loudness: Option<f64>,
    pub speechiness: Option<f64>,
    /// Beats per minute.
    pub tempo: Option<f64>,
    pub valence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesBatch {
    #[serde(default = "Vec::new")]
    audio_features: Vec<Option<AudioFeatures>>,
}

pub async fn get_profile(client: &Client, token: &str) -> Result<Profile, ConnectError> {
    api_get(client, token, &format!("{API_BASE}/me")).await
}

pub async fn get_top_artists(
    client: &Client,
    token: &str,
    limit: u32,
) -> Result<Vec<Artist>, ConnectError> {
    let url = format!("{API_BASE}/me/top/artists?limit={limit}&time_range={TIME_RANGE}");
    let page: Page<Artist> = api_get(client, token, &url).await?;
    Ok(page.items)
}

pub async fn get_top_tracks(
    client: &Client,
    token: &str,
    limit: u32,
) -> Result<Vec<Track>, ConnectError> {
    let url = format!("{API_BASE}/me/top/tracks?limit={limit}&time_range={TIME_RANGE}");
    let page: Page<Track> = api_get(client, token, &url).await?;
    Ok(page.items)
}

/// Fetch audio features for one batch of track ids (the endpoint caps a batch
/// at 100). Null entries for unknown ids are dropped. An empty id list short
/// circuits without a request.
pub async fn get_audio_features(
    client: &Client,
    token: &str,
    ids: &[String],
) -> Result<Vec<AudioFeatures>, ConnectError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let url = format!("{API_BASE}/audio-features?ids={}", ids.join(","));
    let batch: AudioFeaturesBatch = api_get(client, token, &url).await?;
    Ok(batch.audio_features.into_iter().flatten().collect())
}

async fn api_get<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    url: &str,
) -> Result<T, ConnectError> {
    let response = client.get(url).bearer_auth(token).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(parse_api_error(status.as_u16(), &body));
    }

    Ok(response.json::<T>().await?)
}

/// Shape a non-2xx response into `ConnectError::Api`.
///
/// The resource API wraps errors as `{"error":{"status":N,"message":"…"}}`;
/// the accounts service uses flat `{"error":"…","error_description":"…"}`.
/// Both are handled, falling back to a generic status line.
pub fn parse_api_error(status: u16, body: &str) -> ConnectError {
    #[derive(Default, Deserialize)]
    struct ErrorObject {
        #[serde(default)]
        message: Option<String>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorField {
        Object(ErrorObject),
        Text(String),
    }

    #[derive(Default, Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<ErrorField>,
        #[serde(default)]
        error_description: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error_description
        .or_else(|| match parsed.error {
            Some(ErrorField::Object(obj)) => obj.message,
            Some(ErrorField::Text(text)) => Some(text),
            None => None,
        })
        .unwrap_or_else(|| format!("Spotify API error: {status}"));

    ConnectError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reads_nested_message() {
        let body = r#"{"error":{"status":403,"message":"User not registered in the Developer Dashboard"}}"#;
        match parse_api_error(403, body) {
            ConnectError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("not registered"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_reads_flat_accounts_shape() {
        let body = r#"{"error":"invalid_client","error_description":"Invalid client"}"#;
        match parse_api_error(400, body) {
            ConnectError::Api { message, .. } => assert_eq!(message, "Invalid client"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_status_line() {
        match parse_api_error(502, "<html>bad gateway</html>") {
            ConnectError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Spotify API error: 502");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn feature_batch_drops_null_entries() {
        let body = r#"{"audio_features":[{"energy":0.5},null,{"tempo":120.0}]}"#;
        let batch: AudioFeaturesBatch = serde_json::from_str(body).unwrap();
        let kept: Vec<AudioFeatures> = batch.audio_features.into_iter().flatten().collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].energy, Some(0.5));
        assert_eq!(kept[1].tempo, Some(120.0));
    }

    #[test]
    fn track_parses_without_external_urls() {
        let body = r#"{"id":"t1","name":"Song","artists":[{"name":"Band"}]}"#;
        let track: Track = serde_json::from_str(body).unwrap();
        assert_eq!(track.id.as_deref(), Some("t1"));
        assert_eq!(track.artists[0].name, "Band");
        assert!(track.external_urls.spotify.is_none());
    }
}
