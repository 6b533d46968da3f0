//! OAuth 2.0 authorization-code flow with PKCE against the Spotify accounts
//! service.
//!
//! The flow is: build the authorize URL (persisting the verifier), let the
//! browser round-trip through Spotify's consent dialog to the loopback
//! callback listener, then exchange the returned code for a bearer token.
//! Every failure is terminal for the attempt — recovery is a fresh connect.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::Config;
use crate::error::ConnectError;
use crate::pkce;
use crate::session::SessionStore;

pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Where the connect flow currently is. `Failed` is reachable from every
/// non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPhase {
    #[default]
    Disconnected,
    Redirecting,
    AwaitingCallback,
    Exchanging,
    Connected,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Begin a connect attempt: generate and persist a fresh verifier, then
/// return the authorize URL the browser should visit. Does nothing (and
/// stores nothing) when no client id is configured.
pub fn start_connect(
    config: &Config,
    store: &mut dyn SessionStore,
) -> Result<String, ConnectError> {
    let client_id = config.client_id();
    if client_id.is_empty() {
        return Err(ConnectError::MissingClientId);
    }

    let verifier = pkce::generate_verifier();
    store.set_verifier(&verifier);
    let challenge = pkce::build_challenge(&verifier);

    Ok(build_authorize_url(
        &client_id,
        &config.redirect_uri(),
        &config.spotify.scopes,
        &challenge,
    ))
}

pub fn build_authorize_url(
    client_id: &str,
    redirect_uri: &str,
    scopes: &str,
    challenge: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri),
        ("scope", scopes),
        ("code_challenge_method", "S256"),
        ("code_challenge", challenge),
        ("show_dialog", "true"),
    ];
    let url = Url::parse_with_params(AUTHORIZE_URL, &params)
        .expect("authorize endpoint is a valid URL");
    url.to_string()
}

/// Complete the flow after the browser redirect delivered a code.
///
/// The stored verifier is consumed whether or not the exchange succeeds — an
/// authorization code is single-use, so retrying with the same verifier can
/// never work. Fails with `SessionExpired` when no verifier is stored (e.g.
/// the flow was started by a different run). On success the access token
/// lands in the store and the whole grant is returned — the refresh token,
/// when present, is the caller's to surface (it is what `vibes snapshot`
/// wants in `SPOTIFY_REFRESH_TOKEN`).
pub async fn handle_callback(
    client: &Client,
    config: &Config,
    store: &mut dyn SessionStore,
    code: &str,
) -> Result<TokenGrant, ConnectError> {
    let verifier = store.take_verifier().ok_or(ConnectError::SessionExpired)?;
    let grant = exchange_code(client, config, &verifier, code).await?;
    store.set_token(&grant.access_token);
    Ok(grant)
}

/// POST the authorization code + verifier to the token endpoint.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    verifier: &str,
    code: &str,
) -> Result<TokenGrant, ConnectError> {
    let client_id = config.client_id();
    let redirect_uri = config.redirect_uri();
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", &redirect_uri),
        ("client_id", &client_id),
        ("code_verifier", verifier),
    ];

    let response = client.post(TOKEN_URL).form(&params).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    parse_token_response(status, &body)
}

/// Exchange a long-lived refresh token for a fresh access token. Used by the
/// headless snapshot path, which authenticates with client id + secret
/// instead of PKCE.
pub async fn refresh_access_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<String, ConnectError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = client.post(TOKEN_URL).form(&params).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    parse_token_response(status, &body).map(|grant| grant.access_token)
}

/// Split out of the request path so the error taxonomy is testable without a
/// live token endpoint.
pub fn parse_token_response(status: u16, body: &str) -> Result<TokenGrant, ConnectError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<TokenGrant>(body).map_err(|_| {
            ConnectError::TokenExchangeFailed {
                description: "malformed token response".to_string(),
            }
        });
    }

    let err: TokenErrorBody = serde_json::from_str(body).unwrap_or_default();
    let description = err
        .error_description
        .or(err.error)
        .unwrap_or_else(|| format!("token endpoint returned {status}"));
    Err(ConnectError::TokenExchangeFailed { description })
}
