//! Error taxonomy for the connect → fetch → render pipeline.
//!
//! Every variant is terminal for the current attempt: nothing here is retried
//! automatically. The app discards the stored access token on any of these and
//! drops into the error view; the user's only recovery is "try again".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    /// No client id configured — the connect action is blocked before any
    /// navigation happens.
    #[error("Spotify client id is not configured")]
    MissingClientId,

    /// The PKCE code verifier is gone (e.g. the process handling the callback
    /// is not the one that started the flow).
    #[error("session expired: no stored code verifier")]
    SessionExpired,

    /// The token endpoint answered with a non-success status.
    #[error("token exchange failed: {description}")]
    TokenExchangeFailed { description: String },

    /// A resource call answered with a non-2xx status.
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, refused connection, offline).
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl ConnectError {
    /// Human-readable message for the error view. Two conditions get extra
    /// guidance: accounts without Premium, and 403s from apps in development
    /// mode where the account is not on the allow list.
    pub fn user_message(&self) -> String {
        match self {
            ConnectError::MissingClientId => {
                "Spotify client id is not set. Add it to config.toml under [spotify], \
                 or export SPOTIFY_CLIENT_ID."
                    .to_string()
            }
            ConnectError::SessionExpired => {
                "Session expired. Press c to connect again.".to_string()
            }
            ConnectError::TokenExchangeFailed { description } => {
                special_case(description)
                    .unwrap_or_else(|| format!("Could not connect to Spotify: {description}"))
            }
            ConnectError::Api { status, message } => {
                if *status == 403 {
                    return "Access denied (403). Make sure the account you connected is added \
                            under User Management in your app's Spotify Dashboard, and that it \
                            has Premium. If you just changed either, wait a minute and try again."
                        .to_string();
                }
                special_case(message).unwrap_or_else(|| message.clone())
            }
            ConnectError::Network(_) => {
                "Could not reach Spotify. Check your connection and try again.".to_string()
            }
        }
    }
}

fn special_case(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    if lower.contains("premium") {
        return Some(
            "Spotify Premium required. The account you connected doesn't have Premium — \
             connect with a Premium account or upgrade at spotify.com."
                .to_string(),
        );
    }
    if message.contains("403") {
        return Some(
            "Access denied (403). Make sure the account you connected is added under \
             User Management in your app's Spotify Dashboard, and that it has Premium."
                .to_string(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_restriction_is_special_cased() {
        let err = ConnectError::Api {
            status: 400,
            message: "Premium required".to_string(),
        };
        assert!(err.user_message().contains("Premium"));
        assert!(err.user_message().contains("upgrade"));
    }

    #[test]
    fn forbidden_status_hints_at_allow_listing() {
        let err = ConnectError::Api {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert!(err.user_message().contains("User Management"));
    }

    #[test]
    fn exchange_failure_carries_description() {
        let err = ConnectError::TokenExchangeFailed {
            description: "invalid_grant".to_string(),
        };
        assert!(err.user_message().contains("invalid_grant"));
    }
}
