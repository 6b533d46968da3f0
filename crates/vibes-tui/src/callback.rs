//! Loopback HTTP server for the OAuth redirect.
//!
//! Spotify sends the browser back to `http://127.0.0.1:{port}/callback` with
//! either `?code=…` or `?error=…` in the query string. The server forwards
//! whichever arrived over an mpsc channel and shows the user a plain page
//! telling them to close the tab.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

/// What the redirect carried, or why the listener is not running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEvent {
    /// Authorization code, ready for the token exchange.
    Code(String),
    /// The user denied access (or Spotify reported an error).
    Denied(String),
    /// The listener could not start (or died). Without it the redirect can
    /// never land, so the connect attempt is dead.
    ServerFailed(String),
}

#[derive(Clone)]
struct CallbackState {
    event_tx: mpsc::Sender<CallbackEvent>,
}

pub fn start_server(
    bind_address: String,
    port: u16,
    event_tx: mpsc::Sender<CallbackEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = Router::new()
            .route("/callback", get(handle_callback))
            .with_state(CallbackState {
                event_tx: event_tx.clone(),
            });

        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind callback server to {}: {}", addr, e);
                let _ = event_tx
                    .send(CallbackEvent::ServerFailed(format!(
                        "could not listen on {addr}: {e}"
                    )))
                    .await;
                return;
            }
        };

        info!("OAuth callback server listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Callback server error: {}", e);
            let _ = event_tx
                .send(CallbackEvent::ServerFailed(e.to_string()))
                .await;
        }
    })
}

async fn handle_callback(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    let event = if let Some(code) = params.get("code") {
        CallbackEvent::Code(code.clone())
    } else {
        let reason = params
            .get("error")
            .cloned()
            .unwrap_or_else(|| "access_denied".to_string());
        CallbackEvent::Denied(reason)
    };

    let denied = matches!(event, CallbackEvent::Denied(_));
    if state.event_tx.send(event).await.is_err() {
        error!("Failed to forward callback event");
    }

    if denied {
        Html("<html><body><p>Authorization was denied. You can close this tab.</p></body></html>")
    } else {
        Html("<html><body><p>Connected! You can close this tab and return to the terminal.</p></body></html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_failure_is_reported_not_swallowed() {
        // Occupy a port, then try to start the listener on it. The app must
        // hear about the failure so it can leave the loading view.
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let (tx, mut rx) = mpsc::channel(8);
        start_server("127.0.0.1".to_string(), port, tx);

        match rx.recv().await {
            Some(CallbackEvent::ServerFailed(msg)) => {
                assert!(msg.contains(&port.to_string()));
            }
            other => panic!("expected ServerFailed, got {other:?}"),
        }
    }
}
