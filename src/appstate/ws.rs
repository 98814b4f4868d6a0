//! WebSocket endpoint streaming app-state changes to clients.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::gate::{RootScreen, resolve};

use super::model::AppStateEvent;
use super::store::AppStateStore;

/// Messages sent to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Full state, sent on connect and after a lag.
    Sync {
        onboarded: bool,
        loading: bool,
        screen: Option<RootScreen>,
    },
    /// A single state-change event.
    Event { event: AppStateEvent },
}

/// Build the Axum router for the app-state event stream.
pub fn event_routes(store: Arc<AppStateStore>) -> Router {
    Router::new()
        .route("/ws/app-state", get(ws_handler))
        .with_state(store)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(store): State<Arc<AppStateStore>>,
) -> impl IntoResponse {
    info!("WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, store))
}

async fn handle_socket(mut socket: WebSocket, store: Arc<AppStateStore>) {
    info!("WebSocket client connected");

    // Subscribe before the sync snapshot so no change lands between the two
    let mut rx = store.subscribe();

    if socket_sync(&mut socket, &store).await.is_err() {
        warn!("Failed to send initial sync, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            // Forward state events to this client
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let msg = WsMessage::Event { event };
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind state events");
                        // Re-sync from a fresh snapshot
                        if socket_sync(&mut socket, &store).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            // This stream is push-only; client frames only matter for liveness
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Send the current state as a [`WsMessage::Sync`] frame.
async fn socket_sync(socket: &mut WebSocket, store: &AppStateStore) -> Result<(), axum::Error> {
    let snapshot = store.snapshot().await;
    let msg = WsMessage::Sync {
        onboarded: snapshot.onboarded,
        loading: snapshot.loading,
        screen: resolve(&snapshot),
    };
    match serde_json::to_string(&msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            warn!("Failed to serialize sync message: {}", e);
            Ok(())
        }
    }
}
