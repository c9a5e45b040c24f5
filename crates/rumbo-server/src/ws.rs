//! WebSocket handler for the push channel.
//!
//! Clients connect to `GET /ws` and immediately receive a full snapshot
//! (stats plus recent reports), then every broadcast the hub delivers.
//! Each connection runs two tasks: an outbound forwarder draining the
//! subscriber's payload queue into the socket, and the inbound read loop
//! below dispatching the recognized client messages.
//!
//! A connection closes on client disconnect, a write failure, or a
//! malformed (unparseable) inbound frame. Valid JSON with an unrecognized
//! `type` is logged and ignored; the connection stays open.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use rumbo_types::ClientMessage;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket push-channel subscription.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Drive one subscriber connection from handshake to close.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let id = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Registration sends the initial snapshot through `tx`.
    state.hub.add_subscriber(id, tx).await;

    // Outbound half: forward hub payloads to the socket. Ends when the
    // hub drops this subscriber or the socket write fails.
    let outbound = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sink.send(Message::Text(payload.into())).await.is_err() {
                debug!(subscriber = %id, "socket write failed");
                break;
            }
        }
    });

    // Inbound half: dispatch client messages until the connection ends.
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
                    debug!(subscriber = %id, "malformed frame; closing");
                    break;
                };
                match serde_json::from_value::<ClientMessage>(value)
                    .unwrap_or(ClientMessage::Unknown)
                {
                    ClientMessage::Ping => {
                        // Keep-alive only; no reply payload required.
                        debug!(subscriber = %id, "ping received");
                    }
                    ClientMessage::RequestStats => state.hub.broadcast_stats(),
                    ClientMessage::Unknown => {
                        debug!(subscriber = %id, "unrecognized message; ignoring");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Binary frames and protocol ping/pong need no handling.
            }
            Err(e) => {
                debug!(subscriber = %id, "socket read error: {e}");
                break;
            }
        }
    }

    state.hub.remove_subscriber(id);
    outbound.abort();
    debug!(subscriber = %id, "connection closed");
}
