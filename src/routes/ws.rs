//! WebSocket handler — one real-time channel per connection.
//!
//! DESIGN
//! ======
//! On upgrade the connection subscribes to the channel registry and enters a
//! `select!` loop:
//! - Events from the broadcaster → JSON text frame to the client
//! - Incoming client messages → ignored, except close
//!
//! Clients never publish through the channel; mutations go through the REST
//! routes, which broadcast on success.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → subscribe (registered with the broadcaster)
//! 2. Broadcast events are forwarded until the socket closes or a send fails
//! 3. Close → cancel subscription (unregistered)

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use events::RelayEvent;
use tracing::{info, warn};

use crate::services::broadcast::CHANNEL_CAPACITY;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let mut subscription = state.channels.subscribe(CHANNEL_CAPACITY).await;
    let channel_id = subscription.id();
    info!(%channel_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                if matches!(msg, Message::Close(_)) {
                    break;
                }
            }
            Some(event) = subscription.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    subscription.cancel().await;
    info!(%channel_id, "ws: client disconnected");
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_event(socket: &mut WebSocket, event: &RelayEvent) -> Result<(), axum::Error> {
    let text = events::encode_event(event);
    socket.send(Message::Text(text.into())).await.inspect_err(|e| {
        warn!(event = %event.event, error = %e, "ws: send failed");
    })
}
