//! Broadcast glue shared by mutation handlers and webhook ingress.

use events::{EventName, RelayEvent};
use serde_json::Value;
use tracing::info;

use crate::state::AppState;

/// Build an event and push it to every connected channel.
pub async fn emit(state: &AppState, name: EventName, payload: Value) -> usize {
    publish(state, &RelayEvent::new(name, payload)).await
}

/// Push an already-built event to every connected channel.
pub async fn publish(state: &AppState, event: &RelayEvent) -> usize {
    let receivers = state.channels.broadcast(event).await;
    info!(event = %event.event, receivers, "relay: broadcast");
    receivers
}
