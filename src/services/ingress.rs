//! Webhook ingress — provider event normalization.
//!
//! DESIGN
//! ======
//! A delivery is an envelope `{ "action": { "type": ..., "data": {...} }, ... }`.
//! The action type is mapped through a fixed table to at most one internal
//! event; the whole envelope is then always sent as `trelloUpdate`.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. A body without an `action` yields no events.
//! A recognized type whose sub-document is missing yields only the raw
//! event. The HTTP layer answers 200 either way.

use events::{EventName, RelayEvent};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::services::relay;
use crate::state::AppState;

/// Which part of `action.data` becomes the mapped event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extract {
    Card,
    CardId,
    Board,
}

/// Fixed provider action type → internal event table.
fn lookup(action_type: &str) -> Option<(EventName, Extract)> {
    match action_type {
        "createCard" => Some((EventName::TaskCreated, Extract::Card)),
        "updateCard" => Some((EventName::TaskUpdated, Extract::Card)),
        "deleteCard" => Some((EventName::TaskDeleted, Extract::CardId)),
        "createBoard" => Some((EventName::BoardCreated, Extract::Board)),
        _ => None,
    }
}

fn extract(data: Option<&Value>, how: Extract) -> Option<Value> {
    let data = data?;
    match how {
        Extract::Card => data.get("card").cloned(),
        Extract::Board => data.get("board").cloned(),
        Extract::CardId => {
            let id = data.get("card")?.get("id")?;
            Some(json!({ "cardId": id }))
        }
    }
}

/// Map one webhook envelope to the events it produces, in broadcast order.
///
/// Returns an empty list when the envelope has no `action`. An `action` that
/// is not an object has no type, so it yields only the raw event.
#[must_use]
pub fn normalize(envelope: &Value) -> Vec<RelayEvent> {
    let Some(action) = envelope.get("action").filter(|a| !a.is_null()) else {
        return Vec::new();
    };

    let action_type = action.get("type").and_then(Value::as_str).unwrap_or("");
    let mut out = Vec::with_capacity(2);

    if let Some((name, how)) = lookup(action_type) {
        match extract(action.get("data"), how) {
            Some(payload) => out.push(RelayEvent::new(name, payload)),
            None => warn!(action_type, event = %name, "webhook: recognized action without payload"),
        }
    }

    out.push(RelayEvent::new(EventName::TrelloUpdate, envelope.clone()));
    out
}

/// Normalize a delivery and broadcast the result. Returns the events sent.
pub async fn deliver(state: &AppState, envelope: &Value) -> Vec<RelayEvent> {
    let events = normalize(envelope);
    if events.is_empty() {
        warn!("webhook: delivery without action ignored");
        return events;
    }

    let action_type = envelope
        .get("action")
        .and_then(|a| a.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("-");
    info!(action_type, events = events.len(), "webhook: delivery received");

    for event in &events {
        relay::publish(state, event).await;
    }
    events
}

#[cfg(test)]
#[path = "ingress_test.rs"]
mod tests;
