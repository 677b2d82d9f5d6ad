//! Shared event model for the relay's real-time channel.
//!
//! This crate owns the wire representation used by both the relay server and
//! the `relay-cli` subscriber. Every channel message is one JSON text frame:
//!
//! ```json
//! { "event": "taskCreated", "data": { "id": "C1", "idList": "L1" } }
//! ```
//!
//! Payloads stay flexible (`serde_json::Value`) because they are provider
//! documents passed through unmodified. Events carry no id, sequence number
//! or timestamp; ordering is delivery order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not a JSON event envelope.
    #[error("failed to decode event: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Named events pushed to every connected channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    BoardCreated,
    BoardDeleted,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    /// Raw provider webhook envelope, sent for every delivery.
    TrelloUpdate,
}

impl EventName {
    /// Wire name, e.g. `"taskCreated"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoardCreated => "boardCreated",
            Self::BoardDeleted => "boardDeleted",
            Self::TaskCreated => "taskCreated",
            Self::TaskUpdated => "taskUpdated",
            Self::TaskDeleted => "taskDeleted",
            Self::TrelloUpdate => "trelloUpdate",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(eventName, payload)` pair on the channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelayEvent {
    pub event: EventName,
    #[serde(default)]
    pub data: Value,
}

impl RelayEvent {
    #[must_use]
    pub fn new(event: EventName, data: Value) -> Self {
        Self { event, data }
    }
}

/// Encode an event as a JSON text frame.
#[must_use]
pub fn encode_event(event: &RelayEvent) -> String {
    // Serializing a `Value` with string keys cannot fail.
    serde_json::to_string(event).unwrap_or_default()
}

/// Decode a JSON text frame into an event.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or unknown event names.
pub fn decode_event(text: &str) -> Result<RelayEvent, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
