//! Local view of one task list, kept current from relay events.
//!
//! Events are applied as they arrive with no deduplication: a card created
//! through the relay and echoed back by the provider webhook is appended
//! twice.

use events::{EventName, RelayEvent};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskListState {
    pub list_id: String,
    pub cards: Vec<Value>,
}

impl TaskListState {
    #[must_use]
    pub fn new(list_id: impl Into<String>, cards: Vec<Value>) -> Self {
        Self { list_id: list_id.into(), cards }
    }

    /// Build from a `GET /api/tasks/list/{id}` response. Anything other than
    /// a JSON array is treated as an empty list.
    #[must_use]
    pub fn from_response(list_id: impl Into<String>, body: Value) -> Self {
        let cards = match body {
            Value::Array(cards) => cards,
            _ => Vec::new(),
        };
        Self::new(list_id, cards)
    }

    /// Apply one event. Returns whether the card list changed.
    pub fn apply(&mut self, event: &RelayEvent) -> bool {
        match event.event {
            EventName::TaskCreated => {
                if field(&event.data, "idList") != Some(self.list_id.as_str()) {
                    return false;
                }
                self.cards.push(event.data.clone());
                true
            }
            EventName::TaskUpdated => {
                let Some(id) = field(&event.data, "id") else {
                    return false;
                };
                let Some(slot) = self.cards.iter_mut().find(|card| field(card, "id") == Some(id)) else {
                    return false;
                };
                *slot = event.data.clone();
                true
            }
            EventName::TaskDeleted => {
                let Some(card_id) = field(&event.data, "cardId") else {
                    return false;
                };
                let before = self.cards.len();
                self.cards.retain(|card| field(card, "id") != Some(card_id));
                self.cards.len() != before
            }
            _ => false,
        }
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
