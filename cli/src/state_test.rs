use super::*;
use serde_json::json;

fn state_with(cards: Vec<Value>) -> TaskListState {
    TaskListState::new("L1", cards)
}

#[test]
fn from_response_accepts_array_only() {
    let state = TaskListState::from_response("L1", json!([{ "id": "C1" }]));
    assert_eq!(state.cards, vec![json!({ "id": "C1" })]);

    let state = TaskListState::from_response("L1", json!({ "error": "nope" }));
    assert!(state.cards.is_empty());
}

#[test]
fn task_created_for_active_list_appends() {
    let mut state = state_with(vec![json!({ "id": "C1", "idList": "L1" })]);
    let card = json!({ "id": "C2", "idList": "L1", "name": "Buy milk" });

    assert!(state.apply(&RelayEvent::new(EventName::TaskCreated, card.clone())));
    assert_eq!(state.cards.len(), 2);
    assert_eq!(state.cards[1], card);
}

#[test]
fn task_created_for_other_list_is_ignored() {
    let mut state = state_with(Vec::new());
    let changed = state.apply(&RelayEvent::new(EventName::TaskCreated, json!({ "id": "C2", "idList": "L2" })));
    assert!(!changed);
    assert!(state.cards.is_empty());
}

#[test]
fn double_delivery_appends_twice() {
    let mut state = state_with(Vec::new());
    let event = RelayEvent::new(EventName::TaskCreated, json!({ "id": "C1", "idList": "L1" }));

    assert!(state.apply(&event));
    assert!(state.apply(&event));
    assert_eq!(state.cards.len(), 2);
}

#[test]
fn task_updated_replaces_matching_card() {
    let mut state = state_with(vec![
        json!({ "id": "C1", "name": "old" }),
        json!({ "id": "C2", "name": "keep" }),
    ]);
    let updated = json!({ "id": "C1", "name": "new", "idList": "L1" });

    assert!(state.apply(&RelayEvent::new(EventName::TaskUpdated, updated.clone())));
    assert_eq!(state.cards[0], updated);
    assert_eq!(state.cards[1], json!({ "id": "C2", "name": "keep" }));
}

#[test]
fn task_updated_for_unknown_card_is_noop() {
    let mut state = state_with(vec![json!({ "id": "C1" })]);
    assert!(!state.apply(&RelayEvent::new(EventName::TaskUpdated, json!({ "id": "C9" }))));
    assert_eq!(state.cards, vec![json!({ "id": "C1" })]);
}

#[test]
fn task_deleted_removes_by_card_id() {
    let mut state = state_with(vec![json!({ "id": "C1" }), json!({ "id": "C9" })]);

    assert!(state.apply(&RelayEvent::new(EventName::TaskDeleted, json!({ "cardId": "C9" }))));
    assert_eq!(state.cards, vec![json!({ "id": "C1" })]);

    assert!(!state.apply(&RelayEvent::new(EventName::TaskDeleted, json!({ "cardId": "C9" }))));
}

#[test]
fn board_and_raw_events_are_ignored() {
    let mut state = state_with(vec![json!({ "id": "C1" })]);
    assert!(!state.apply(&RelayEvent::new(EventName::BoardCreated, json!({ "id": "B1" }))));
    assert!(!state.apply(&RelayEvent::new(EventName::BoardDeleted, json!({ "boardId": "B1" }))));
    assert!(!state.apply(&RelayEvent::new(
        EventName::TrelloUpdate,
        json!({ "action": { "type": "deleteCard", "data": { "card": { "id": "C1" } } } })
    )));
    assert_eq!(state.cards.len(), 1);
}
