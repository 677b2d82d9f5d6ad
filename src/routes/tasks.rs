//! Task (card) pass-through routes.
//!
//! Deleting a task archives the card (`closed=true`); the provider keeps it.

use axum::Json;
use axum::extract::{Path, State};
use events::EventName;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::provider::ProviderCall;
use crate::routes::body::{LenientJson, lenient_str};
use crate::routes::error::ApiError;
use crate::services::relay;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskBody {
    #[serde(rename = "listId", deserialize_with = "lenient_str")]
    pub list_id: Option<String>,
    #[serde(deserialize_with = "lenient_str")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_str")]
    pub desc: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskBody {
    #[serde(deserialize_with = "lenient_str")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_str")]
    pub desc: Option<String>,
    #[serde(rename = "idList", deserialize_with = "lenient_str")]
    pub id_list: Option<String>,
}

/// `GET /api/tasks/list/:list_id` — cards in a list.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let cards = state
        .provider
        .call(ProviderCall::ListCards { list_id })
        .await
        .map_err(ApiError::provider("Failed to fetch tasks"))?;
    Ok(Json(cards))
}

/// `POST /api/tasks` — create a card, then broadcast `taskCreated`.
pub async fn create_task(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateTaskBody>,
) -> Result<Json<Value>, ApiError> {
    let card = state
        .provider
        .call(ProviderCall::CreateCard { list_id: body.list_id, name: body.name, desc: body.desc })
        .await
        .map_err(ApiError::provider("Failed to create task"))?;

    relay::emit(&state, EventName::TaskCreated, card.clone()).await;
    Ok(Json(card))
}

/// `PUT /api/tasks/:card_id` — update a card, then broadcast `taskUpdated`.
pub async fn update_task(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    LenientJson(body): LenientJson<UpdateTaskBody>,
) -> Result<Json<Value>, ApiError> {
    let card = state
        .provider
        .call(ProviderCall::UpdateCard { card_id, name: body.name, desc: body.desc, id_list: body.id_list })
        .await
        .map_err(ApiError::provider("Failed to update task"))?;

    relay::emit(&state, EventName::TaskUpdated, card.clone()).await;
    Ok(Json(card))
}

/// `DELETE /api/tasks/:card_id` — archive a card, then broadcast `taskDeleted`.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let card = state
        .provider
        .call(ProviderCall::CloseCard { card_id: card_id.clone() })
        .await
        .map_err(ApiError::provider("Failed to delete task"))?;

    relay::emit(&state, EventName::TaskDeleted, json!({ "cardId": card_id })).await;
    Ok(Json(card))
}
