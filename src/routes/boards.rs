//! Board pass-through routes.

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
pub struct CreateBoardBody {
    #[serde(deserialize_with = "lenient_str")]
    pub name: Option<String>,
    #[serde(rename = "defaultLists")]
    pub default_lists: Option<Value>,
}

/// `GET /api/boards` — list the member's boards.
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let boards = state
        .provider
        .call(ProviderCall::ListBoards)
        .await
        .map_err(ApiError::provider("Failed to fetch boards"))?;
    Ok(Json(boards))
}

/// `POST /api/boards` — create a board, then broadcast `boardCreated`.
pub async fn create_board(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateBoardBody>,
) -> Result<Json<Value>, ApiError> {
    let board = state
        .provider
        .call(ProviderCall::CreateBoard { name: body.name, default_lists: body.default_lists })
        .await
        .map_err(ApiError::provider("Failed to create board"))?;

    relay::emit(&state, EventName::BoardCreated, board.clone()).await;
    Ok(Json(board))
}

/// `DELETE /api/boards/:board_id` — remove a board, then broadcast `boardDeleted`.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .provider
        .call(ProviderCall::DeleteBoard { board_id: board_id.clone() })
        .await
        .map_err(ApiError::provider("Failed to delete board"))?;

    relay::emit(&state, EventName::BoardDeleted, json!({ "boardId": board_id })).await;
    Ok(Json(json!({ "success": true, "boardId": board_id })))
}

/// `GET /api/boards/:board_id/lists` — lists on a board.
pub async fn list_lists(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let lists = state
        .provider
        .call(ProviderCall::ListLists { board_id })
        .await
        .map_err(ApiError::provider("Failed to fetch lists"))?;
    Ok(Json(lists))
}
