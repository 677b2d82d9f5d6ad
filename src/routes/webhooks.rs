//! Provider webhook registration routes.
//!
//! These manage the webhooks that point the provider at `/webhook`. Nothing
//! here broadcasts.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::provider::ProviderCall;
use crate::routes::body::{LenientJson, lenient_str};
use crate::routes::error::ApiError;
use crate::state::AppState;

pub const CALLBACK_URL_REQUIRED: &str = "callbackURL is required (e.g., https://your-ngrok-url.ngrok.io/webhook)";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateWebhookBody {
    #[serde(rename = "boardId", deserialize_with = "lenient_str")]
    pub board_id: Option<String>,
    #[serde(rename = "callbackURL", deserialize_with = "lenient_str")]
    pub callback_url: Option<String>,
}

/// `POST /api/webhooks/create` — register a webhook for a board.
pub async fn create_webhook(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateWebhookBody>,
) -> Result<Json<Value>, ApiError> {
    let Some(callback_url) = body.callback_url.filter(|url| !url.is_empty()) else {
        return Err(ApiError::Validation(CALLBACK_URL_REQUIRED));
    };

    let webhook = state
        .provider
        .call(ProviderCall::CreateWebhook { board_id: body.board_id, callback_url: callback_url.clone() })
        .await
        .map_err(ApiError::provider("Failed to create webhook"))?;

    info!(%callback_url, "webhook registered");
    Ok(Json(json!({
        "success": true,
        "webhook": webhook,
        "message": format!("Webhook registered successfully. Trello will now send events to: {callback_url}"),
    })))
}

/// `GET /api/webhooks/list` — webhooks registered under the relay's token.
pub async fn list_webhooks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let webhooks = state
        .provider
        .call(ProviderCall::ListWebhooks)
        .await
        .map_err(ApiError::provider("Failed to list webhooks"))?;
    Ok(Json(webhooks))
}

/// `DELETE /api/webhooks/:webhook_id` — remove a webhook.
pub async fn delete_webhook(
    State(state): State<AppState>,
    Path(webhook_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .provider
        .call(ProviderCall::DeleteWebhook { webhook_id })
        .await
        .map_err(ApiError::provider("Failed to delete webhook"))?;
    Ok(Json(json!({ "success": true, "message": "Webhook deleted" })))
}
