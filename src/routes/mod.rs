//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST pass-through routes, the provider webhook
//! endpoint and the websocket channel under a single Axum router.

pub mod boards;
pub mod body;
pub mod error;
pub mod ingress;
pub mod tasks;
pub mod webhooks;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const ROOT_BANNER: &str = "Trello relay running";

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/ws", get(ws::handle_ws))
        .route("/api/boards", get(boards::list_boards).post(boards::create_board))
        .route("/api/boards/{board_id}", delete(boards::delete_board))
        .route("/api/boards/{board_id}/lists", get(boards::list_lists))
        .route("/api/tasks", post(tasks::create_task))
        .route("/api/tasks/list/{list_id}", get(tasks::list_tasks))
        .route("/api/tasks/{card_id}", put(tasks::update_task).delete(tasks::delete_task))
        .route("/api/webhooks/create", post(webhooks::create_webhook))
        .route("/api/webhooks/list", get(webhooks::list_webhooks))
        .route("/api/webhooks/{webhook_id}", delete(webhooks::delete_webhook))
        .route(
            "/webhook",
            get(ingress::verify_get)
                .head(ingress::verify_head)
                .post(ingress::deliver),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    ROOT_BANNER
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
