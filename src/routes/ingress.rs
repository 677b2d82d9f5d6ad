//! Provider webhook endpoint — verification handshake and event delivery.
//!
//! The provider probes the callback URL with HEAD (and sometimes GET) before
//! activating a webhook, then POSTs deliveries. Every path answers 200 so the
//! provider never retries or disables the webhook; problems show up only in
//! server logs.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

use crate::services::ingress;
use crate::state::AppState;

pub const VERIFIED_ACK: &str = "Webhook verified";

/// `HEAD /webhook` — verification probe.
pub async fn verify_head() -> StatusCode {
    info!("webhook: HEAD verification");
    StatusCode::OK
}

/// `GET /webhook` — verification probe; echoes `challenge` when present.
pub async fn verify_get(Query(params): Query<HashMap<String, String>>) -> String {
    info!(challenge = params.contains_key("challenge"), "webhook: GET verification");
    params
        .get("challenge")
        .filter(|c| !c.is_empty())
        .cloned()
        .unwrap_or_else(|| VERIFIED_ACK.to_string())
}

/// `POST /webhook` — event delivery. The body is parsed leniently: anything
/// that is not JSON is treated as a malformed envelope and dropped. A body
/// that cannot be read (e.g. over the default 2 MB limit) is dropped too.
pub async fn deliver(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> StatusCode {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "webhook: unreadable delivery ignored");
            return StatusCode::OK;
        }
    };
    match serde_json::from_slice::<Value>(&body) {
        Ok(envelope) => {
            ingress::deliver(&state, &envelope).await;
        }
        Err(e) => warn!(error = %e, bytes = body.len(), "webhook: unparseable delivery ignored"),
    }
    StatusCode::OK
}
