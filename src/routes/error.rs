//! HTTP error responses for the pass-through routes.
//!
//! Every provider failure collapses into a 500 with a fixed per-endpoint
//! message; the provider's own answer rides along in `details`. Not-found,
//! unauthorized and unreachable all map to the same status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use crate::provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A provider call failed.
    #[error("{message}: {source}")]
    Provider {
        message: &'static str,
        #[source]
        source: ProviderError,
    },

    /// A required request field is missing.
    #[error("{0}")]
    Validation(&'static str),
}

impl ApiError {
    /// Wrap a provider failure with the endpoint's fixed message.
    pub fn provider(message: &'static str) -> impl FnOnce(ProviderError) -> Self {
        move |source| Self::Provider { message, source }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Provider { message, source } => {
                let details = source.details();
                error!(reason = message, provider_status = ?source.status(), %details, "provider call failed");
                (status, Json(json!({ "error": message, "details": details }))).into_response()
            }
            Self::Validation(message) => {
                warn!(reason = message, "request rejected");
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
