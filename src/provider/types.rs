//! Provider types — call descriptions, errors, and the client seam.
//!
//! A `ProviderCall` names one resource/operation pair on the Trello REST API
//! together with its parameters. Turning it into an HTTP request (credentials,
//! base URL, transport) is the job of a `TaskBoardApi` implementation.

use reqwest::Method;
use serde_json::{Map, Value};

/// Description sent with every webhook registered through the relay.
pub const WEBHOOK_DESCRIPTION: &str = "Trello Board Webhook";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be sent or the response body could not be read.
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("provider response error: status {status}")]
    Response { status: u16, body: Option<Value> },

    /// A success response body was not JSON.
    #[error("provider response parse failed: {0}")]
    Parse(String),

    /// The request URL could not be built from the configured base URL.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ProviderError {
    /// Payload for the `details` field of an error response: the provider's
    /// error body when there is one, otherwise the error message.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Response { body: Some(body), .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// HTTP status reported by the provider, if the failure came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// CALLS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Board,
    List,
    Card,
    Webhook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Close,
    Delete,
}

/// One call against the provider API.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    ListBoards,
    CreateBoard { name: Option<String>, default_lists: Option<Value> },
    DeleteBoard { board_id: String },
    ListLists { board_id: String },
    ListCards { list_id: String },
    CreateCard { list_id: Option<String>, name: Option<String>, desc: Option<String> },
    UpdateCard { card_id: String, name: Option<String>, desc: Option<String>, id_list: Option<String> },
    /// Archive a card. Cards are never removed outright.
    CloseCard { card_id: String },
    CreateWebhook { board_id: Option<String>, callback_url: String },
    ListWebhooks,
    DeleteWebhook { webhook_id: String },
}

impl ProviderCall {
    #[must_use]
    pub fn resource(&self) -> ResourceKind {
        match self {
            Self::ListBoards | Self::CreateBoard { .. } | Self::DeleteBoard { .. } => ResourceKind::Board,
            Self::ListLists { .. } => ResourceKind::List,
            Self::ListCards { .. } | Self::CreateCard { .. } | Self::UpdateCard { .. } | Self::CloseCard { .. } => {
                ResourceKind::Card
            }
            Self::CreateWebhook { .. } | Self::ListWebhooks | Self::DeleteWebhook { .. } => ResourceKind::Webhook,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::ListBoards | Self::ListLists { .. } | Self::ListCards { .. } | Self::ListWebhooks => Operation::List,
            Self::CreateBoard { .. } | Self::CreateCard { .. } | Self::CreateWebhook { .. } => Operation::Create,
            Self::UpdateCard { .. } => Operation::Update,
            Self::CloseCard { .. } => Operation::Close,
            Self::DeleteBoard { .. } | Self::DeleteWebhook { .. } => Operation::Delete,
        }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::ListBoards | Self::ListLists { .. } | Self::ListCards { .. } | Self::ListWebhooks => Method::GET,
            Self::CreateBoard { .. } | Self::CreateCard { .. } | Self::CreateWebhook { .. } => Method::POST,
            Self::UpdateCard { .. } | Self::CloseCard { .. } => Method::PUT,
            Self::DeleteBoard { .. } | Self::DeleteWebhook { .. } => Method::DELETE,
        }
    }

    /// Path segments below the API base URL. The token appears in the path
    /// only for webhook listing.
    #[must_use]
    pub fn path_segments(&self, token: &str) -> Vec<String> {
        let segs: &[&str] = match self {
            Self::ListBoards => &["members", "me", "boards"],
            Self::CreateBoard { .. } => &["boards", ""],
            Self::DeleteBoard { board_id } => return vec!["boards".into(), board_id.clone()],
            Self::ListLists { board_id } => return vec!["boards".into(), board_id.clone(), "lists".into()],
            Self::ListCards { list_id } => return vec!["lists".into(), list_id.clone(), "cards".into()],
            Self::CreateCard { .. } => &["cards"],
            Self::UpdateCard { card_id, .. } | Self::CloseCard { card_id } => {
                return vec!["cards".into(), card_id.clone()];
            }
            Self::CreateWebhook { .. } => &["webhooks"],
            Self::ListWebhooks => return vec!["tokens".into(), token.to_string(), "webhooks".into()],
            Self::DeleteWebhook { webhook_id } => return vec!["webhooks".into(), webhook_id.clone()],
        };
        segs.iter().map(|s| (*s).to_string()).collect()
    }

    /// Call-specific query parameters (credentials are added by the client).
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::CreateCard { list_id, name, desc } => {
                let mut q = Vec::new();
                if let Some(list_id) = list_id {
                    q.push(("idList", list_id.clone()));
                }
                if let Some(name) = name {
                    q.push(("name", name.clone()));
                }
                if let Some(desc) = desc {
                    q.push(("desc", desc.clone()));
                }
                q
            }
            Self::CloseCard { .. } => vec![("closed", "true".to_string())],
            _ => Vec::new(),
        }
    }

    /// JSON request body, if the call sends one. Absent fields are omitted.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::CreateBoard { name, default_lists } => {
                let mut body = Map::new();
                if let Some(name) = name {
                    body.insert("name".into(), Value::String(name.clone()));
                }
                if let Some(default_lists) = default_lists {
                    body.insert("defaultLists".into(), default_lists.clone());
                }
                Some(Value::Object(body))
            }
            Self::UpdateCard { name, desc, id_list, .. } => {
                let mut body = Map::new();
                if let Some(name) = name {
                    body.insert("name".into(), Value::String(name.clone()));
                }
                if let Some(desc) = desc {
                    body.insert("desc".into(), Value::String(desc.clone()));
                }
                if let Some(id_list) = id_list {
                    body.insert("idList".into(), Value::String(id_list.clone()));
                }
                Some(Value::Object(body))
            }
            Self::CreateWebhook { board_id, callback_url } => {
                let mut body = Map::new();
                body.insert("description".into(), Value::String(WEBHOOK_DESCRIPTION.into()));
                body.insert("callbackURL".into(), Value::String(callback_url.clone()));
                if let Some(board_id) = board_id {
                    body.insert("idModel".into(), Value::String(board_id.clone()));
                }
                Some(Value::Object(body))
            }
            _ => None,
        }
    }

    /// Whether the `token` query parameter is attached. Webhook listing
    /// carries the token in its path instead.
    #[must_use]
    pub fn sends_token_param(&self) -> bool {
        !matches!(self, Self::ListWebhooks)
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Trait abstraction for provider access, enabling mock implementations in tests.
#[async_trait::async_trait]
pub trait TaskBoardApi: Send + Sync {
    /// Perform one provider call and return the raw response body.
    async fn call(&self, call: ProviderCall) -> Result<Value, ProviderError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
