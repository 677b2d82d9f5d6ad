//! Lenient request bodies for the mutation routes.
//!
//! The relay forwards whatever the client sends. A missing, empty or non-JSON
//! body reads as the default body, and a field of the wrong JSON type reads as
//! absent. Required-field checks stay in the handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body extractor that never rejects on content type or shape.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self(decode_lenient(&bytes)))
    }
}

/// Decode `bytes` into `T`, falling back to `T::default()`.
pub fn decode_lenient<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap_or_default()
}

/// `deserialize_with` helper: strings pass through, any other JSON value is `None`.
pub fn lenient_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
#[path = "body_test.rs"]
mod tests;
