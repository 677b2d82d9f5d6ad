//! Real-time channel subscription for the `watch` view.
//!
//! `subscribe` connects to the relay's `/ws` endpoint and spawns a reader
//! task that decodes each text frame and forwards it into the caller's
//! sink. The returned handle owns that task; cancelling or dropping it
//! closes the connection and stops delivery.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use events::RelayEvent;

use crate::CliError;

/// Active subscription. Aborts the reader task when cancelled or dropped.
#[derive(Debug)]
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Connect to `ws_url` and forward decoded events into `sink`.
///
/// The connection is established before returning so connect failures
/// surface to the caller. Frames that fail to decode are skipped.
pub async fn subscribe(ws_url: &str, sink: mpsc::Sender<RelayEvent>) -> Result<SubscriptionHandle, CliError> {
    let (mut stream, _) = connect_async(ws_url)
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;

    let task = tokio::spawn(async move {
        while let Some(message) = stream.next().await {
            let text = match message {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => continue,
            };
            match events::decode_event(&text) {
                Ok(event) => {
                    if sink.send(event).await.is_err() {
                        break;
                    }
                }
                Err(error) => eprintln!("skipping undecodable event: {error}"),
            }
        }
    });

    Ok(SubscriptionHandle { task })
}

/// Map the relay's HTTP base URL to its websocket endpoint.
pub fn ws_url(base_url: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

#[cfg(test)]
#[path = "subscriber_test.rs"]
mod tests;
