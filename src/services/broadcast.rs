//! Event broadcaster — registry of connected channels and fan-out.
//!
//! DESIGN
//! ======
//! Each connected channel is an `mpsc::Sender<RelayEvent>` keyed by a
//! generated id. Broadcast takes a snapshot of the senders under the read
//! lock and delivers after releasing it, so channels may register or leave
//! mid-broadcast without disturbing the iteration.
//!
//! Delivery is best-effort: a full channel is skipped and a closed one is
//! pruned from the registry. There is no acknowledgement, no per-channel
//! filtering and no replay for channels that register after an event fired.

use std::collections::HashMap;
use std::sync::Arc;

use events::RelayEvent;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, mpsc};
use tracing::debug;
use uuid::Uuid;

/// Identity of one connected channel. Carries no user or session meaning.
pub type ChannelId = Uuid;

/// Default per-channel buffer for outgoing events.
pub const CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// REGISTRY
// =============================================================================

/// The open set of connected channels. Clone shares the same set.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    channels: Arc<RwLock<HashMap<ChannelId, mpsc::Sender<RelayEvent>>>>,
}

impl ChannelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel and return its id.
    pub async fn register(&self, tx: mpsc::Sender<RelayEvent>) -> ChannelId {
        let id = Uuid::new_v4();
        self.channels.write().await.insert(id, tx);
        id
    }

    /// Remove a channel. Returns `false` if it was already gone.
    pub async fn unregister(&self, id: ChannelId) -> bool {
        self.channels.write().await.remove(&id).is_some()
    }

    /// Register a fresh channel and hand back its receiving side.
    pub async fn subscribe(&self, capacity: usize) -> Subscription {
        let (tx, rx) = mpsc::channel(capacity);
        let id = self.register(tx).await;
        Subscription { id, rx, registry: self.clone() }
    }

    /// Push `event` to every registered channel. Returns how many accepted it.
    pub async fn broadcast(&self, event: &RelayEvent) -> usize {
        let snapshot: Vec<(ChannelId, mpsc::Sender<RelayEvent>)> = {
            let channels = self.channels.read().await;
            channels.iter().map(|(id, tx)| (*id, tx.clone())).collect()
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, tx) in snapshot {
            match tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(channel_id = %id, event = %event.event, "broadcast: channel full, skipped");
                }
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        // Receivers dropped without `cancel` leave a closed sender behind.
        if !closed.is_empty() {
            let mut channels = self.channels.write().await;
            for id in &closed {
                channels.remove(id);
            }
            debug!(pruned = closed.len(), "broadcast: closed channels removed");
        }
        delivered
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.channels.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.channels.read().await.is_empty()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// A registered channel plus its receiver. `cancel` is the unsubscribe.
pub struct Subscription {
    id: ChannelId,
    rx: mpsc::Receiver<RelayEvent>,
    registry: ChannelRegistry,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Next event, or `None` once the channel has been unregistered and drained.
    pub async fn recv(&mut self) -> Option<RelayEvent> {
        self.rx.recv().await
    }

    /// Unregister the channel from the broadcaster.
    pub async fn cancel(self) {
        self.registry.unregister(self.id).await;
    }
}

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod tests;
