//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the provider client and the channel registry. Both are built
//! once at startup from an explicit `RelayConfig`; nothing is global.

use std::sync::Arc;

use crate::provider::TaskBoardApi;
use crate::services::broadcast::ChannelRegistry;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TaskBoardApi>,
    pub channels: ChannelRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn TaskBoardApi>) -> Self {
        Self { provider, channels: ChannelRegistry::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
