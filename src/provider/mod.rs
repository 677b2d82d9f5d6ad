//! Provider — access to the external task-board API.
//!
//! DESIGN
//! ======
//! Handlers describe what they want as a `ProviderCall` and hand it to a
//! `TaskBoardApi`. The production implementation is `TrelloClient`; tests
//! swap in a recording mock. Responses are raw JSON documents, never
//! reshaped here.

pub mod trello;
pub mod types;

pub use trello::TrelloClient;
pub use types::{ProviderCall, ProviderError, TaskBoardApi};
