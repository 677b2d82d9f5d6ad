//! Domain services used by HTTP and websocket routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own fan-out and event normalization so route handlers can
//! stay focused on protocol translation.

pub mod broadcast;
pub mod ingress;
pub mod relay;
