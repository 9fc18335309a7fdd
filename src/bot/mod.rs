//! Session layer for the Telegram connection.
//!
//! This module is split into several submodules:
//! - `message_handler`: classifies incoming messages and dispatches them
//! - `callback_handler`: classifies inline-button callbacks and dispatches them
//! - `markup`: converts core keyboard layouts into Telegram markup types
//! - `deliver`: executes outbound actions against the Telegram API
//!
//! Everything transport-specific lives here; the routing and navigation core
//! never touches a Telegram type.

pub mod callback_handler;
pub mod deliver;
pub mod markup;
pub mod message_handler;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

use crate::catalog::Catalog;
use crate::router::Router;

/// Shared application state: built once at startup, read-only afterwards, so
/// it is shared across all chat tasks without locking.
pub struct AppState {
    pub catalog: Catalog,
    pub router: Router,
}
