//! Application State Management
//!
//! The server's entire mutable state: the session registry and the document
//! collection. One `Mutex` guards the whole record.
//!
//! # Thread Safety
//!
//! Three kinds of task touch this state: the listener (registering a fresh
//! connection's writer), reader tasks (tearing a connection down on EOF),
//! and the dispatcher (every request mutation plus the broadcast iteration).
//! All of them take the one lock, and nothing async happens while it is
//! held, so no task ever observes a half-applied mutation.

use std::sync::{Arc, Mutex};

use crate::backend::document::DocumentStore;
use crate::backend::session::Registry;
use crate::shared::color::Rgb;

/// Everything the server knows, behind one lock.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Online users, colors, connection bindings, connection writers.
    pub registry: Registry,
    /// The hosted documents, creation-ordered.
    pub documents: DocumentStore,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state whose registry assigns colors from the given palette.
    pub fn with_palette(palette: Vec<Rgb>) -> Self {
        Self {
            registry: Registry::with_palette(palette),
            documents: DocumentStore::new(),
        }
    }
}

/// Shared handle to the server state.
pub type SharedState = Arc<Mutex<ServerState>>;

/// Create a fresh shared state drawing colors from `palette`.
pub fn shared_state(palette: Vec<Rgb>) -> SharedState {
    Arc::new(Mutex::new(ServerState::with_palette(palette)))
}
