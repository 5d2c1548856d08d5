//! Backend Module
//!
//! This module contains all server-side code for the XFPad service: the
//! TCP listener, the per-connection tasks, the single-task dispatcher, the
//! versioned document model, and the session registry.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - configuration, shared state, listener and assembly
//! - **`connection`** - per-connection reader and writer tasks
//! - **`dispatch`** - the request queue, the dispatcher, and the handlers
//! - **`document`** - versioned documents and their merge rules
//! - **`session`** - online users, colors, connection bindings, writers
//! - **`error`** - fatal server error types
//!
//! # Data Flow
//!
//! ```text
//! accept -> reader task -> request queue -> dispatcher
//!        -> (document + registry mutation) -> response
//!        -> broadcast to every connection writer -> clients
//! ```
//!
//! Requests are serialized through one queue and one dispatcher task, so
//! every client observes the same total order of responses.

pub mod connection;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod server;
pub mod session;
