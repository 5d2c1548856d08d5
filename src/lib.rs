//! XFPad - Main Library
//!
//! XFPad is a collaborative plain-text editing service: several people
//! edit the same document at once over plain TCP, with live propagation of
//! every insertion and deletion, per-user colors, and an in-document chat.
//!
//! # Overview
//!
//! This library provides the whole server core:
//!
//! - A versioned document model that rebases edits made against stale
//!   snapshots so concurrent editors converge
//! - A session registry mapping connections to users and users to colors
//! - A single-task dispatch pipeline that serializes every mutation and
//!   broadcasts each response to every connected client
//! - The line-oriented wire protocol the clients speak
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared with anything speaking the wire protocol
//!   - Request grammar and response builders
//!   - Value escaping and the TAB transport encoding
//!   - The user color palette
//!
//! - **`backend`** - The server
//!   - Listener, per-connection tasks, and the dispatcher
//!   - The versioned document model and its merge rules
//!   - The session registry
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfpad::backend::server::{self, ServerConfig};
//!
//! # async fn example() -> Result<(), xfpad::backend::error::ServerError> {
//! server::run(ServerConfig::default()).await
//! # }
//! ```
//!
//! State is in-memory and process-lifetime: nothing persists across a
//! restart.

pub mod backend;
pub mod shared;
