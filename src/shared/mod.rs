//! Shared Module
//!
//! This module contains the types that are shared between the server and
//! anything that speaks its wire protocol. A client links the same grammar,
//! escaping rules, and color palette, so they live apart from the backend.
//!
//! # Overview
//!
//! - [`protocol`] - the line-oriented request/response grammar
//! - [`color`] - the user color palette and its wire form
//! - [`error`] - protocol-level error types

pub mod color;
pub mod error;
pub mod protocol;

/// Re-export commonly used types for convenience
pub use color::{Rgb, PALETTE};
pub use error::ProtocolError;
pub use protocol::{Request, RequestKind};
