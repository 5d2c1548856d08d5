//! Shared Error Types
//!
//! This module defines the protocol-level error type shared between the
//! server and anything that speaks the wire grammar. Every variant describes
//! a request the server cannot act on; the dispatcher collapses all of them
//! into the single `Invalid request` reply, keeping the connection open.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can cross task boundaries freely.

use thiserror::Error;

/// A request that cannot be parsed or answered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A non-empty field token with no key/value separator.
    #[error("malformed token '{token}'")]
    MalformedLine {
        /// The offending token, escapes still intact.
        token: String,
    },

    /// A required field was absent from the request.
    #[error("missing field '{field}'")]
    MissingField {
        /// The field the handler needed.
        field: String,
    },

    /// A field was present but not parseable as its expected type.
    #[error("malformed field '{field}': '{value}'")]
    MalformedField {
        /// The field name.
        field: String,
        /// The raw value received.
        value: String,
    },

    /// The named document does not exist on this server.
    #[error("unknown document '{name}'")]
    UnknownDocument {
        /// The requested document name.
        name: String,
    },

    /// The acting user has no live session state (no assigned color).
    #[error("user '{name}' is not logged in")]
    NotLoggedIn {
        /// The user name the request claimed.
        name: String,
    },

    /// The `type` field of a CHANGE was neither insertion nor deletion.
    #[error("unknown change type '{value}'")]
    UnknownChangeType {
        /// The raw `type` value.
        value: String,
    },
}

impl ProtocolError {
    pub fn malformed_line(token: impl Into<String>) -> Self {
        Self::MalformedLine {
            token: token.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn malformed_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedField {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn unknown_document(name: impl Into<String>) -> Self {
        Self::UnknownDocument { name: name.into() }
    }

    pub fn not_logged_in(name: impl Into<String>) -> Self {
        Self::NotLoggedIn { name: name.into() }
    }

    pub fn unknown_change_type(value: impl Into<String>) -> Self {
        Self::UnknownChangeType {
            value: value.into(),
        }
    }
}
