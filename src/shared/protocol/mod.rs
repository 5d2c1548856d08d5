//! Wire Protocol
//!
//! The line-oriented protocol the server and its clients speak: one request
//! or response per `\n`-terminated UTF-8 line, fields delimited with `&` and
//! split on `=`, values backslash-escaped.
//!
//! # Module Structure
//!
//! - [`escape`] - value escaping and the TAB transport encoding
//! - [`request`] - the request grammar and parser
//! - [`response`] - one builder per response kind

pub mod escape;
pub mod request;
pub mod response;

pub use request::{Request, RequestKind};
