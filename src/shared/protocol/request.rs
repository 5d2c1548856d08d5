//! Request Grammar
//!
//! One request per line:
//!
//! ```text
//! <KIND>&key1=val1&key2=val2& ... &
//! ```
//!
//! The leading token before the first unescaped `&` is the request kind; the
//! remaining tokens split on the first unescaped `=` into key/value pairs,
//! with values unescaped per [`super::escape`]. Empty tokens (including the
//! one produced by the conventional trailing `&`) are ignored.
//!
//! Unknown kinds parse to [`RequestKind::Invalid`] rather than failing, so a
//! misbehaving client is answered instead of dropped. The connection id is
//! attached by the reader task when the line is queued, not here.

use std::collections::HashMap;

use crate::shared::error::ProtocolError;
use crate::shared::protocol::escape::unescape;

/// The kind token of a parsed request.
///
/// Several kinds historically had two spellings on the wire; both are
/// accepted (`CHANGEDOC` for `CHANGE`, `CORRECTERROR` for `CORRECT_ERROR`,
/// `CHATMESSAGE` for `CHAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    NewDoc,
    OpenDoc,
    Change,
    ExitDoc,
    Logout,
    CorrectError,
    Chat,
    /// Anything that is not a recognized kind.
    Invalid,
}

impl RequestKind {
    fn from_token(token: &str) -> Self {
        match token {
            "LOGIN" => Self::Login,
            "NEWDOC" => Self::NewDoc,
            "OPENDOC" => Self::OpenDoc,
            "CHANGE" | "CHANGEDOC" => Self::Change,
            "EXITDOC" => Self::ExitDoc,
            "LOGOUT" => Self::Logout,
            "CORRECT_ERROR" | "CORRECTERROR" => Self::CorrectError,
            "CHAT" | "CHATMESSAGE" => Self::Chat,
            _ => Self::Invalid,
        }
    }
}

/// A parsed request: kind plus named fields, values already unescaped.
#[derive(Debug, Clone)]
pub struct Request {
    pub kind: RequestKind,
    fields: HashMap<String, String>,
}

impl Request {
    /// Parse one wire line.
    ///
    /// Returns an error only for a malformed field set (a non-empty token
    /// with no unescaped `=`); an unrecognized kind still parses, with
    /// [`RequestKind::Invalid`].
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut tokens = split_unescaped(line, '&').into_iter();
        let kind_token = tokens.next().unwrap_or_default();
        let kind = RequestKind::from_token(&kind_token);

        let mut fields = HashMap::new();
        for token in tokens {
            if token.is_empty() {
                continue;
            }
            let (key, value) = split_field(&token)?;
            fields.insert(key, value);
        }
        Ok(Self { kind, fields })
    }

    /// Look up a field, failing with a typed error when absent.
    pub fn field(&self, key: &str) -> Result<&str, ProtocolError> {
        self.fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ProtocolError::missing_field(key))
    }

    /// Look up a field and parse it as a non-negative integer.
    pub fn numeric_field(&self, key: &str) -> Result<usize, ProtocolError> {
        let raw = self.field(key)?;
        raw.parse::<usize>()
            .map_err(|_| ProtocolError::malformed_field(key, raw))
    }
}

/// Split on the first unescaped `=`, unescaping the value.
fn split_field(token: &str) -> Result<(String, String), ProtocolError> {
    let mut escaped = false;
    for (index, ch) in token.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' => {
                let key = token[..index].to_string();
                let value = unescape(&token[index + 1..]);
                return Ok((key, value));
            }
            _ => {}
        }
    }
    Err(ProtocolError::malformed_line(token))
}

/// Split `input` on every unescaped occurrence of `delimiter`, keeping
/// escape sequences intact inside each token.
fn split_unescaped(input: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in input.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        if ch == '\\' {
            current.push(ch);
            escaped = true;
        } else if ch == delimiter {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    tokens.push(current);
    tokens
}
