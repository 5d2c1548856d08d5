//! Wire Value Escaping
//!
//! Field values on the wire may contain any text, including the `&` and `=`
//! delimiters of the request grammar and embedded newlines. This module
//! implements the backslash escaping that keeps payloads from colliding with
//! the framing, plus the TAB transport encoding used for document text.
//!
//! # Escaping Rules
//!
//! - `\` becomes `\\`
//! - `&` becomes `\&`
//! - `=` becomes `\=`
//! - newline becomes `\n` (a literal backslash followed by `n`)
//!
//! `unescape` is the exact inverse. An unrecognized escape `\x` yields the
//! bare `x`; a lone trailing backslash is kept literally so unescaping never
//! fails.
//!
//! # TAB Transport Encoding
//!
//! Responses carrying whole document text (and chat logs) additionally render
//! every `\n` as a single TAB character so the payload survives line framing.
//! The editing client guarantees the user cannot type a literal TAB, so the
//! substitution is unambiguous.

/// Escape a field value for the wire.
///
/// The result contains no unescaped `&`, `=`, or newline, so it can be
/// embedded in a framed request or response without breaking tokenization.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '&' => out.push_str("\\&"),
            '=' => out.push_str("\\="),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Invert [`escape`].
///
/// Total over arbitrary input: unknown escapes collapse to the escaped
/// character and a trailing lone backslash is preserved.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            // trailing backslash, keep it
            None => out.push('\\'),
        }
    }
    out
}

/// Render document text for transport: `\n` becomes TAB.
pub fn encode_newlines(text: &str) -> String {
    text.replace('\n', "\t")
}

/// Restore transported document text: TAB becomes `\n`.
pub fn decode_newlines(text: &str) -> String {
    text.replace('\t', "\n")
}
