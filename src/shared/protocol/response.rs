//! Response Formats
//!
//! Every response is `<kind>&key=val&...&`; a single dispatch may emit
//! several logical sub-responses joined with `\n` inside one broadcast line.
//! Handlers never hand-assemble wire syntax: each response kind has exactly
//! one builder here, so the formats live in one place.
//!
//! Document text and chat logs travel TAB-encoded (newline rendered as TAB,
//! see [`super::escape`]); the builders taking whole-document payloads apply
//! that encoding themselves and callers pass plain text.
//!
//! Collaborator and color lists serialize space-separated; the receiving
//! side splits on spaces.

use crate::shared::color::Rgb;
use crate::shared::protocol::escape::{encode_newlines, escape};

/// The unframed reply to any malformed or unanswerable request.
pub const INVALID_REQUEST: &str = "Invalid request";

/// `id&id=<n>&`, the handshake line, sent to one connection only.
pub fn id(conn_id: u64) -> String {
    format!("id&id={}&", conn_id)
}

/// `loggedin&...&` followed by the document-info listing.
pub fn logged_in(user: &str, conn_id: u64, docinfo: &str) -> String {
    format!(
        "loggedin&userName={}&id={}&\n{}",
        escape(user),
        conn_id,
        docinfo
    )
}

/// `notloggedin&id=<n>&`, the requested name is already online.
pub fn not_logged_in(conn_id: u64) -> String {
    format!("notloggedin&id={}&", conn_id)
}

/// `loggedout&userName=<u>&`
pub fn logged_out(user: &str) -> String {
    format!("loggedout&userName={}&", escape(user))
}

/// `created&userName=<u>&docName=<d>&date=<ts>&`
pub fn created(user: &str, doc: &str, date: &str) -> String {
    format!(
        "created&userName={}&docName={}&date={}&",
        escape(user),
        escape(doc),
        escape(date)
    )
}

/// `notcreatedduplicate&userName=<u>&`, NEWDOC name collision.
pub fn not_created_duplicate(user: &str) -> String {
    format!("notcreatedduplicate&userName={}&", escape(user))
}

/// The OPENDOC reply: an `update` line advertising the collaborator list,
/// then an `opened` line carrying the full document state.
#[allow(clippy::too_many_arguments)]
pub fn update_and_opened(
    user: &str,
    doc: &str,
    collaborators: &str,
    colors: &str,
    version: usize,
    chat: &str,
    content: &str,
) -> String {
    format!(
        "update&docName={d}&collaborators={cs}&colors={cols}&\n\
         opened&userName={u}&docName={d}&collaborators={cs}&version={v}&colors={cols}&chatContent={chat}&docContent={text}&",
        d = escape(doc),
        cs = escape(collaborators),
        cols = escape(colors),
        u = escape(user),
        v = version,
        chat = escape(&encode_newlines(chat)),
        text = escape(&encode_newlines(content)),
    )
}

/// `changed&type=insertion&...&`, position and length are the values the
/// mutation actually applied after rebasing, so every client splices
/// identically.
pub fn changed_insertion(
    user: &str,
    doc: &str,
    position: usize,
    length: usize,
    version: usize,
    color: Rgb,
    change: &str,
) -> String {
    format!(
        "changed&type=insertion&userName={}&docName={}&position={}&length={}&version={}&color={}&change={}&",
        escape(user),
        escape(doc),
        position,
        length,
        version,
        escape(&color.to_string()),
        escape(change)
    )
}

/// `changed&type=deletion&...&`
pub fn changed_deletion(
    user: &str,
    doc: &str,
    position: usize,
    length: usize,
    version: usize,
) -> String {
    format!(
        "changed&type=deletion&userName={}&docName={}&position={}&length={}&version={}&",
        escape(user),
        escape(doc),
        position,
        length,
        version
    )
}

/// `chat&userName=<u>&docName=<d>&chatContent=<c>&`
pub fn chat(user: &str, doc: &str, content: &str) -> String {
    format!(
        "chat&userName={}&docName={}&chatContent={}&",
        escape(user),
        escape(doc),
        escape(content)
    )
}

/// `corrected&...&`, full-content resync for a client that lost sync.
pub fn corrected(user: &str, doc: &str, content: &str) -> String {
    format!(
        "corrected&userName={}&docName={}&content={}&",
        escape(user),
        escape(doc),
        escape(&encode_newlines(content))
    )
}

/// `exiteddoc&...&` followed by the document-info listing.
pub fn exited_doc(user: &str, doc: &str, docinfo: &str) -> String {
    format!(
        "exiteddoc&userName={}&docName={}&\n{}",
        escape(user),
        escape(doc),
        docinfo
    )
}

/// One `docinfo&...&` line of the document table listing.
pub fn docinfo_line(doc: &str, date: &str, collab: &str, user: &str) -> String {
    format!(
        "docinfo&docName={}&date={}&collab={}&userName={}&",
        escape(doc),
        escape(date),
        escape(collab),
        escape(user)
    )
}

/// The `enddocinfo&userName=<u>&` terminator of a listing.
pub fn end_docinfo(user: &str) -> String {
    format!("enddocinfo&userName={}&", escape(user))
}

/// Space-separated name list.
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-separated `R,G,B` list. Names with no assigned color are skipped,
/// matching the list the clients render.
pub fn join_colors(colors: &[Option<Rgb>]) -> String {
    colors
        .iter()
        .flatten()
        .map(Rgb::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
