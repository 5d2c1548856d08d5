//! Request Handlers
//!
//! One handler per request kind, each mutating the server state and
//! producing the single response string the dispatcher broadcasts. Every
//! protocol-level failure (unparseable line, missing field, unknown
//! document, unknown change type) collapses into the literal
//! `Invalid request` reply, and the connection stays open.

use crate::backend::dispatch::QueuedRequest;
use crate::backend::document::DocumentStore;
use crate::backend::server::state::ServerState;
use crate::shared::error::ProtocolError;
use crate::shared::protocol::escape::decode_newlines;
use crate::shared::protocol::response;
use crate::shared::protocol::{Request, RequestKind};

/// Parse and execute one queued request.
pub fn handle(state: &mut ServerState, queued: &QueuedRequest) -> String {
    let request = match Request::parse(&queued.line) {
        Ok(request) => request,
        Err(error) => {
            tracing::warn!(
                "[Dispatch] unparseable line from connection {}: {}",
                queued.conn_id,
                error
            );
            return response::INVALID_REQUEST.to_string();
        }
    };

    let result = match request.kind {
        RequestKind::Login => login(state, &request, queued.conn_id),
        RequestKind::NewDoc => new_doc(state, &request),
        RequestKind::OpenDoc => open_doc(state, &request),
        RequestKind::Change => change_doc(state, &request),
        RequestKind::ExitDoc => exit_doc(state, &request),
        RequestKind::Logout => logout(state, &request, queued.conn_id),
        RequestKind::CorrectError => correct_error(state, &request),
        RequestKind::Chat => chat(state, &request),
        RequestKind::Invalid => {
            tracing::warn!(
                "[Dispatch] unknown request kind from connection {}",
                queued.conn_id
            );
            return response::INVALID_REQUEST.to_string();
        }
    };

    result.unwrap_or_else(|error| {
        tracing::warn!("[Dispatch] rejected request: {}", error);
        response::INVALID_REQUEST.to_string()
    })
}

fn login(state: &mut ServerState, request: &Request, conn_id: u64) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    if !state.registry.login(user, conn_id) {
        tracing::info!("[Dispatch] login rejected, '{}' already online", user);
        return Ok(response::not_logged_in(conn_id));
    }
    tracing::info!("[Dispatch] '{}' logged in on connection {}", user, conn_id);
    let listing = docinfo_listing(&state.documents, user);
    Ok(response::logged_in(user, conn_id, &listing))
}

fn logout(
    state: &mut ServerState,
    request: &Request,
    conn_id: u64,
) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    state.registry.logout(user, conn_id);
    tracing::info!("[Dispatch] '{}' logged out", user);
    Ok(response::logged_out(user))
}

fn new_doc(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    if !state.documents.create(name, user) {
        tracing::info!("[Dispatch] document '{}' already exists", name);
        return Ok(response::not_created_duplicate(user));
    }
    tracing::info!("[Dispatch] '{}' created document '{}'", user, name);
    let created = state
        .documents
        .get(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;
    Ok(response::created(user, name, &created.formatted_date()))
}

fn open_doc(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    let ServerState {
        registry,
        documents,
    } = state;
    let doc = documents
        .get_mut(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;
    doc.add_collaborator(user);
    let collaborators = response::join_names(doc.collaborators());
    let colors = response::join_colors(&registry.colors_for(doc.collaborators()));
    Ok(response::update_and_opened(
        user,
        name,
        &collaborators,
        &colors,
        doc.version(),
        doc.chat(),
        doc.content(),
    ))
}

fn change_doc(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    let position = request.numeric_field("position")?;
    let length = request.numeric_field("length")?;
    let version = request.numeric_field("version")?;
    let change_type = request.field("type")?;

    let ServerState {
        registry,
        documents,
    } = state;
    let doc = documents
        .get_mut(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;

    match change_type {
        "insertion" => {
            let change = request.field("change")?;
            let color = registry
                .color_of(user)
                .ok_or_else(|| ProtocolError::not_logged_in(user))?;
            // a TAB on the wire is an Enter keystroke
            let applied = doc.insert(position, &decode_newlines(change), version);
            Ok(response::changed_insertion(
                user,
                name,
                applied.position,
                applied.length,
                applied.version,
                color,
                change,
            ))
        }
        "deletion" => {
            let applied = doc.delete(position, length, version);
            Ok(response::changed_deletion(
                user,
                name,
                applied.position,
                applied.length,
                applied.version,
            ))
        }
        other => Err(ProtocolError::unknown_change_type(other)),
    }
}

fn exit_doc(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    // the collaborator list deliberately keeps the user; the doc table
    // shows everyone who has ever opened the document
    state
        .documents
        .get(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;
    let listing = docinfo_listing(&state.documents, user);
    Ok(response::exited_doc(user, name, &listing))
}

fn correct_error(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    let doc = state
        .documents
        .get(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;
    tracing::info!("[Dispatch] resyncing '{}' on document '{}'", user, name);
    Ok(response::corrected(user, name, doc.content()))
}

fn chat(state: &mut ServerState, request: &Request) -> Result<String, ProtocolError> {
    let user = request.field("userName")?;
    let name = request.field("docName")?;
    let content = request.field("chatContent")?;
    let doc = state
        .documents
        .get_mut(name)
        .ok_or_else(|| ProtocolError::unknown_document(name))?;
    doc.append_chat(&format!("{} : {}\n", user, content));
    Ok(response::chat(user, name, content))
}

/// The document table listing: one `docinfo` line per document in creation
/// order, closed with `enddocinfo`.
fn docinfo_listing(documents: &DocumentStore, user: &str) -> String {
    let mut out = String::new();
    for doc in documents.iter() {
        out.push_str(&response::docinfo_line(
            doc.name(),
            &doc.formatted_date(),
            &response::join_names(doc.collaborators()),
            user,
        ));
        out.push('\n');
    }
    out.push_str(&response::end_docinfo(user));
    out
}
