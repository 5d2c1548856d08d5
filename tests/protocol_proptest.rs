//! Property-based tests for the wire escaping and the document merge rules

use proptest::prelude::*;

use xfpad::backend::document::{Document, EditOp};
use xfpad::shared::protocol::escape::{escape, unescape};
use xfpad::shared::Request;

/// Char-position splice, the way a client applies a broadcast insertion.
fn char_insert(text: &mut String, pos: usize, insert: &str) {
    let byte = text
        .char_indices()
        .nth(pos)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    text.insert_str(byte, insert);
}

/// Char-position removal, the way a client applies a broadcast deletion.
fn char_delete(text: &mut String, pos: usize, len: usize) {
    let byte_at = |text: &str, char_pos: usize| {
        text.char_indices()
            .nth(char_pos)
            .map(|(index, _)| index)
            .unwrap_or(text.len())
    };
    let start = byte_at(text, pos);
    let end = byte_at(text, pos + len);
    text.replace_range(start..end, "");
}

/// Replay a document's committed history against an empty buffer. Every
/// client effectively does this, so replay equality is the convergence law.
fn replay(history: &[EditOp]) -> String {
    let mut text = String::new();
    for op in history {
        match op {
            EditOp::Insert { pos, text: insert } => char_insert(&mut text, *pos, insert),
            EditOp::Delete { pos, len } => char_delete(&mut text, *pos, *len),
        }
    }
    text
}

fn arbitrary_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..48).prop_map(|chars| chars.into_iter().collect::<String>())
}

proptest! {
    #[test]
    fn test_unescape_inverts_escape(value in arbitrary_text()) {
        prop_assert_eq!(unescape(&escape(&value)), value);
    }

    #[test]
    fn test_escaped_values_survive_framing(value in arbitrary_text()) {
        let escaped = escape(&value);
        prop_assert!(!escaped.contains('\n'));

        let line = format!("CHAT&chatContent={}&", escaped);
        let request = Request::parse(&line).unwrap();
        prop_assert_eq!(request.field("chatContent").unwrap(), value);
    }

    /// Random edit streams with arbitrarily stale observed versions still
    /// leave a history whose replay is exactly the server's text.
    #[test]
    fn test_history_replay_matches_content(
        ops in prop::collection::vec(
            (any::<bool>(), 0..64usize, "[a-z]{0,6}", 0..12usize, 0.0..1.0f64),
            1..24,
        )
    ) {
        let mut doc = Document::new("paper", "alice");
        for (is_insert, pos, text, len, staleness) in ops {
            let observed = (doc.version() as f64 * staleness) as usize;
            if is_insert {
                doc.insert(pos, &text, observed);
            } else {
                doc.delete(pos, len, observed);
            }
        }
        prop_assert_eq!(doc.version(), doc.history().len());
        prop_assert_eq!(replay(doc.history()), doc.content());
    }

    /// Two edits issued against the same observed version both commit and
    /// converge regardless of their order in the queue.
    #[test]
    fn test_stale_edit_pairs_converge(
        seed in "[a-z]{0,12}",
        insert_pos in 0..16usize,
        insert_text in "[a-z]{1,4}",
        delete_pos in 0..16usize,
        delete_len in 0..8usize,
    ) {
        let mut doc = Document::new("paper", "alice");
        doc.insert(0, &seed, 0);
        let base = doc.version();
        doc.insert(insert_pos, &insert_text, base);
        doc.delete(delete_pos, delete_len, base);
        prop_assert_eq!(replay(doc.history()), doc.content());
    }

    /// An edit issued at the current version applies with no transformation
    /// beyond end-of-text clamping.
    #[test]
    fn test_rebase_identity_at_current_version(
        seed in "[a-z]{1,16}",
        pos in 0..16usize,
    ) {
        let mut doc = Document::new("paper", "alice");
        doc.insert(0, &seed, 0);
        let len = doc.content().chars().count();
        let applied = doc.insert(pos, "x", doc.version());
        prop_assert_eq!(applied.position, pos.min(len));
    }
}
