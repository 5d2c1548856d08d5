//! Versioned Document Model
//!
//! A document is a text buffer with a monotonically increasing version and
//! the full sequence of past mutations. Edits arrive tagged with the version
//! the issuing client had observed; before applying, the document rebases
//! the edit position across every mutation committed since that version, so
//! an edit produced against a stale snapshot still merges at the spot the
//! user meant.
//!
//! # Rebase Rules
//!
//! For each recorded mutation between the client's version and the present:
//!
//! - an earlier insert at or before the position pushes it right by the
//!   inserted length (ties push right, preserving caret intent);
//! - an earlier insert after the position leaves it alone;
//! - an earlier delete entirely before the position pulls it left;
//! - an earlier delete at or after the position leaves it alone;
//! - a delete straddling the position snaps it to the delete's start.
//!
//! The server dispatches mutations one at a time, so rebasing only ever
//! looks at mutations strictly after the observed version. Every client
//! applies the rebased result in the same order, which is what makes the
//! buffers converge.

use chrono::{DateTime, Local};

use super::paragraph::Paragraph;

/// One committed mutation. `history[k - 1]` is the mutation that produced
/// version `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { pos: usize, text: String },
    Delete { pos: usize, len: usize },
}

/// What a mutation actually did after rebasing and clamping. These are the
/// values broadcast to clients, so every replica splices identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedChange {
    /// Rebased char position the splice happened at.
    pub position: usize,
    /// Chars inserted or removed; zero for a deletion that rebased away.
    pub length: usize,
    /// The document version after the mutation.
    pub version: usize,
}

/// A named, versioned text document with collaborators and a chat log.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    creator: String,
    paragraph: Paragraph,
    version: usize,
    history: Vec<EditOp>,
    collaborators: Vec<String>,
    chat: String,
    last_edit: DateTime<Local>,
}

impl Document {
    /// Create an empty document. The creator becomes the first collaborator.
    pub fn new(name: impl Into<String>, creator: impl Into<String>) -> Self {
        let creator = creator.into();
        Self {
            name: name.into(),
            collaborators: vec![creator.clone()],
            creator,
            paragraph: Paragraph::new(),
            version: 0,
            history: Vec::new(),
            chat: String::new(),
            last_edit: Local::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn version(&self) -> usize {
        self.version
    }

    /// The current text. `\n` is the only newline it ever contains.
    pub fn content(&self) -> &str {
        self.paragraph.text()
    }

    pub fn history(&self) -> &[EditOp] {
        &self.history
    }

    /// Every user that has opened this document, in first-open order.
    pub fn collaborators(&self) -> &[String] {
        &self.collaborators
    }

    /// The append-only chat log, one `"<user> : <line>\n"` entry per message.
    pub fn chat(&self) -> &str {
        &self.chat
    }

    /// Insert `text` at char position `pos` as observed at `version`.
    ///
    /// The position is rebased across everything committed since `version`,
    /// then clamped into the current text. Bumps the version by one.
    pub fn insert(&mut self, pos: usize, text: &str, version: usize) -> AppliedChange {
        let mut pos = self.rebase_position(pos, version);
        let len_chars = self.paragraph.len_chars();
        if pos > len_chars {
            pos = len_chars;
        }
        self.paragraph.insert_at(pos, text);
        self.history.push(EditOp::Insert {
            pos,
            text: text.to_string(),
        });
        self.version += 1;
        self.touch();
        AppliedChange {
            position: pos,
            length: text.chars().count(),
            version: self.version,
        }
    }

    /// Delete `len` chars at char position `pos` as observed at `version`.
    ///
    /// The position is rebased like an insert, then position and length are
    /// clamped so the range stays inside the current text. A range that
    /// rebases away entirely still commits as a zero-length record, so
    /// observers see the version tick.
    pub fn delete(&mut self, pos: usize, len: usize, version: usize) -> AppliedChange {
        let mut pos = self.rebase_position(pos, version);
        let len_chars = self.paragraph.len_chars();
        if pos > len_chars {
            pos = len_chars;
        }
        let len = len.min(len_chars - pos);
        if len > 0 {
            self.paragraph.delete_range(pos, len);
        }
        self.history.push(EditOp::Delete { pos, len });
        self.version += 1;
        self.touch();
        AppliedChange {
            position: pos,
            length: len,
            version: self.version,
        }
    }

    /// Record that `name` has the document open. Reopening never duplicates
    /// and nothing ever removes an entry.
    pub fn add_collaborator(&mut self, name: &str) {
        if !self.collaborators.iter().any(|existing| existing == name) {
            self.collaborators.push(name.to_string());
        }
    }

    /// Append one chat entry; the caller supplies the trailing `\n`.
    pub fn append_chat(&mut self, line: &str) {
        self.chat.push_str(line);
    }

    /// Record an edit timestamp.
    pub fn touch(&mut self) {
        self.last_edit = Local::now();
    }

    /// Last-edit time as `H:MM AM , MM/DD` for the document table.
    pub fn formatted_date(&self) -> String {
        self.last_edit.format("%-I:%M %p , %m/%d").to_string()
    }

    fn rebase_position(&self, mut pos: usize, version: usize) -> usize {
        let start = version.min(self.history.len());
        for op in &self.history[start..] {
            match op {
                EditOp::Insert { pos: p, text } => {
                    if *p <= pos {
                        pos += text.chars().count();
                    }
                }
                EditOp::Delete { pos: p, len } => {
                    if p + len <= pos {
                        pos -= len;
                    } else if *p < pos {
                        // straddles the position
                        pos = *p;
                    }
                }
            }
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text(text: &str) -> Document {
        let mut doc = Document::new("paper", "alice");
        doc.insert(0, text, 0);
        doc
    }

    #[test]
    fn test_insert_at_current_version_applies_untransformed() {
        let mut doc = Document::new("paper", "alice");
        let applied = doc.insert(0, "hello", 0);
        assert_eq!(doc.content(), "hello");
        assert_eq!(applied.position, 0);
        assert_eq!(applied.version, 1);
    }

    #[test]
    fn test_version_tracks_history_length() {
        let mut doc = doc_with_text("abc");
        doc.insert(1, "x", doc.version());
        doc.delete(0, 1, doc.version());
        assert_eq!(doc.version(), 3);
        assert_eq!(doc.history().len(), 3);
    }

    #[test]
    fn test_concurrent_inserts_at_same_position() {
        // Both clients observed "abc" at version 1 and insert at position 1.
        let mut doc = doc_with_text("abc");
        let first = doc.insert(1, "X", 1);
        let second = doc.insert(1, "Y", 1);
        assert_eq!(doc.content(), "aXYbc");
        assert_eq!(first.position, 1);
        assert_eq!(second.position, 2);
        assert_eq!(second.version, 3);
    }

    #[test]
    fn test_insert_then_stale_delete() {
        // "hello" at v1; an append of "!" lands first, then a delete of the
        // first two chars issued against v1 rebases cleanly.
        let mut doc = doc_with_text("hello");
        doc.insert(5, "!", 1);
        let applied = doc.delete(0, 2, 1);
        assert_eq!(doc.content(), "llo!");
        assert_eq!(applied.position, 0);
        assert_eq!(applied.length, 2);
        assert_eq!(applied.version, 3);
    }

    #[test]
    fn test_stale_insert_shifts_left_past_earlier_delete() {
        let mut doc = doc_with_text("abcdef");
        doc.delete(0, 2, 1);
        let applied = doc.insert(4, "X", 1);
        assert_eq!(applied.position, 2);
        assert_eq!(doc.content(), "cdXef");
    }

    #[test]
    fn test_stale_insert_snaps_into_straddling_delete() {
        let mut doc = doc_with_text("abcdef");
        doc.delete(1, 4, 1);
        let applied = doc.insert(3, "X", 1);
        assert_eq!(applied.position, 1);
        assert_eq!(doc.content(), "aXf");
    }

    #[test]
    fn test_delete_clamps_to_remaining_text() {
        let mut doc = doc_with_text("abc");
        let applied = doc.delete(1, 99, 1);
        assert_eq!(doc.content(), "a");
        assert_eq!(applied.length, 2);
    }

    #[test]
    fn test_collapsed_delete_still_bumps_version() {
        let mut doc = doc_with_text("ab");
        doc.delete(0, 2, 1);
        let applied = doc.delete(1, 1, 1);
        assert_eq!(applied.length, 0);
        assert_eq!(applied.version, 3);
        assert_eq!(doc.history().len(), 3);
        assert_eq!(doc.content(), "");
    }

    #[test]
    fn test_insert_position_clamped_to_end() {
        let mut doc = doc_with_text("ab");
        let applied = doc.insert(50, "c", 1);
        assert_eq!(applied.position, 2);
        assert_eq!(doc.content(), "abc");
    }

    #[test]
    fn test_creator_is_first_collaborator() {
        let doc = Document::new("paper", "alice");
        assert_eq!(doc.collaborators(), ["alice".to_string()]);
        assert_eq!(doc.creator(), "alice");
    }

    #[test]
    fn test_reopening_does_not_duplicate_collaborator() {
        let mut doc = Document::new("paper", "alice");
        doc.add_collaborator("bob");
        doc.add_collaborator("alice");
        doc.add_collaborator("bob");
        assert_eq!(
            doc.collaborators(),
            ["alice".to_string(), "bob".to_string()]
        );
    }

    #[test]
    fn test_chat_appends_verbatim() {
        let mut doc = Document::new("paper", "alice");
        doc.append_chat("alice : hi\n");
        doc.append_chat("bob : hello\n");
        assert!(doc.chat().ends_with("bob : hello\n"));
        assert!(doc.chat().starts_with("alice : hi\n"));
    }

    #[test]
    fn test_formatted_date_shape() {
        let doc = Document::new("paper", "alice");
        let date = doc.formatted_date();
        // e.g. "3:07 PM , 06/02"
        assert!(date.contains(':'));
        assert!(date.contains(" , "));
        assert!(date.ends_with(|c: char| c.is_ascii_digit()));
        assert!(date.contains("AM") || date.contains("PM"));
    }
}
