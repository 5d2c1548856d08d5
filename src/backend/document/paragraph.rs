//! Paragraph
//!
//! The unit of logical grouping inside a document. A document currently
//! keeps exactly one active paragraph; the id exists for grouping and never
//! participates in routing. All positions are char positions, not byte
//! offsets, so multi-byte text splices correctly.

use uuid::Uuid;

/// A paragraph: an identifier and a text payload.
#[derive(Debug, Clone)]
pub struct Paragraph {
    id: Uuid,
    text: String,
}

impl Paragraph {
    /// Create an empty paragraph with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of chars in the paragraph text.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Splice `insert` in at char position `pos`. `pos` must be within
    /// `0..=len_chars()`; callers clamp before splicing.
    pub fn insert_at(&mut self, pos: usize, insert: &str) {
        let byte = self.byte_index(pos);
        self.text.insert_str(byte, insert);
    }

    /// Remove `len` chars starting at char position `pos`. The range must be
    /// in bounds; callers clamp before splicing.
    pub fn delete_range(&mut self, pos: usize, len: usize) {
        let start = self.byte_index(pos);
        let end = self.byte_index(pos + len);
        self.text.replace_range(start..end, "");
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}
