//! Note domain model.
//!
//! # Responsibility
//! - Define the bounded text entry stored by `NoteStore`.
//! - Own the byte-bound truncation rule shared by append and decode paths.
//!
//! # Invariants
//! - `Note::as_str().len() <= MAX_NOTE_BYTES` always holds.
//! - Truncation never splits a UTF-8 code point.
//! - Note text carries no identity; duplicates are allowed.

use std::fmt::{Display, Formatter};

/// Maximum encoded length of one note, in bytes.
///
/// Matches a 256-byte platform buffer minus its terminator.
pub const MAX_NOTE_BYTES: usize = 255;

/// One bounded-length text entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Note {
    text: String,
}

impl Note {
    /// Creates a note, truncating `text` to at most `MAX_NOTE_BYTES` bytes.
    ///
    /// Use [`Note::bounded`] when the caller needs to know whether text was cut.
    pub fn new(text: impl Into<String>) -> Self {
        Self::bounded(text).0
    }

    /// Creates a note and reports whether truncation happened.
    pub fn bounded(text: impl Into<String>) -> (Self, bool) {
        let mut text = text.into();
        let cut = truncation_point(&text, MAX_NOTE_BYTES);
        let truncated = cut < text.len();
        text.truncate(cut);
        (Self { text }, truncated)
    }

    /// Creates a note only when `text` already fits the byte bound.
    ///
    /// Used by decode paths, where oversize text means the payload is corrupt.
    pub fn try_exact(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.len() > MAX_NOTE_BYTES {
            return None;
        }
        Some(Self { text })
    }

    /// Returns the note text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Largest index `<= max_bytes` that lies on a char boundary of `text`.
fn truncation_point(text: &str, max_bytes: usize) -> usize {
    if text.len() <= max_bytes {
        return text.len();
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::{Note, MAX_NOTE_BYTES};

    #[test]
    fn short_text_is_kept_verbatim() {
        let (note, truncated) = Note::bounded("buy milk");
        assert_eq!(note.as_str(), "buy milk");
        assert!(!truncated);
    }

    #[test]
    fn ascii_text_keeps_exactly_first_max_bytes() {
        let source = "x".repeat(MAX_NOTE_BYTES + 40);
        let (note, truncated) = Note::bounded(source.clone());
        assert!(truncated);
        assert_eq!(note.len(), MAX_NOTE_BYTES);
        assert_eq!(note.as_str(), &source[..MAX_NOTE_BYTES]);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundary() {
        // 'é' is two bytes; 128 of them straddle the 255-byte limit.
        let source = "é".repeat(128);
        let note = Note::new(source);
        assert_eq!(note.len(), 254);
        assert!(note.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn try_exact_rejects_oversize_text() {
        assert!(Note::try_exact("a".repeat(MAX_NOTE_BYTES)).is_some());
        assert!(Note::try_exact("a".repeat(MAX_NOTE_BYTES + 1)).is_none());
    }
}
