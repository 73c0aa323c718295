//! Per-step transcript buffer.
//!
//! Items are appended as `text` + terminator (`;` by default, `.` when the
//! next item continues the same phrase, e.g. `ch.p1.` followed by `g50;`).
//! The buffer is flushed into the history once per committed step.

use std::fmt::Display;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteBuffer {
    entry: String,
}

impl NoteBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item terminated by `;`.
    pub fn push(&mut self, note: impl Display) {
        self.push_with(note, ';');
    }

    /// Append an item with an explicit terminator.
    pub fn push_with(&mut self, note: impl Display, end: char) {
        use std::fmt::Write;
        // Writing to a String cannot fail.
        let _ = write!(self.entry, "{}{}", note, end);
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.entry
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Take the accumulated entry, leaving the buffer empty.
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_flush() {
        let mut notes = NoteBuffer::new();
        notes.push_with("ch.p1", '.');
        notes.push("g50");
        notes.push(format_args!("p.p{}>p{}.${}", 0, 1, 50));

        assert_eq!(notes.as_str(), "ch.p1.g50;p.p0>p1.$50;");
        assert_eq!(notes.flush(), "ch.p1.g50;p.p0>p1.$50;");
        assert!(notes.is_empty());
    }
}
