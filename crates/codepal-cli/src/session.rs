//! Session input owned by the interactive front end.

use codepal_core::MAX_CHARS;

/// Text the user is composing, bounded like a text area with a length limit.
///
/// Persists across submissions; only the user clears it.
#[derive(Debug, Clone)]
pub(crate) struct SessionInput {
    text: String,
    lines: usize,
    max_chars: usize,
}

impl SessionInput {
    pub(crate) fn new() -> Self {
        Self::with_limit(MAX_CHARS)
    }

    pub(crate) fn with_limit(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            lines: 0,
            max_chars,
        }
    }

    /// Append a line, truncating whatever does not fit.
    ///
    /// Returns the number of characters dropped.
    pub(crate) fn push_line(&mut self, line: &str) -> usize {
        let separator = if self.lines == 0 { "" } else { "\n" };
        self.lines += 1;
        let incoming = separator.chars().count() + line.chars().count();
        let room = self.max_chars - self.char_count();

        if incoming <= room {
            self.text.push_str(separator);
            self.text.push_str(line);
            return 0;
        }

        let kept: String = separator.chars().chain(line.chars()).take(room).collect();
        self.text.push_str(&kept);
        incoming - room
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.lines = 0;
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Live counter shown after each edit.
    pub(crate) fn usage_label(&self) -> String {
        format!("{}/{} characters used", self.char_count(), self.max_chars)
    }
}

impl Default for SessionInput {
    fn default() -> Self {
        Self::new()
    }
}
