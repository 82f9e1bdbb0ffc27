//! Apple `.strings` emitter.
//!
//! One `"key" = "value";` line per entry. Values use JSON-style string
//! escaping, which is what Xcode's plist-compatible `.strings` parser
//! expects for quotes, backslashes and control characters.

use std::fmt::Write;

use super::json_escape;

/// One `.strings` file in progress.
#[derive(Debug, Default)]
pub struct Document {
    body: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line. Empty values are skipped.
    pub fn push(&mut self, key: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        let _ = writeln!(self.body, "\"{key}\" = \"{}\";", json_escape(text));
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn render(&self) -> String {
        self.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_shape() {
        let mut doc = Document::new();
        doc.push("greeting", "Hello %1$@!");
        assert_eq!(doc.render(), "\"greeting\" = \"Hello %1$@!\";\n");
    }

    #[test]
    fn test_quotes_and_newlines_escaped() {
        let mut doc = Document::new();
        doc.push("note", "say \"hi\"\nagain");
        assert_eq!(doc.render(), "\"note\" = \"say \\\"hi\\\"\\nagain\";\n");
    }

    #[test]
    fn test_empty_value_skipped() {
        let mut doc = Document::new();
        doc.push("blank", "");
        assert!(doc.is_empty());
    }
}
