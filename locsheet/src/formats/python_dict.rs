//! Python dict literal emitter.
//!
//! Produces a `STRINGS` module-level constant mapping language codes to flat
//! key/value tables. Values use JSON string escaping, which is a valid Python
//! string literal form, and non-ASCII text is left unescaped.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::json_escape;

/// One Python source file in progress.
#[derive(Debug, Default)]
pub struct Document {
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one key/value pair. Empty values are skipped.
    pub fn push(&mut self, language: &str, key: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        self.languages
            .entry(language.to_string())
            .or_default()
            .entry(key.to_string())
            .or_insert_with(|| text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(BTreeMap::is_empty)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("STRINGS = {\n");
        for (language, entries) in &self.languages {
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(out, "    \"{}\": {{", json_escape(language));
            for (key, value) in entries {
                let _ = writeln!(
                    out,
                    "        \"{}\": \"{}\",",
                    json_escape(key),
                    json_escape(value)
                );
            }
            out.push_str("    },\n");
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_render_shape() {
        let mut doc = Document::new();
        doc.push("en", "greeting", "Hello {name}");
        doc.push("en", "farewell", "Bye");
        doc.push("tw", "greeting", "哈囉 {name}");
        assert_eq!(
            doc.render(),
            indoc! {r#"
                STRINGS = {
                    "en": {
                        "farewell": "Bye",
                        "greeting": "Hello {name}",
                    },
                    "tw": {
                        "greeting": "哈囉 {name}",
                    },
                }
            "#}
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let mut doc = Document::new();
        doc.push("en", "note", "line\nwith \"quotes\"");
        assert!(doc.render().contains(r#""note": "line\nwith \"quotes\"","#));
    }

    #[test]
    fn test_empty_value_skipped() {
        let mut doc = Document::new();
        doc.push("en", "blank", "");
        assert!(doc.is_empty());
    }
}
