//! Android `strings.xml` emitter.
//!
//! Escaping follows the Android resource compiler rules: XML text escaping
//! first, then backslash escapes for quotes, tabs and newlines, then quote
//! wrapping when the value carries significant whitespace. Real newlines are
//! kept next to their `\n` escapes so the generated file stays readable.

use std::fmt::Write;

/// One `strings.xml` document in progress.
#[derive(Debug, Default)]
pub struct Document {
    body: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one `<string>` element. Empty values are skipped.
    pub fn push(&mut self, key: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "    <string name=\"{key}\">{}</string>",
            escape(text)
        );
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn render(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n{}</resources>\n",
            self.body
        )
    }
}

const WHITESPACE: [char; 3] = [' ', '\n', '\t'];

/// Two adjacent whitespace characters force quote wrapping, unless they sit
/// right before an already-escaped `\n` (those pairs come from the readable
/// newline rewrite and collapse fine).
fn has_multi_whitespace(text: &str) -> bool {
    let is_ws = |b: u8| b == b' ' || b == b'\n' || b == b'\t';
    let bytes = text.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if is_ws(bytes[i]) && is_ws(bytes[i + 1]) && !text[i + 2..].starts_with("\\n") {
            return true;
        }
    }
    false
}

/// Escapes a rendered value for use as `<string>` element text.
pub fn escape(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = quick_xml::escape::partial_escape(text);
    let mut out = text.replace('\\', "\\\\");
    // Keep a real newline next to the escape so the XML stays readable.
    out = out.replace('\n', "\n\\n");
    out = out.replace('\t', "\\t");
    out = out.replace('\'', "\\'");
    out = out.replace('"', "\\\"");

    if let Some(rest) = out.strip_prefix('@') {
        out = format!("\\@{rest}");
    }
    if out == "?" {
        return "\\?".to_string();
    }
    if out.starts_with(WHITESPACE) || out.ends_with(WHITESPACE) || has_multi_whitespace(&out) {
        return format!("\"{out}\"");
    }
    out
}
