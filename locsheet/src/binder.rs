//! Argument binding: mapping placeholder names to positional format
//! arguments.
//!
//! Placeholder order in the main language is authoritative. Secondary
//! languages may reorder placeholders freely but reuse the same name → index
//! mapping, so `%2$s` points at the same argument everywhere.

use std::collections::HashMap;

use crate::{
    error::Error,
    formats::Format,
    types::{Segment, TokenSeq},
};

/// Declared-argument sentinel that disables percent-style literal escaping
/// for an entry/format.
pub const NO_ESCAPE: &str = "raw";

/// Per-(entry, format) binding of placeholder names to positional arguments.
#[derive(Debug, Clone, Default)]
pub struct ArgBinding {
    slots: HashMap<String, (usize, String)>,
    /// Whether literal `%` characters are doubled on output.
    pub escape_percent: bool,
}

impl ArgBinding {
    pub fn lookup(&self, name: &str) -> Option<(usize, &str)> {
        self.slots
            .get(name)
            .map(|(index, arg)| (*index, arg.as_str()))
    }
}

/// Assigns positional indices to the placeholder names of the main-language
/// resolved sequence: left to right, first occurrence wins, repeats reuse the
/// existing index. Anonymous placeholders are skipped.
pub fn placeholder_indices(seq: &TokenSeq) -> HashMap<String, usize> {
    let mut indices = HashMap::new();
    for name in seq.placeholder_names() {
        if name.is_empty() {
            continue;
        }
        if !indices.contains_key(name) {
            indices.insert(name.to_string(), indices.len());
        }
    }
    indices
}

/// Binds every indexed placeholder to the declared argument at its position.
/// A declared list shorter than the highest used index is a fatal error for
/// the entry.
pub fn bind(
    indices: &HashMap<String, usize>,
    args: &[String],
    sheet: &str,
    format: Format,
    key: &str,
) -> Result<ArgBinding, Error> {
    let no_escape = matches!(args, [only] if only == NO_ESCAPE);
    let declared: &[String] = if no_escape { &[] } else { args };

    let mut slots = HashMap::new();
    for (name, &index) in indices {
        let Some(arg) = declared.get(index) else {
            return Err(Error::UndefinedArgument {
                sheet: sheet.to_string(),
                format,
                key: key.to_string(),
                placeholder: name.clone(),
            });
        };
        slots.insert(name.clone(), (index, arg.clone()));
    }
    Ok(ArgBinding {
        slots,
        escape_percent: !no_escape,
    })
}

/// Renders a resolved sequence with positional `%N$type` tokens.
///
/// Placeholder names without a binding (seen only in a secondary language)
/// are kept verbatim in the output and returned so the caller can log them;
/// they are never silently dropped.
pub fn render_positional(seq: &TokenSeq, binding: &ArgBinding) -> (String, Vec<String>) {
    let mut out = String::new();
    let mut unknown = Vec::new();
    for segment in seq.segments() {
        match segment {
            Segment::Literal(text) => {
                if binding.escape_percent {
                    out.push_str(&text.replace('%', "%%"));
                } else {
                    out.push_str(text);
                }
            }
            Segment::Placeholder(name) if name.is_empty() => {}
            Segment::Placeholder(name) => match binding.lookup(name) {
                Some((index, arg)) => {
                    out.push_str(&format!("%{}${}", index + 1, arg));
                }
                None => {
                    unknown.push(name.clone());
                    out.push_str(name);
                }
            },
        }
    }
    (out, unknown)
}
