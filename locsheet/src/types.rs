//! Core, format-agnostic types for locsheet.
//! The tokenizer and resolver produce these; emitters consume them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formats::Format;

/// One element of a tokenized localized string.
///
/// A `Placeholder` with an empty name is an anonymous no-op: it binds to no
/// argument and renders as nothing in every output format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A tokenized localized string for one (entry, language) pair.
///
/// Invariant: the sequence alternates literal/placeholder, always starting
/// and ending with a literal (possibly empty), so its length is odd.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenSeq {
    segments: Vec<Segment>,
}

impl TokenSeq {
    /// A sequence holding a single empty literal: the tokenization of `""`.
    pub fn blank() -> Self {
        TokenSeq {
            segments: vec![Segment::Literal(String::new())],
        }
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        debug_assert!(segments.len() % 2 == 1);
        TokenSeq { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the sequence carries no content at all, i.e. it is a single
    /// empty literal. Entries with a blank value for a language yield no
    /// emission for that language.
    pub fn is_blank(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Literal(text)] if text.is_empty())
    }

    /// Placeholder names in occurrence order, anonymous ones included.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// All literal text joined, placeholders skipped.
    pub fn literal_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => Some(text.as_str()),
                Segment::Placeholder(_) => None,
            })
            .collect()
    }

    /// Literal segments and placeholder names joined in order, with the
    /// placeholder delimiters dropped.
    pub fn flatten(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(name) => name.as_str(),
            })
            .collect()
    }
}

/// Incrementally builds a [`TokenSeq`] while maintaining the alternation
/// invariant: adjacent literals are merged, and an empty literal is inserted
/// between adjacent placeholders.
#[derive(Debug, Default)]
pub(crate) struct SeqBuilder {
    segments: Vec<Segment>,
}

impl SeqBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_literal(&mut self, text: &str) {
        match self.segments.last_mut() {
            Some(Segment::Literal(existing)) => existing.push_str(text),
            _ => self.segments.push(Segment::Literal(text.to_string())),
        }
    }

    pub(crate) fn push_placeholder(&mut self, name: &str) {
        if !matches!(self.segments.last(), Some(Segment::Literal(_))) {
            self.segments.push(Segment::Literal(String::new()));
        }
        self.segments.push(Segment::Placeholder(name.to_string()));
    }

    pub(crate) fn extend(&mut self, seq: &TokenSeq) {
        for segment in seq.segments() {
            match segment {
                Segment::Literal(text) => self.push_literal(text),
                Segment::Placeholder(name) => self.push_placeholder(name),
            }
        }
    }

    pub(crate) fn finish(mut self) -> TokenSeq {
        if !matches!(self.segments.last(), Some(Segment::Literal(_))) {
            self.segments.push(Segment::Literal(String::new()));
        }
        TokenSeq::from_segments(self.segments)
    }
}

/// One output target of an entry: a key in one format, plus the routing and
/// argument metadata that format needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Target {
    pub format: Format,

    /// The key this entry is written under in the target format.
    pub key: String,

    /// Output file/group override; each format supplies its own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub file: Option<String>,

    /// Output subfolder override (Android only).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub folder: Option<String>,

    /// Declared argument list, ordered; the position defines the positional
    /// index a placeholder binds to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub args: Vec<String>,
}

/// One logical localizable message: one row of a source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Name of the sheet this entry was read from.
    pub sheet: String,

    /// Zero-based data row index within the sheet.
    pub row: usize,

    /// Resolution target identifier. Never emitted; only used as the target
    /// of `%ref%` backreferences in other entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub ref_key: Option<String>,

    /// Raw localized text per language code, as authored (untokenized).
    pub texts: BTreeMap<String, String>,

    /// Output targets, at most one per format.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Entry {
    pub fn new(sheet: impl Into<String>, row: usize) -> Self {
        Entry {
            sheet: sheet.into(),
            row,
            ref_key: None,
            texts: BTreeMap::new(),
            targets: Vec::new(),
        }
    }

    pub fn target(&self, format: Format) -> Option<&Target> {
        self.targets.iter().find(|t| t.format == format)
    }

    /// True when the row carries nothing at all: no reference key, no text,
    /// no target. Such rows are skipped at load time.
    pub fn is_empty(&self) -> bool {
        self.ref_key.is_none() && self.texts.is_empty() && self.targets.is_empty()
    }
}
