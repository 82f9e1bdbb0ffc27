//! Backreference resolution.
//!
//! A literal segment may contain `%ref%` backreferences pointing at another
//! entry's value for the same language. Resolution splices the referenced
//! entry's fully resolved token sequence in place of the reference, keeping
//! the alternation invariant intact.
//!
//! Resolution is lazy and memoized, so forward references (a target row below
//! the referencing row, or in another sheet) need no second pass. A visited
//! stack turns reference cycles into a hard error instead of unbounded
//! recursion.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    types::{Entry, SeqBuilder, Segment, TokenSeq},
};

lazy_static! {
    static ref BACKREF: Regex = Regex::new(r"%(.*?)%").unwrap();
}

/// The outcome of resolving one (entry, language) pair.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The fully resolved token sequence.
    pub tokens: TokenSeq,
    /// Referenced entry indices in splice order, transitively flattened.
    /// Drives per-format argument list propagation.
    pub refs: Vec<usize>,
}

/// Resolves backreferences over a set of tokenized entries.
///
/// The reference map must be fully built over all sheets before the first
/// call; reference targets may appear after referencing rows.
pub struct Resolver<'a> {
    entries: &'a [Entry],
    tokenized: &'a [BTreeMap<String, TokenSeq>],
    ref_map: &'a HashMap<String, usize>,
    cache: HashMap<(usize, String), Resolution>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        entries: &'a [Entry],
        tokenized: &'a [BTreeMap<String, TokenSeq>],
        ref_map: &'a HashMap<String, usize>,
    ) -> Self {
        Resolver {
            entries,
            tokenized,
            ref_map,
            cache: HashMap::new(),
        }
    }

    /// Resolves the value of entry `index` in `language`. An entry without a
    /// value for the language resolves to a blank sequence.
    pub fn resolve(&mut self, index: usize, language: &str) -> Result<Resolution, Error> {
        let mut stack = Vec::new();
        self.resolve_entry(index, language, &mut stack)
    }

    fn resolve_entry(
        &mut self,
        index: usize,
        language: &str,
        stack: &mut Vec<usize>,
    ) -> Result<Resolution, Error> {
        if let Some(hit) = self.cache.get(&(index, language.to_string())) {
            return Ok(hit.clone());
        }
        if stack.contains(&index) {
            let entry = &self.entries[index];
            return Err(Error::ReferenceCycle {
                reference: entry.ref_key.clone().unwrap_or_default(),
            });
        }

        let Some(seq) = self.tokenized[index].get(language) else {
            return Ok(Resolution {
                tokens: TokenSeq::blank(),
                refs: Vec::new(),
            });
        };
        let seq = seq.clone();

        stack.push(index);
        let mut builder = SeqBuilder::new();
        let mut refs = Vec::new();
        for segment in seq.segments() {
            match segment {
                Segment::Placeholder(name) => builder.push_placeholder(name),
                Segment::Literal(text) => {
                    self.expand_literal(index, text, language, &mut builder, &mut refs, stack)?;
                }
            }
        }
        stack.pop();

        let resolution = Resolution {
            tokens: builder.finish(),
            refs,
        };
        self.cache
            .insert((index, language.to_string()), resolution.clone());
        Ok(resolution)
    }

    fn expand_literal(
        &mut self,
        index: usize,
        text: &str,
        language: &str,
        builder: &mut SeqBuilder,
        refs: &mut Vec<usize>,
        stack: &mut Vec<usize>,
    ) -> Result<(), Error> {
        let mut last = 0;
        for captures in BACKREF.captures_iter(text) {
            let matched = captures.get(0).unwrap();
            builder.push_literal(&text[last..matched.start()]);
            last = matched.end();

            let name = &captures[1];
            if name.is_empty() {
                // A bare `%%` is literal text, not a reference.
                builder.push_literal(matched.as_str());
                continue;
            }
            let Some(&target) = self.ref_map.get(name) else {
                return Err(Error::UnresolvedReference {
                    reference: name.to_string(),
                    language: language.to_string(),
                    sheet: self.entries[index].sheet.clone(),
                });
            };
            let inner = self.resolve_entry(target, language, stack)?;
            builder.extend(&inner.tokens);
            refs.push(target);
            refs.extend(inner.refs.iter().copied());
        }
        builder.push_literal(&text[last..]);
        Ok(())
    }
}
