//! Tokenizer for the `{{name}}` placeholder syntax.
//!
//! Tokenization is applied independently to every language value of every
//! entry before any backreference resolution.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Segment, TokenSeq};

lazy_static! {
    // Non-greedy: `{{a}}b{{c}}` captures `a` and `c`, never `a}}b{{c`.
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{(.*?)\}\}").unwrap();
}

/// Splits a raw localized string into alternating literal and placeholder
/// segments. Empty input yields a single empty literal. Placeholder
/// delimiters do not nest; anything up to the first `}}` is the name.
pub fn tokenize(raw: &str) -> TokenSeq {
    let mut segments = Vec::new();
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(raw) {
        let matched = captures.get(0).unwrap();
        segments.push(Segment::Literal(raw[last..matched.start()].to_string()));
        segments.push(Segment::Placeholder(captures[1].to_string()));
        last = matched.end();
    }
    segments.push(Segment::Literal(raw[last..].to_string()));
    TokenSeq::from_segments(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> Segment {
        Segment::Literal(text.to_string())
    }

    fn ph(name: &str) -> Segment {
        Segment::Placeholder(name.to_string())
    }

    #[test]
    fn test_plain_text() {
        let seq = tokenize("Hello world");
        assert_eq!(seq.segments(), &[lit("Hello world")]);
    }

    #[test]
    fn test_empty_input() {
        let seq = tokenize("");
        assert!(seq.is_blank());
    }

    #[test]
    fn test_single_placeholder() {
        let seq = tokenize("Hello {{name}}!");
        assert_eq!(seq.segments(), &[lit("Hello "), ph("name"), lit("!")]);
    }

    #[test]
    fn test_adjacent_placeholders() {
        let seq = tokenize("{{a}}{{b}}");
        assert_eq!(
            seq.segments(),
            &[lit(""), ph("a"), lit(""), ph("b"), lit("")]
        );
    }

    #[test]
    fn test_non_greedy_capture() {
        let seq = tokenize("{{a}}x{{b}}");
        assert_eq!(seq.segments(), &[lit(""), ph("a"), lit("x"), ph("b"), lit("")]);
    }

    #[test]
    fn test_anonymous_placeholder() {
        let seq = tokenize("a{{}}b");
        assert_eq!(seq.segments(), &[lit("a"), ph(""), lit("b")]);
    }

    #[test]
    fn test_unterminated_delimiter_stays_literal() {
        let seq = tokenize("Hello {{name");
        assert_eq!(seq.segments(), &[lit("Hello {{name")]);
    }

    #[test]
    fn test_odd_length_invariant() {
        for raw in ["", "a", "{{x}}", "a{{x}}b{{y}}c", "{{}}{{}}"] {
            assert_eq!(tokenize(raw).segments().len() % 2, 1, "input: {raw:?}");
        }
    }
}
