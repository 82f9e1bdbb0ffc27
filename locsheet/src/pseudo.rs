//! Pseudo-localization of the main language.
//!
//! Rewrites ASCII letters in main-language output to mathematical script
//! characters (`Hello` becomes `𝐻𝑒𝓁𝓁𝑜`), so text that was never routed
//! through the sheet stands out in a running app while staying readable.
//! Placeholders and positional format tokens are left untouched.

use crate::types::{Segment, TokenSeq};

const LOWER: [char; 26] = [
    '𝒶', '𝒷', '𝒸', '𝒹', '𝑒', '𝒻', '𝑔', '𝒽', '𝒾', '𝒿', '𝓀', '𝓁', '𝓂', '𝓃', '𝑜', '𝓅', '𝓆',
    '𝓇', '𝓈', '𝓉', '𝓊', '𝓋', '𝓌', '𝓍', '𝓎', '𝓏',
];

const UPPER: [char; 26] = [
    '𝒜', '𝐵', '𝒞', '𝒟', '𝐸', '𝐹', '𝒢', '𝐻', '𝐼', '𝒥', '𝒦', '𝐿', '𝑀', '𝒩', '𝒪', '𝒫', '𝒬',
    '𝑅', '𝒮', '𝒯', '𝒰', '𝒱', '𝒲', '𝒳', '𝒴', '𝒵',
];

/// Maps ASCII letters to their mathematical-script counterparts; every other
/// character passes through unchanged.
pub fn cursive(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => LOWER[c as usize - 'a' as usize],
            'A'..='Z' => UPPER[c as usize - 'A' as usize],
            _ => c,
        })
        .collect()
}

/// Applies [`cursive`] to the literal segments only, so placeholder names and
/// argument binding are unaffected.
pub(crate) fn cursive_tokens(seq: &TokenSeq) -> TokenSeq {
    let segments = seq
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Segment::Literal(cursive(text)),
            placeholder => placeholder.clone(),
        })
        .collect();
    TokenSeq::from_segments(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;
    use crate::types::Segment;

    #[test]
    fn test_cursive_maps_ascii_letters() {
        assert_eq!(cursive("Hello"), "𝐻𝑒𝓁𝓁𝑜");
        assert_eq!(cursive("aZ"), "𝒶𝒵");
    }

    #[test]
    fn test_cursive_keeps_everything_else() {
        assert_eq!(cursive("123 %% 哈囉!"), "123 %% 哈囉!");
        assert_eq!(cursive(""), "");
    }

    #[test]
    fn test_cursive_tokens_skips_placeholders() {
        let seq = cursive_tokens(&tokenize("Hi {{name}}!"));
        assert_eq!(
            seq.segments(),
            &[
                Segment::Literal("𝐻𝒾 ".to_string()),
                Segment::Placeholder("name".to_string()),
                Segment::Literal("!".to_string()),
            ]
        );
    }
}
