use locsheet::{Segment, token::tokenize};
use proptest::prelude::*;

fn literal_strategy() -> impl Strategy<Value = String> {
    // Literal text free of placeholder delimiters.
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{0,20}").expect("valid literal regex")
}

fn name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,10}").expect("valid name regex")
}

fn message_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        literal_strategy(),
        prop::collection::vec((name_strategy(), literal_strategy()), 0..5),
    )
        .prop_map(|(head, tail)| {
            let mut raw = head;
            let mut names = Vec::with_capacity(tail.len());
            for (name, literal) in tail {
                raw.push_str(&format!("{{{{{name}}}}}"));
                raw.push_str(&literal);
                names.push(name);
            }
            (raw, names)
        })
}

proptest! {
    #[test]
    fn prop_literal_only_input_stays_one_segment(text in literal_strategy()) {
        let seq = tokenize(&text);
        prop_assert_eq!(seq.segments().len(), 1);
        prop_assert_eq!(seq.literal_text(), text);
    }

    #[test]
    fn prop_placeholder_names_survive_tokenization((raw, names) in message_strategy()) {
        let seq = tokenize(&raw);
        let found: Vec<String> = seq
            .placeholder_names()
            .map(str::to_string)
            .collect();
        prop_assert_eq!(found, names);
    }

    #[test]
    fn prop_sequence_alternates_and_has_odd_length((raw, _) in message_strategy()) {
        let seq = tokenize(&raw);
        prop_assert_eq!(seq.segments().len() % 2, 1);
        for (i, segment) in seq.segments().iter().enumerate() {
            match segment {
                Segment::Literal(_) => prop_assert_eq!(i % 2, 0),
                Segment::Placeholder(_) => prop_assert_eq!(i % 2, 1),
            }
        }
    }

    #[test]
    fn prop_reassembly_reproduces_input((raw, _) in message_strategy()) {
        let seq = tokenize(&raw);
        let rebuilt: String = seq
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder(name) => format!("{{{{{name}}}}}"),
            })
            .collect();
        prop_assert_eq!(rebuilt, raw);
    }
}
