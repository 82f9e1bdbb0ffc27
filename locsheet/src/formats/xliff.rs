//! XLIFF 1.2 emitter.
//!
//! One document per non-main language. Each translation unit pairs the
//! main-language resolved text (`<source>`) with the target language's
//! (`<target>`). Placeholders become `<ph>` inline markers carrying the
//! interpolation slot as `equiv-text`, with literal text interleaved.

use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    types::{Segment, TokenSeq},
};

const XLIFF_NS: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// Inline content of a `<source>` or `<target>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Ph { id: usize, name: String },
}

/// Converts a resolved sequence into inline XLIFF content. Placeholder ids
/// are 1-based in occurrence order; anonymous placeholders are dropped.
pub fn inline_content(seq: &TokenSeq) -> Vec<Inline> {
    let mut content = Vec::new();
    let mut next_id = 1;
    for segment in seq.segments() {
        match segment {
            Segment::Literal(text) if text.is_empty() => {}
            Segment::Literal(text) => content.push(Inline::Text(text.clone())),
            Segment::Placeholder(name) if name.is_empty() => {}
            Segment::Placeholder(name) => {
                content.push(Inline::Ph {
                    id: next_id,
                    name: name.clone(),
                });
                next_id += 1;
            }
        }
    }
    content
}

#[derive(Debug)]
struct Unit {
    key: String,
    source: Vec<Inline>,
    target: Vec<Inline>,
}

/// One XLIFF document in progress.
#[derive(Debug)]
pub struct Document {
    source_language: String,
    target_language: String,
    units: Vec<Unit>,
}

impl Document {
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Document {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            units: Vec::new(),
        }
    }

    /// Appends one translation unit. A unit needs both sides; one with an
    /// empty source or an empty target is skipped.
    pub fn push(&mut self, key: &str, source: Vec<Inline>, target: Vec<Inline>) {
        if source.is_empty() || target.is_empty() {
            return;
        }
        self.units.push(Unit {
            key: key.to_string(),
            source,
            target,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn render(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn write_to<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut xml = Writer::new(writer);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml.write_event(Event::Text(BytesText::new("\n")))?;

        let mut xliff = BytesStart::new("xliff");
        xliff.push_attribute(("version", "1.2"));
        xliff.push_attribute(("xmlns", XLIFF_NS));
        xml.write_event(Event::Start(xliff))?;
        xml.write_event(Event::Text(BytesText::new("\n  ")))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("original", "messages"));
        file.push_attribute(("source-language", self.source_language.as_str()));
        file.push_attribute(("target-language", self.target_language.as_str()));
        file.push_attribute(("datatype", "plaintext"));
        xml.write_event(Event::Start(file))?;
        xml.write_event(Event::Text(BytesText::new("\n    ")))?;

        xml.write_event(Event::Start(BytesStart::new("body")))?;

        for unit in &self.units {
            xml.write_event(Event::Text(BytesText::new("\n      ")))?;
            let mut trans_unit = BytesStart::new("trans-unit");
            trans_unit.push_attribute(("id", unit.key.as_str()));
            xml.write_event(Event::Start(trans_unit))?;

            xml.write_event(Event::Text(BytesText::new("\n        ")))?;
            write_inline(&mut xml, "source", &unit.source)?;
            xml.write_event(Event::Text(BytesText::new("\n        ")))?;
            write_inline(&mut xml, "target", &unit.target)?;

            xml.write_event(Event::Text(BytesText::new("\n      ")))?;
            xml.write_event(Event::End(BytesEnd::new("trans-unit")))?;
        }

        xml.write_event(Event::Text(BytesText::new("\n    ")))?;
        xml.write_event(Event::End(BytesEnd::new("body")))?;
        xml.write_event(Event::Text(BytesText::new("\n  ")))?;
        xml.write_event(Event::End(BytesEnd::new("file")))?;
        xml.write_event(Event::Text(BytesText::new("\n")))?;
        xml.write_event(Event::End(BytesEnd::new("xliff")))?;
        xml.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn write_inline<W: Write>(
    xml: &mut Writer<W>,
    element: &str,
    content: &[Inline],
) -> Result<(), Error> {
    xml.write_event(Event::Start(BytesStart::new(element)))?;
    for inline in content {
        match inline {
            Inline::Text(text) => {
                xml.write_event(Event::Text(BytesText::new(text)))?;
            }
            Inline::Ph { id, name } => {
                let slot = format!("{{{name}}}");
                let mut ph = BytesStart::new("ph");
                ph.push_attribute(("id", id.to_string().as_str()));
                ph.push_attribute(("equiv-text", slot.as_str()));
                xml.write_event(Event::Start(ph))?;
                xml.write_event(Event::Text(BytesText::new(&slot)))?;
                xml.write_event(Event::End(BytesEnd::new("ph")))?;
            }
        }
    }
    xml.write_event(Event::End(BytesEnd::new(element)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    #[test]
    fn test_inline_content_ids() {
        let content = inline_content(&tokenize("Hi {{name}}, {{count}} new"));
        assert_eq!(
            content,
            vec![
                Inline::Text("Hi ".to_string()),
                Inline::Ph {
                    id: 1,
                    name: "name".to_string()
                },
                Inline::Text(", ".to_string()),
                Inline::Ph {
                    id: 2,
                    name: "count".to_string()
                },
                Inline::Text(" new".to_string()),
            ]
        );
    }

    #[test]
    fn test_document_structure() {
        let mut doc = Document::new("en", "tw");
        doc.push(
            "greeting",
            inline_content(&tokenize("Hello {{name}}!")),
            inline_content(&tokenize("哈囉 {{name}}!")),
        );
        let text = doc.render().unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(text.contains(
            "<file original=\"messages\" source-language=\"en\" \
             target-language=\"tw\" datatype=\"plaintext\">"
        ));
        assert!(text.contains("<trans-unit id=\"greeting\">"));
        assert!(text.contains(
            "<source>Hello <ph id=\"1\" equiv-text=\"{name}\">{name}</ph>!</source>"
        ));
        assert!(text.contains(
            "<target>哈囉 <ph id=\"1\" equiv-text=\"{name}\">{name}</ph>!</target>"
        ));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let mut doc = Document::new("en", "de");
        doc.push(
            "cmp",
            inline_content(&tokenize("a < b & c")),
            inline_content(&tokenize("a < b & c")),
        );
        assert!(doc.render().unwrap().contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_one_sided_units_skipped() {
        let mut doc = Document::new("en", "de");
        doc.push("blank", Vec::new(), Vec::new());
        doc.push("untranslated", inline_content(&tokenize("Hello")), Vec::new());
        doc.push("sourceless", Vec::new(), inline_content(&tokenize("Hallo")));
        assert!(doc.is_empty());
    }
}
