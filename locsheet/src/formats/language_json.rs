//! Per-language JSON emitter.
//!
//! The same nested-object shape as the generic JSON tree, but split into one
//! document per language with the language level removed from the paths.

use std::collections::BTreeMap;

use crate::error::Error;

use super::json_tree::JsonTree;

/// Nested JSON documents keyed by language code.
#[derive(Debug, Default)]
pub struct LanguageDocs {
    docs: BTreeMap<String, JsonTree>,
}

impl LanguageDocs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: &str, path: &[&str], value: &str) {
        self.docs
            .entry(language.to_string())
            .or_default()
            .insert(path, value);
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Renders every non-empty language document, sorted by language code.
    pub fn render_all(&self) -> Result<Vec<(String, String)>, Error> {
        let mut rendered = Vec::with_capacity(self.docs.len());
        for (language, tree) in &self.docs {
            if tree.is_empty() {
                continue;
            }
            rendered.push((language.clone(), tree.render()?));
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_one_document_per_language() {
        let mut docs = LanguageDocs::new();
        docs.insert("en", &["app", "title"], "My App");
        docs.insert("tw", &["app", "title"], "我的應用");
        let rendered = docs.render_all().unwrap();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].0, "en");
        assert_eq!(rendered[1].0, "tw");
        let en: Value = serde_json::from_str(&rendered[0].1).unwrap();
        assert_eq!(en["app"]["title"], "My App");
    }

    #[test]
    fn test_empty_collection() {
        let docs = LanguageDocs::new();
        assert!(docs.is_empty());
        assert!(docs.render_all().unwrap().is_empty());
    }
}
