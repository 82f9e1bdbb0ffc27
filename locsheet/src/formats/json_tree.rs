//! Generic JSON tree emitter.
//!
//! Dotted keys become nested objects under their language code. Placeholders
//! arrive already rewrapped as `{name}` slots; escaping is purely structural
//! and left to `serde_json`.

use serde_json::{Map, Value};

use crate::error::Error;

/// One nested JSON document in progress.
#[derive(Debug, Default, Clone)]
pub struct JsonTree {
    root: Map<String, Value>,
}

impl JsonTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a leaf value under a key path, creating intermediate objects
    /// as needed. Path conflicts are screened by the key registry before this
    /// is called; a conflicting insert is dropped here as a last resort.
    pub fn insert(&mut self, path: &[&str], value: &str) {
        let Some((leaf, parents)) = path.split_last() else {
            return;
        };
        let mut node = &mut self.root;
        for part in parents {
            match node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
            {
                Value::Object(next) => node = next,
                _ => return,
            }
        }
        node.entry(leaf.to_string())
            .or_insert_with(|| Value::String(value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Merges another tree into this one. Existing values win; the dotted
    /// paths of dropped incoming values are returned for diagnostics.
    pub fn merge_from(&mut self, other: &JsonTree) -> Vec<String> {
        let mut dropped = Vec::new();
        merge_maps(&mut self.root, &other.root, &mut Vec::new(), &mut dropped);
        dropped
    }

    pub fn render(&self) -> Result<String, Error> {
        let mut text = serde_json::to_string_pretty(&self.root)?;
        text.push('\n');
        Ok(text)
    }
}

fn merge_maps(
    into: &mut Map<String, Value>,
    from: &Map<String, Value>,
    path: &mut Vec<String>,
    dropped: &mut Vec<String>,
) {
    for (key, incoming) in from {
        path.push(key.clone());
        match into.get_mut(key) {
            None => {
                into.insert(key.clone(), incoming.clone());
            }
            Some(Value::Object(existing)) if incoming.is_object() => {
                if let Value::Object(incoming) = incoming {
                    merge_maps(existing, incoming, path, dropped);
                }
            }
            Some(_) => dropped.push(path.join(".")),
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_insert() {
        let mut tree = JsonTree::new();
        tree.insert(&["en", "app", "title"], "My App");
        tree.insert(&["en", "app", "subtitle"], "Beta");
        tree.insert(&["tw", "app", "title"], "我的應用");
        let text = tree.render().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["en"]["app"]["title"], "My App");
        assert_eq!(value["en"]["app"]["subtitle"], "Beta");
        assert_eq!(value["tw"]["app"]["title"], "我的應用");
    }

    #[test]
    fn test_insert_never_overwrites() {
        let mut tree = JsonTree::new();
        tree.insert(&["en", "k"], "first");
        tree.insert(&["en", "k"], "second");
        let value: Value = serde_json::from_str(&tree.render().unwrap()).unwrap();
        assert_eq!(value["en"]["k"], "first");
    }

    #[test]
    fn test_merge_existing_wins() {
        let mut base = JsonTree::new();
        base.insert(&["en", "k"], "kept");
        base.insert(&["en", "only_base"], "b");
        let mut incoming = JsonTree::new();
        incoming.insert(&["en", "k"], "dropped");
        incoming.insert(&["en", "only_incoming"], "i");
        let dropped = base.merge_from(&incoming);
        assert_eq!(dropped, vec!["en.k".to_string()]);
        let value: Value = serde_json::from_str(&base.render().unwrap()).unwrap();
        assert_eq!(value["en"]["k"], "kept");
        assert_eq!(value["en"]["only_incoming"], "i");
    }

    #[test]
    fn test_merge_leaf_vs_subtree_is_dropped() {
        let mut base = JsonTree::new();
        base.insert(&["en", "k"], "leaf");
        let mut incoming = JsonTree::new();
        incoming.insert(&["en", "k", "deep"], "subtree");
        let dropped = base.merge_from(&incoming);
        assert_eq!(dropped, vec!["en.k".to_string()]);
    }
}
