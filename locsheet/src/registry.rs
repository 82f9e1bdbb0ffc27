//! Key uniqueness tracking across one conversion run.
//!
//! Flat formats register plain keys (Android keys are scoped by folder);
//! hierarchical formats register dot-paths and distinguish the three ways a
//! path can collide with an already-registered one. All collisions are
//! warnings for the caller; the incoming value is discarded, never merged.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use crate::formats::Format;

/// How a hierarchical key collided with previously registered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathConflict {
    /// The exact path was already registered as a leaf.
    DuplicateLeaf,
    /// A prefix of the path is already a leaf value.
    LeafAsParent,
    /// The full path is already a parent of deeper keys.
    ParentAsLeaf,
}

impl Display for PathConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathConflict::DuplicateLeaf => write!(f, "duplicate leaf"),
            PathConflict::LeafAsParent => write!(f, "existing leaf used as parent"),
            PathConflict::ParentAsLeaf => write!(f, "existing parent used as leaf"),
        }
    }
}

#[derive(Debug)]
enum Node {
    Leaf,
    Branch(HashMap<String, Node>),
}

/// Per-format key registry, owned by the orchestrator for one run.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    seen: HashMap<(Format, String), HashSet<String>>,
    trees: HashMap<(Format, String), HashMap<String, Node>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flat key within a (format, scope) namespace. Returns
    /// `false` if the key was already registered; the caller logs a warning
    /// and skips the value.
    pub fn register(&mut self, format: Format, scope: &str, key: &str) -> bool {
        self.seen
            .entry((format, scope.to_string()))
            .or_default()
            .insert(key.to_string())
    }

    /// Registers a hierarchical key path within a (format, scope) namespace.
    /// Returns the conflict kind if the path collides; on conflict nothing is
    /// recorded and the caller discards the incoming value.
    pub fn register_path(
        &mut self,
        format: Format,
        scope: &str,
        path: &[&str],
    ) -> Option<PathConflict> {
        let mut children = self
            .trees
            .entry((format, scope.to_string()))
            .or_default();
        for (i, part) in path.iter().enumerate() {
            if i + 1 == path.len() {
                return match children.get(*part) {
                    Some(Node::Leaf) => Some(PathConflict::DuplicateLeaf),
                    Some(Node::Branch(_)) => Some(PathConflict::ParentAsLeaf),
                    None => {
                        children.insert(part.to_string(), Node::Leaf);
                        None
                    }
                };
            }
            children = match children
                .entry(part.to_string())
                .or_insert_with(|| Node::Branch(HashMap::new()))
            {
                Node::Branch(next) => next,
                Node::Leaf => return Some(PathConflict::LeafAsParent),
            };
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_flat_key() {
        let mut registry = KeyRegistry::new();
        assert!(registry.register(Format::Apple, "", "greeting"));
        assert!(!registry.register(Format::Apple, "", "greeting"));
    }

    #[test]
    fn test_scoped_flat_keys_do_not_collide() {
        let mut registry = KeyRegistry::new();
        assert!(registry.register(Format::Android, "app/", "greeting"));
        assert!(registry.register(Format::Android, "lib/", "greeting"));
        assert!(!registry.register(Format::Android, "app/", "greeting"));
    }

    #[test]
    fn test_formats_are_independent() {
        let mut registry = KeyRegistry::new();
        assert!(registry.register(Format::Apple, "", "greeting"));
        assert!(registry.register(Format::Xliff, "", "greeting"));
    }

    #[test]
    fn test_duplicate_leaf() {
        let mut registry = KeyRegistry::new();
        assert!(registry
            .register_path(Format::JsonTree, "i18n", &["app", "title"])
            .is_none());
        assert_eq!(
            registry.register_path(Format::JsonTree, "i18n", &["app", "title"]),
            Some(PathConflict::DuplicateLeaf)
        );
    }

    #[test]
    fn test_leaf_used_as_parent() {
        let mut registry = KeyRegistry::new();
        assert!(registry
            .register_path(Format::JsonTree, "i18n", &["app", "title"])
            .is_none());
        assert_eq!(
            registry.register_path(Format::JsonTree, "i18n", &["app", "title", "short"]),
            Some(PathConflict::LeafAsParent)
        );
    }

    #[test]
    fn test_parent_used_as_leaf() {
        let mut registry = KeyRegistry::new();
        assert!(registry
            .register_path(Format::JsonTree, "i18n", &["app", "title", "short"])
            .is_none());
        assert_eq!(
            registry.register_path(Format::JsonTree, "i18n", &["app", "title"]),
            Some(PathConflict::ParentAsLeaf)
        );
    }

    #[test]
    fn test_sibling_leaves_are_fine() {
        let mut registry = KeyRegistry::new();
        assert!(registry
            .register_path(Format::LanguageJson, "", &["app", "title"])
            .is_none());
        assert!(registry
            .register_path(Format::LanguageJson, "", &["app", "subtitle"])
            .is_none());
    }

    #[test]
    fn test_scopes_are_independent_for_paths() {
        let mut registry = KeyRegistry::new();
        assert!(registry
            .register_path(Format::JsonTree, "a", &["k"])
            .is_none());
        assert!(registry
            .register_path(Format::JsonTree, "b", &["k"])
            .is_none());
    }
}
