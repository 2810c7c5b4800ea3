//! Vocabulary: bijection between raw identifiers and dense indices.
//!
//! Each fitted model owns two of these (users and items). Indices are
//! assigned in first-seen order, which makes the mapping deterministic for
//! a fixed input ordering; the structure is never mutated after fit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps raw string identifiers to dense indices `[0, n)` and back.
///
/// # Examples
///
/// ```
/// use sugerir::vocab::Vocabulary;
///
/// let vocab = Vocabulary::from_ids(["b", "a", "b", "c"]);
/// assert_eq!(vocab.len(), 3);
/// assert_eq!(vocab.index("b"), Some(0)); // first seen first
/// assert_eq!(vocab.index("c"), Some(2));
/// assert_eq!(vocab.id(1), Some("a"));
/// assert_eq!(vocab.index("d"), None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    ids: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from an identifier stream, assigning indices in
    /// first-seen order and ignoring repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for id in ids {
            let id = id.as_ref();
            if !vocab.index.contains_key(id) {
                vocab.index.insert(id.to_string(), vocab.ids.len());
                vocab.ids.push(id.to_string());
            }
        }
        vocab
    }

    /// Returns the dense index for a raw identifier, or `None` if unseen.
    #[must_use]
    pub fn index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the raw identifier for a dense index, or `None` if out of range.
    #[must_use]
    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Whether the identifier was observed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over raw identifiers in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let vocab = Vocabulary::from_ids(["x", "z", "y", "z", "x"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index("x"), Some(0));
        assert_eq!(vocab.index("z"), Some(1));
        assert_eq!(vocab.index("y"), Some(2));
    }

    #[test]
    fn test_roundtrip() {
        let vocab = Vocabulary::from_ids(["a", "b", "c"]);
        for idx in 0..vocab.len() {
            let id = vocab.id(idx).expect("index in range");
            assert_eq!(vocab.index(id), Some(idx));
        }
    }

    #[test]
    fn test_unseen_identifier() {
        let vocab = Vocabulary::from_ids(["a"]);
        assert_eq!(vocab.index("b"), None);
        assert_eq!(vocab.id(5), None);
        assert!(!vocab.contains("b"));
    }

    #[test]
    fn test_empty() {
        let vocab = Vocabulary::from_ids(Vec::<String>::new());
        assert!(vocab.is_empty());
        assert_eq!(vocab.len(), 0);
    }

    #[test]
    fn test_iter_matches_index_order() {
        let vocab = Vocabulary::from_ids(["m", "k", "p"]);
        let ids: Vec<&str> = vocab.iter().collect();
        assert_eq!(ids, vec!["m", "k", "p"]);
    }
}
