//! Highlighted connections.

use std::collections::BTreeSet;

use crate::graph::{Edge, Graph};

/// A set of unordered node-id pairs. Membership is symmetric:
/// `contains(a, b) == contains(b, a)` for every pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    pairs: BTreeSet<(String, String)>,
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the pair was not present.
    pub fn insert(&mut self, a: &str, b: &str) -> bool {
        self.pairs.insert(key(a, b))
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        // Ordered key so a single lookup covers both directions.
        if a <= b {
            self.pairs.contains(&(a.to_string(), b.to_string()))
        } else {
            self.pairs.contains(&(b.to_string(), a.to_string()))
        }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for (a, b) in pairs {
            set.insert(a.as_ref(), b.as_ref());
        }
        set
    }

    /// Consecutive pairs of a node path.
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Self {
        Self::from_paths(std::iter::once(path))
    }

    pub fn from_paths<'a, I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a [S]>,
        S: AsRef<str> + 'a,
    {
        let mut set = Self::new();
        for path in paths {
            for step in path.windows(2) {
                set.insert(step[0].as_ref(), step[1].as_ref());
            }
        }
        set
    }

    /// Merge another set into this one.
    pub fn extend(&mut self, other: HighlightSet) {
        self.pairs.extend(other.pairs);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in canonical (lexicographically ordered) form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Whether an edge of `graph` is highlighted.
    pub fn contains_edge(&self, graph: &Graph, edge: &Edge) -> bool {
        let (a, b) = graph.endpoint_names(edge);
        self.contains(a, b)
    }

    /// Pairs that do not correspond to any edge of `graph`.
    pub fn unknown_pairs<'a>(&'a self, graph: &Graph) -> Vec<(&'a str, &'a str)> {
        let present: BTreeSet<(String, String)> = graph
            .edges()
            .iter()
            .map(|e| {
                let (a, b) = graph.endpoint_names(e);
                key(a, b)
            })
            .collect();
        self.pairs
            .iter()
            .filter(|p| !present.contains(*p))
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<(S, S)> for HighlightSet {
    fn from_iter<T: IntoIterator<Item = (S, S)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn path_yields_consecutive_pairs() {
        let set = HighlightSet::from_path(&["s", "a", "t"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a", "s"));
        assert!(set.contains("t", "a"));
        assert!(!set.contains("s", "t"));
    }

    #[test]
    fn short_paths_contribute_nothing() {
        let empty: [&str; 0] = [];
        assert!(HighlightSet::from_path(&empty).is_empty());
        assert!(HighlightSet::from_path(&["solo"]).is_empty());
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let set: HighlightSet = vec![("a", "b"), ("b", "a")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    proptest! {
        #[test]
        fn membership_is_symmetric(
            pairs in proptest::collection::vec(("[a-e]{1,3}", "[a-e]{1,3}"), 0..12),
            a in "[a-e]{1,3}",
            b in "[a-e]{1,3}",
        ) {
            let set = HighlightSet::from_pairs(pairs.iter().map(|(x, y)| (x.as_str(), y.as_str())));
            prop_assert_eq!(set.contains(&a, &b), set.contains(&b, &a));
            for (x, y) in &pairs {
                prop_assert!(set.contains(y, x));
            }
        }
    }
}
