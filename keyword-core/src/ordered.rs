//! Insertion-ordered string set shared by the noun, dictionary and filename stages.

use std::collections::HashSet;

/// A set of strings that remembers first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` if absent. Returns `true` when it was newly added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    /// Keeps only the values for which `keep` returns `true`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let seen = &mut self.seen;
        self.items.retain(|item| {
            let kept = keep(item);
            if !kept {
                seen.remove(item);
            }
            kept
        });
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl<S: Into<String>> Extend<S> for OrderedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_occurrence_order() {
        let mut set = OrderedSet::new();
        assert!(set.insert("보고서"));
        assert!(set.insert("API"));
        assert!(!set.insert("보고서"));
        assert_eq!(set.into_vec(), vec!["보고서", "API"]);
    }

    #[test]
    fn test_retain_forgets_removed_values() {
        let mut set: OrderedSet = ["a", "b", "c"].into_iter().collect();
        set.retain(|v| v != "b");
        assert!(!set.contains("b"));
        assert!(set.insert("b"));
        assert_eq!(set.into_vec(), vec!["a", "c", "b"]);
    }
}
