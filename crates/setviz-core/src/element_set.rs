use crate::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Upper bound on the number of named sets a single calculation can carry.
pub const MAX_SETS: usize = 3;

/// A collection of unique, trimmed, non-empty element labels.
///
/// Iteration follows first insertion. Equality is set equality, so two sets with the same labels
/// in a different order compare equal.
///
/// Every way in (parsing, [`ElementSet::insert`], `collect`, deserialization) applies the same
/// normalization, so a stored label is never blank, padded or comma-bearing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ElementSet(IndexSet<String>);

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes comma-separated free text: split on `,`, trim each token, drop empty tokens,
    /// dedupe. Never fails; blank input yields an empty set.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        set.insert(raw);
        set
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// Adds the labels of `text` under the [`ElementSet::parse`] rules. Returns whether any label
    /// was new.
    pub fn insert(&mut self, text: &str) -> bool {
        let mut added = false;
        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !self.0.contains(token) {
                self.0.insert(token.to_string());
                added = true;
            }
        }
        added
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn union(&self, other: &ElementSet) -> ElementSet {
        self.0.union(&other.0).cloned().collect()
    }

    pub fn intersection(&self, other: &ElementSet) -> ElementSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &ElementSet) -> ElementSet {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Labels joined with `", "` in iteration order.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

impl FromIterator<String> for ElementSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(&label);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for ElementSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl<'de> Deserialize<'de> for ElementSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Vec::<String>::deserialize(deserializer)?.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.joined())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSet {
    pub index: usize,
    pub labels: ElementSet,
}

impl NamedSet {
    /// Display name: `A`, `B`, `C`, ...
    pub fn name(&self) -> char {
        set_name(self.index)
    }
}

pub fn set_name(index: usize) -> char {
    char::from(b'A' + (index as u8))
}

/// The ordered input sets of one calculation. Position `i` is set `'A' + i`; positions past the
/// end are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSets(Vec<NamedSet>);

impl NamedSets {
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        if raw.len() > MAX_SETS {
            return Err(Error::TooManySets { count: raw.len() });
        }
        Ok(Self(
            raw.iter()
                .enumerate()
                .map(|(index, text)| NamedSet {
                    index,
                    labels: ElementSet::parse(text.as_ref()),
                })
                .collect(),
        ))
    }

    pub fn from_sets(sets: impl IntoIterator<Item = ElementSet>) -> Result<Self> {
        let sets: Vec<NamedSet> = sets
            .into_iter()
            .enumerate()
            .map(|(index, labels)| NamedSet { index, labels })
            .collect();
        if sets.len() > MAX_SETS {
            return Err(Error::TooManySets { count: sets.len() });
        }
        Ok(Self(sets))
    }

    pub fn get(&self, index: usize) -> Option<&ElementSet> {
        self.0.get(index).map(|s| &s.labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSet> {
        self.0.iter()
    }

    /// Keeps only the first `count` sets.
    pub fn truncated(mut self, count: usize) -> Self {
        self.0.truncate(count);
        self
    }

    /// Union of every present set.
    pub fn union_all(&self) -> ElementSet {
        let mut out = ElementSet::new();
        for set in &self.0 {
            for label in set.labels.iter() {
                out.insert(label);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_drops_empty_and_dedupes() {
        let set = ElementSet::parse(" a, b ,,a ,  , c");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_blank_input_is_empty() {
        assert!(ElementSet::parse("   ").is_empty());
        assert!(ElementSet::parse("").is_empty());
        assert!(ElementSet::parse(" , ,").is_empty());
    }

    #[test]
    fn labels_are_case_sensitive() {
        let set = ElementSet::parse("a,A");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        assert_eq!(ElementSet::parse("1,2,3"), ElementSet::parse("3,1,2"));
    }

    #[test]
    fn display_brackets_labels() {
        assert_eq!(ElementSet::parse("x, y").to_string(), "[x, y]");
        assert_eq!(ElementSet::new().to_string(), "[]");
    }

    #[test]
    fn every_constructor_normalizes_labels() {
        let collected: ElementSet = ["  x ", "", "y, z", "x", " , "].into_iter().collect();
        assert_eq!(collected.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);

        let mut set = ElementSet::new();
        assert!(!set.insert("   "));
        assert!(set.insert(" q ,r"));
        assert!(!set.insert("q"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["q", "r"]);

        let decoded: ElementSet = serde_json::from_str(r#"["a ", "", "b,c"]"#).unwrap();
        assert_eq!(decoded, ElementSet::parse("a, b, c"));
        assert!(!decoded.contains(""));
    }

    #[test]
    fn named_sets_reject_a_fourth_set() {
        let err = NamedSets::from_raw(&["a", "b", "c", "d"]).unwrap_err();
        assert!(matches!(err, Error::TooManySets { count: 4 }));
    }

    #[test]
    fn named_sets_expose_absent_positions_as_none() {
        let sets = NamedSets::from_raw(&["a", "b"]).unwrap();
        assert!(sets.get(1).is_some());
        assert!(sets.get(2).is_none());
        assert_eq!(sets.iter().map(NamedSet::name).collect::<String>(), "AB");
    }
}
