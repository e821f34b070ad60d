//! Venn region partitioning.
//!
//! A region is identified by the exact combination of input sets its elements belong to. For `n`
//! sets there are `2^n - 1` such combinations; each one is encoded as a membership bitmask where
//! bit `i` stands for set `'A' + i`.

use crate::element_set::{ElementSet, NamedSets};
use crate::{Error, SetCount};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegionKey {
    #[serde(rename = "onlyA")]
    OnlyA,
    #[serde(rename = "onlyB")]
    OnlyB,
    #[serde(rename = "onlyC")]
    OnlyC,
    #[serde(rename = "intersectionAB")]
    IntersectionAB,
    #[serde(rename = "intersectionAC")]
    IntersectionAC,
    #[serde(rename = "intersectionBC")]
    IntersectionBC,
    #[serde(rename = "intersectionABC")]
    IntersectionABC,
}

const TWO_SET_KEYS: [RegionKey; 3] = [
    RegionKey::OnlyA,
    RegionKey::OnlyB,
    RegionKey::IntersectionAB,
];

const THREE_SET_KEYS: [RegionKey; 7] = [
    RegionKey::OnlyA,
    RegionKey::OnlyB,
    RegionKey::OnlyC,
    RegionKey::IntersectionAB,
    RegionKey::IntersectionAC,
    RegionKey::IntersectionBC,
    RegionKey::IntersectionABC,
];

impl RegionKey {
    /// Region keys that exist for `count` sets, in canonical order.
    pub fn for_count(count: SetCount) -> &'static [RegionKey] {
        match count {
            SetCount::Two => &TWO_SET_KEYS,
            SetCount::Three => &THREE_SET_KEYS,
        }
    }

    /// Bit `i` is set iff the region lies inside set `i`.
    pub fn membership_mask(self) -> u8 {
        match self {
            Self::OnlyA => 0b001,
            Self::OnlyB => 0b010,
            Self::OnlyC => 0b100,
            Self::IntersectionAB => 0b011,
            Self::IntersectionAC => 0b101,
            Self::IntersectionBC => 0b110,
            Self::IntersectionABC => 0b111,
        }
    }

    pub fn from_membership_mask(mask: u8) -> Option<Self> {
        THREE_SET_KEYS
            .iter()
            .copied()
            .find(|k| k.membership_mask() == mask)
    }

    pub fn includes(self, set_index: usize) -> bool {
        set_index < 8 && self.membership_mask() & (1 << set_index) != 0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnlyA => "onlyA",
            Self::OnlyB => "onlyB",
            Self::OnlyC => "onlyC",
            Self::IntersectionAB => "intersectionAB",
            Self::IntersectionAC => "intersectionAC",
            Self::IntersectionBC => "intersectionBC",
            Self::IntersectionABC => "intersectionABC",
        }
    }
}

impl FromStr for RegionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        THREE_SET_KEYS
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownRegion { key: s.to_string() })
    }
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint regions of one calculation, keyed in canonical order.
///
/// Built once by [`partition`] and read-only afterwards. Every region owns its own set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionMap(IndexMap<RegionKey, ElementSet>);

impl RegionMap {
    pub fn get(&self, key: RegionKey) -> Option<&ElementSet> {
        self.0.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionKey, &ElementSet)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Regions that hold at least one element.
    pub fn non_empty(&self) -> impl Iterator<Item = (RegionKey, &ElementSet)> {
        self.iter().filter(|(_, set)| !set.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of elements across all regions.
    pub fn total_len(&self) -> usize {
        self.0.values().map(ElementSet::len).sum()
    }
}

/// Splits `sets` into the Venn regions for `count` sets.
///
/// The region for key `S` holds `(⋂ i∈S sets[i]) \ (⋃ j∉S sets[j])`. A set missing from `sets`
/// contributes nothing: regions that require it are empty and it removes nothing from others.
pub fn partition(sets: &NamedSets, count: SetCount) -> RegionMap {
    let n = count.get();
    let mut out = IndexMap::with_capacity(RegionKey::for_count(count).len());

    for &key in RegionKey::for_count(count) {
        out.insert(key, region_for(sets, n, key));
    }

    tracing::debug!(
        set_count = n,
        elements = out.values().map(ElementSet::len).sum::<usize>(),
        "partitioned venn regions"
    );
    RegionMap(out)
}

fn region_for(sets: &NamedSets, n: usize, key: RegionKey) -> ElementSet {
    let inside: Vec<usize> = (0..n).filter(|&i| key.includes(i)).collect();
    let outside: Vec<usize> = (0..n).filter(|&i| !key.includes(i)).collect();

    let Some(&first) = inside.first() else {
        return ElementSet::new();
    };
    let Some(seed) = sets.get(first) else {
        return ElementSet::new();
    };

    let mut required = Vec::with_capacity(inside.len());
    for &i in &inside[1..] {
        match sets.get(i) {
            Some(set) => required.push(set),
            None => return ElementSet::new(),
        }
    }
    let excluded: Vec<&ElementSet> = outside.iter().filter_map(|&j| sets.get(j)).collect();

    seed.iter()
        .filter(|label| required.iter().all(|s| s.contains(label)))
        .filter(|label| !excluded.iter().any(|s| s.contains(label)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_round_trip_through_keys() {
        for &key in RegionKey::for_count(SetCount::Three) {
            assert_eq!(RegionKey::from_membership_mask(key.membership_mask()), Some(key));
        }
        assert_eq!(RegionKey::from_membership_mask(0), None);
    }

    #[test]
    fn two_set_keys_never_include_c() {
        for &key in RegionKey::for_count(SetCount::Two) {
            assert!(!key.includes(2), "{key} includes C");
        }
    }

    #[test]
    fn region_keys_parse_from_their_names() {
        assert_eq!(
            "intersectionBC".parse::<RegionKey>().unwrap(),
            RegionKey::IntersectionBC
        );
        assert!("onlyD".parse::<RegionKey>().is_err());
    }
}
