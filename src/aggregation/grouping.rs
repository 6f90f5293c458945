// Entity grouping: canonical IP pairs and key partitioning.

use std::collections::BTreeMap;

/// Unordered pair of addresses. Built by sorting the two sides, so traffic
/// A→B and B→A lands in the same group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpPair {
    a: String,
    b: String,
}

impl IpPair {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        let (src, dst) = (src.into(), dst.into());
        if src <= dst {
            Self { a: src, b: dst }
        } else {
            Self { a: dst, b: src }
        }
    }

    /// Lexicographically smaller address.
    pub fn a(&self) -> &str {
        &self.a
    }

    /// Lexicographically larger address.
    pub fn b(&self) -> &str {
        &self.b
    }
}

/// Partitions `items` by `key`. Every item lands in exactly one group and
/// input order is kept inside each group. Groups iterate in key order.
pub fn group_by_key<K, T, I, F>(items: I, key: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}
