use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of group indices, e.g. the groups whose assignment is filled.
///
/// Persisted as a plain sequence of integers. Decoding accepts any order and drops
/// duplicates; encoding always produces ascending order.
///
/// # Example
///
/// ```
/// use meanlab_engine::GroupIndexSet;
///
/// let set = GroupIndexSet::decode(vec![3, 0, 3]);
/// assert_eq!(set.encode(), vec![0, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndexSet(BTreeSet<usize>);

impl GroupIndexSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn encode(&self) -> Vec<usize> {
        self.0.iter().copied().collect()
    }

    #[must_use]
    pub fn decode(indices: Vec<usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.0.remove(&index)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for GroupIndexSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for GroupIndexSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encode().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GroupIndexSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<usize>::deserialize(deserializer).map(Self::decode)
    }
}
