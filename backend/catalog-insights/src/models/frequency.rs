use super::RankedEntry;
use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered frequency table.
///
/// The order in which keys are first seen is part of the contract: ranking
/// sorts by count descending and breaks ties by first-seen order, so the
/// table has to remember it. A plain `HashMap` cannot, hence the `Vec` of
/// entries with a position index on the side.
///
/// Merging is a key-wise sum. For any split of an input sequence into A and
/// B, aggregating A then merging in the aggregate of B yields the same table
/// as aggregating the concatenation, which is what makes the reduction safe
/// to shard.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    positions: HashMap<K, usize>,
}

/// `positions` is derived from `entries`, so the entries alone define
/// equality (counts and first-seen order).
impl<K: PartialEq> PartialEq for FrequencyTable<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of contributing occurrences.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn get(&self, key: &K) -> u64 {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Add `n` to the key's count, registering the key at the end of the
    /// insertion order if it is new.
    pub fn add(&mut self, key: K, n: u64) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Record a single occurrence.
    pub fn tally(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Key-wise sum. Keys unseen by `self` are appended in `other`'s order,
    /// which preserves the first-seen-across-both-inputs invariant.
    pub fn merge(&mut self, other: &FrequencyTable<K>) {
        for (key, count) in &other.entries {
            self.add(key.clone(), *count);
        }
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// All entries ranked by count descending; ties keep first-seen order
    /// (stable sort), never compare keys.
    pub fn ranked(&self) -> Vec<RankedEntry<K>> {
        let mut ordered: Vec<(K, u64)> = self.entries.clone();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered
            .into_iter()
            .enumerate()
            .map(|(idx, (key, count))| RankedEntry {
                key,
                count,
                rank: idx + 1,
            })
            .collect()
    }
}

impl<K> FromIterator<K> for FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.tally(key);
        }
        table
    }
}

/// Collect a stream of `(key, count)` contributions, as emitted by the
/// dimension extractors.
impl<K> FromIterator<(K, u64)> for FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (key, n) in iter {
            table.add(key, n);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_occurrence() {
        let mut table = FrequencyTable::new();
        table.tally("Drama");
        table.tally("Comedy");
        table.tally("Drama");

        assert_eq!(table.get(&"Drama"), 2);
        assert_eq!(table.get(&"Comedy"), 1);
        assert_eq!(table.get(&"Horror"), 0);
        assert_eq!(table.total(), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let mut table = FrequencyTable::new();
        table.tally("Drama");
        table.tally("Comedy");
        table.tally("Drama");
        table.tally("Comedy");

        let ranked = table.ranked();
        assert_eq!(ranked[0].key, "Drama");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].key, "Comedy");
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn merge_equals_aggregate_of_concatenation() {
        let first = ["a", "b", "a"];
        let second = ["c", "b", "b"];

        let mut merged: FrequencyTable<&str> = first.iter().copied().collect();
        let other: FrequencyTable<&str> = second.iter().copied().collect();
        merged.merge(&other);

        let whole: FrequencyTable<&str> =
            first.iter().chain(second.iter()).copied().collect();

        assert_eq!(merged, whole);
    }

    #[test]
    fn equality_ignores_how_counts_were_built_up() {
        let mut a = FrequencyTable::new();
        a.add("x", 2);
        a.add("y", 1);

        let b: FrequencyTable<&str> = ["x", "y", "x"].into_iter().collect();
        assert_eq!(a, b);

        let c: FrequencyTable<&str> = ["y", "x", "x"].into_iter().collect();
        // Same counts, different first-seen order: not equal.
        assert_ne!(a, c);
    }

    #[test]
    fn merge_preserves_first_seen_order() {
        let mut left: FrequencyTable<&str> = ["x", "y"].into_iter().collect();
        let right: FrequencyTable<&str> = ["z", "y"].into_iter().collect();
        left.merge(&right);

        let keys: Vec<&str> = left.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }
}
