//! Computed table for operation memoization.
//!
//! The unique table (see [`NodeStore`][crate::store::NodeStore]) guarantees
//! that equal nodes are shared; this cache guarantees that equal *calls* are
//! not recomputed. Without it `choice` stays correct but may re-derive the
//! same sub-result along exponentially many call paths.

use std::collections::HashMap;
use std::hash::Hash;

use crate::reference::Ref;
use crate::types::Rank;

/// Key of a memoized operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OpKey {
    Choice(Ref, Ref, Ref),
    Substitute(Ref, Rank, bool),
}

/// A cache backed by [HashMap], counting hits and misses.
pub struct Cache<K, V> {
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new(14)
    }
}

impl<K, V> Cache<K, V> {
    /// Creates a cache pre-sized for `2^bits` entries.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        Self {
            map: HashMap::with_capacity(1 << bits),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drops all entries and resets the statistics.
    pub fn clear(&mut self) {
        self.map.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic() {
        let mut cache = Cache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        cache.insert((3, 4), 99);

        assert_eq!(cache.get(&(1, 2)), Some(42));
        assert_eq!(cache.get(&(3, 4)), Some(99));
        assert_eq!(cache.get(&(5, 6)), None);

        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = Cache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        assert_eq!(cache.get(&(1, 2)), Some(42));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.get(&(1, 2)), None);
    }

    #[test]
    fn test_op_keys_are_distinct() {
        let mut cache = Cache::<OpKey, Ref>::new(4);
        let a = Ref::new(1, 2);
        let b = Ref::new(1, 3);
        cache.insert(OpKey::Choice(a, b, a), b);
        assert_eq!(cache.get(&OpKey::Choice(a, b, a)), Some(b));
        assert_eq!(cache.get(&OpKey::Choice(a, a, b)), None);
        assert_eq!(cache.get(&OpKey::Substitute(a, Rank::new(0), true)), None);
    }
}
