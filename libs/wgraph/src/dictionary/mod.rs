use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;

use ahash::RandomState;
use log::trace;

use crate::{Error, Result};

mod array;

pub use array::ArrayDictionary;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_LOAD_FACTOR: f64 = 3.0;

/// Fixed seeds, so that two dictionaries filled in the same order iterate in the same order.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

fn default_hasher() -> RandomState {
    RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3])
}

/// Separately chained hash table.
///
/// Every bucket is an [`ArrayDictionary`]. The bucket array doubles and all entries are
/// rehashed whenever `len / capacity` has reached the load factor at the time of a `put`.
#[derive(Clone)]
pub struct ChainedHashDictionary<K, V, S = RandomState> {
    chains: Vec<ArrayDictionary<K, V>>,
    size: usize,
    load_factor: f64,
    hasher: S,
}

impl<K, V> ChainedHashDictionary<K, V, RandomState> {
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, default_hasher())
    }

    pub fn with_load_factor(load_factor: f64) -> Result<Self> {
        Self::with_load_factor_and_hasher(load_factor, default_hasher())
    }
}

impl<K, V> Default for ChainedHashDictionary<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashDictionary<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, hasher)
    }

    pub fn with_load_factor_and_hasher(load_factor: f64, hasher: S) -> Result<Self> {
        if !(load_factor > 0.0) {
            return Err(Error::InvalidArgument("load factor must be positive"));
        }
        Ok(Self::with_capacity_and_hasher(DEFAULT_CAPACITY, load_factor, hasher))
    }

    fn with_capacity_and_hasher(capacity: usize, load_factor: f64, hasher: S) -> Self {
        Self {
            chains: Self::make_chains(capacity),
            size: 0,
            load_factor,
            hasher,
        }
    }

    fn make_chains(capacity: usize) -> Vec<ArrayDictionary<K, V>> {
        (0..capacity).map(|_| ArrayDictionary::new()).collect()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.chains.len()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            chains: self.chains.iter(),
            current: (&[] as &[(K, V)]).iter(),
            remaining: self.size,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> ChainedHashDictionary<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_of(&self, key: &K, capacity: usize) -> usize {
        (self.hasher.hash_one(key) % capacity as u64) as usize
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.chains[self.bucket_of(key, self.chains.len())].get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.bucket_of(key, self.chains.len());
        self.chains[idx].get_mut(key)
    }

    pub fn get_or_default(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.chains[self.bucket_of(key, self.chains.len())].get_or_default(key, default)
    }

    /// Inserts or overwrites the value stored under `key`, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.size as f64 / self.chains.len() as f64 >= self.load_factor {
            self.resize();
        }

        let idx = self.bucket_of(&key, self.chains.len());
        let previous = self.chains[idx].put(key, value);
        if previous.is_none() {
            self.size += 1;
        }
        previous
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.bucket_of(key, self.chains.len());
        let value = self.chains[idx].remove(key)?;
        self.size -= 1;
        Ok(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.chains[self.bucket_of(key, self.chains.len())].contains_key(key)
    }

    fn resize(&mut self) {
        let capacity = self.chains.len() * 2;
        trace!("resizing dictionary of {} entries to {} buckets", self.size, capacity);

        let old_chains = std::mem::replace(&mut self.chains, Self::make_chains(capacity));
        for (key, value) in old_chains.into_iter().flat_map(ArrayDictionary::into_pairs) {
            let idx = self.bucket_of(&key, capacity);
            self.chains[idx].put(key, value);
        }
    }
}

/// Iterator over the pairs of a [`ChainedHashDictionary`], bucket by bucket.
pub struct Iter<'a, K, V> {
    chains: std::slice::Iter<'a, ArrayDictionary<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some((k, v)) = self.current.next() {
                self.remaining -= 1;
                return Some((k, v));
            }
            self.current = self.chains.next()?.as_slice().iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashDictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashDictionary<K, V, S> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ChainedHashDictionary<K, V, RandomState> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut dict = Self::new();
        dict.extend(iter);
        dict
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn put_get_remove() {
        let mut dict = ChainedHashDictionary::new();
        dict.put("a".to_string(), 1);
        dict.put("b".to_string(), 2);
        assert_eq!(dict.get(&"a".to_string()), Ok(&1));
        assert_eq!(dict.put("a".to_string(), 10), Some(1));
        assert_eq!(dict.len(), 2);

        assert_eq!(dict.remove(&"a".to_string()), Ok(10));
        assert!(!dict.contains_key(&"a".to_string()));
        assert_eq!(dict.get(&"a".to_string()), Err(Error::NoSuchKey));
        assert_eq!(dict.remove(&"a".to_string()), Err(Error::NoSuchKey));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get_or_default(&"a".to_string(), 7), 7);
        assert_eq!(dict.get_or_default(&"b".to_string(), 7), 2);
    }

    #[test]
    fn rejects_non_positive_load_factor() {
        assert!(ChainedHashDictionary::<u32, u32>::with_load_factor(0.0).is_err());
        assert!(ChainedHashDictionary::<u32, u32>::with_load_factor(f64::NAN).is_err());
        assert!(ChainedHashDictionary::<u32, u32>::with_load_factor(0.5).is_ok());
    }

    #[test]
    fn resize_keeps_every_entry() {
        let mut dict = ChainedHashDictionary::with_load_factor(0.75).unwrap();
        for i in 0..1000u32 {
            dict.put(i, i * 2);
        }
        assert!(dict.capacity() > DEFAULT_CAPACITY);
        assert_eq!(dict.len(), 1000);
        assert_eq!(dict.iter().count(), 1000);
        for i in 0..1000u32 {
            assert_eq!(dict.get(&i), Ok(&(i * 2)));
        }
        let mut keys: Vec<u32> = dict.keys().copied().collect();
        keys.sort();
        itertools::assert_equal(keys, 0..1000u32);
    }

    #[test]
    fn doubles_once_load_factor_is_reached() {
        let mut dict = ChainedHashDictionary::new();
        for i in 0..300u32 {
            dict.put(i, ());
        }
        assert_eq!(dict.capacity(), DEFAULT_CAPACITY);
        // size / capacity == 3.0 at this point
        dict.put(300, ());
        assert_eq!(dict.capacity(), 2 * DEFAULT_CAPACITY);
        assert_eq!(dict.len(), 301);
    }

    #[test]
    fn iteration_is_stable_without_mutation() {
        let dict: ChainedHashDictionary<u32, u32> = (0..50).map(|i| (i, i)).collect();
        let first: Vec<_> = dict.iter().collect();
        let second: Vec<_> = (&dict).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(dict.iter().len(), 50);
    }

    #[test]
    fn random_operations_match_std_hashmap() {
        let mut rand = Pcg64::seed_from_u64(42);
        let mut dict = ChainedHashDictionary::with_load_factor(1.0).unwrap();
        let mut reference = HashMap::new();

        for _ in 0..5000 {
            let key = rand.gen_range(0..400u32);
            if rand.gen_bool(0.65) {
                let value = rand.gen::<u64>();
                assert_eq!(dict.put(key, value), reference.insert(key, value));
            } else {
                match reference.remove(&key) {
                    Some(value) => assert_eq!(dict.remove(&key), Ok(value)),
                    None => assert_eq!(dict.remove(&key), Err(Error::NoSuchKey)),
                }
            }
            assert_eq!(dict.len(), reference.len());
        }

        assert_eq!(dict.iter().count(), reference.len());
        for (key, value) in dict.iter() {
            assert_eq!(reference.get(key), Some(value));
        }
    }
}
