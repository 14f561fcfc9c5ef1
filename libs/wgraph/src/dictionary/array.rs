use crate::{Error, Result};

/// Flat associative container storing its pairs in insertion order.
///
/// Lookups are linear, which is fine for the handful of entries a hash bucket holds.
#[derive(Clone, Debug)]
pub struct ArrayDictionary<K, V> {
    pairs: Vec<(K, V)>,
}

impl<K, V> Default for ArrayDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ArrayDictionary<K, V> {
    pub fn new() -> Self {
        Self { pairs: vec![] }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub(crate) fn as_slice(&self) -> &[(K, V)] {
        &self.pairs
    }

    pub(crate) fn into_pairs(self) -> std::vec::IntoIter<(K, V)> {
        self.pairs.into_iter()
    }
}

impl<K: PartialEq, V> ArrayDictionary<K, V> {
    fn index_of(&self, key: &K) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.index_of(key)
            .map(|idx| &self.pairs[idx].1)
            .ok_or(Error::NoSuchKey)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.index_of(key)?;
        Some(&mut self.pairs[idx].1)
    }

    pub fn get_or_default(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        match self.index_of(key) {
            Some(idx) => self.pairs[idx].1.clone(),
            None => default,
        }
    }

    /// Inserts or overwrites the value stored under `key`, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.index_of(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.pairs[idx].1, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Removes `key`; the last pair moves into the freed slot.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.index_of(key).ok_or(Error::NoSuchKey)?;
        Ok(self.pairs.swap_remove(idx).1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_without_growing() {
        let mut dict = ArrayDictionary::new();
        assert_eq!(dict.put("a", 1), None);
        assert_eq!(dict.put("b", 2), None);
        assert_eq!(dict.put("a", 3), Some(1));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(&"a"), Ok(&3));
    }

    #[test]
    fn remove_moves_last_pair_into_hole() {
        let mut dict = ArrayDictionary::new();
        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            dict.put(k, v);
        }
        assert_eq!(dict.remove(&"a"), Ok(1));
        assert_eq!(dict.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec!["c", "b"]);
        assert_eq!(dict.remove(&"a"), Err(Error::NoSuchKey));
        assert_eq!(dict.get(&"a"), Err(Error::NoSuchKey));
        assert_eq!(dict.get_or_default(&"a", 42), 42);
        assert_eq!(dict.get_or_default(&"b", 42), 2);
    }
}
