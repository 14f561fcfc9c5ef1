use std::hash::Hash;

use crate::dictionary::ChainedHashDictionary;
use crate::{Error, Result};

/// Union-find over arbitrary items with path compression and union by rank.
///
/// Every item owns a dense slot in `pointers`. A slot holds either the slot of its parent
/// (`>= 0`) or, for a root, `-(rank + 1)`.
#[derive(Clone)]
pub struct DisjointSetForest<T> {
    pointers: Vec<isize>,
    slots: ChainedHashDictionary<T, usize>,
}

impl<T> Default for DisjointSetForest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DisjointSetForest<T> {
    pub fn new() -> Self {
        Self {
            pointers: vec![],
            slots: ChainedHashDictionary::new(),
        }
    }

    /// Number of registered items.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    fn find_root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.pointers[root] >= 0 {
            root = self.pointers[root] as usize;
        }

        let mut current = slot;
        while current != root {
            let next = self.pointers[current] as usize;
            self.pointers[current] = root as isize;
            current = next;
        }
        root
    }
}

impl<T: Hash + Eq> DisjointSetForest<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Registers `item` as a singleton set and returns its slot.
    pub fn make_set(&mut self, item: T) -> Result<usize> {
        if self.slots.contains_key(&item) {
            return Err(Error::InvalidArgument("item already has a set"));
        }
        let slot = self.pointers.len();
        self.pointers.push(-1);
        self.slots.put(item, slot);
        Ok(slot)
    }

    fn slot_of(&self, item: &T) -> Result<usize> {
        self.slots
            .get(item)
            .copied()
            .map_err(|_| Error::InvalidArgument("item has no set"))
    }

    /// Returns the representative slot of the set containing `item`.
    pub fn find_set(&mut self, item: &T) -> Result<usize> {
        let slot = self.slot_of(item)?;
        Ok(self.find_root(slot))
    }

    /// Merges the sets of `item1` and `item2` and returns the new representative.
    ///
    /// The root of lower rank is linked below the other one. On equal ranks the representative
    /// of `item1` becomes the parent, so `union(a, b)` and `union(b, a)` may pick different
    /// representatives.
    pub fn union(&mut self, item1: &T, item2: &T) -> Result<usize> {
        let slot1 = self.slot_of(item1)?;
        let slot2 = self.slot_of(item2)?;
        let rep1 = self.find_root(slot1);
        let rep2 = self.find_root(slot2);
        if rep1 == rep2 {
            return Ok(rep1);
        }

        // more negative means higher rank
        if self.pointers[rep1] == self.pointers[rep2] {
            self.pointers[rep2] = rep1 as isize;
            self.pointers[rep1] -= 1;
            Ok(rep1)
        } else if self.pointers[rep1] < self.pointers[rep2] {
            self.pointers[rep2] = rep1 as isize;
            Ok(rep1)
        } else {
            self.pointers[rep1] = rep2 as isize;
            Ok(rep2)
        }
    }

    pub fn same_set(&mut self, item1: &T, item2: &T) -> Result<bool> {
        Ok(self.find_set(item1)? == self.find_set(item2)?)
    }
}
