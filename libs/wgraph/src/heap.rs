use std::cmp::Ordering;
use std::hash::Hash;

use crate::dictionary::ChainedHashDictionary;
use crate::{Error, Result};

const NUM_CHILDREN: usize = 4;
const DEFAULT_CAPACITY: usize = 50;

/// 4-ary min-heap that knows the slot of every element it holds.
///
/// The children of slot `i` are the slots `4i+1..=4i+4`. A side table maps every element to
/// its current slot, which allows removing or replacing an arbitrary element in `O(log n)`.
/// Elements are identified by `Eq`/`Hash`, so no two equal elements can be stored at once.
#[derive(Clone)]
pub struct IndexedHeap<T> {
    heap: Vec<T>,
    positions: ChainedHashDictionary<T, usize>,
}

impl<T> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::with_capacity(DEFAULT_CAPACITY),
            positions: ChainedHashDictionary::new(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn peek_min(&self) -> Result<&T> {
        self.heap.first().ok_or(Error::EmptyContainer)
    }
}

impl<T> IndexedHeap<T>
where
    T: Ord + Hash + Eq + Clone,
{
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        if self.contains(&item) {
            return Err(Error::InvalidElement("item is already in the heap"));
        }
        let idx = self.heap.len();
        self.positions.put(item.clone(), idx);
        self.heap.push(item);
        self.percolate_up(idx);

        self.check_invariants();
        Ok(())
    }

    pub fn remove_min(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let min = self.take_slot(0)?;
        if !self.heap.is_empty() {
            self.percolate_down(0);
        }

        self.check_invariants();
        Ok(min)
    }

    /// Removes `item` from anywhere in the heap and returns the stored element.
    pub fn remove(&mut self, item: &T) -> Result<T> {
        let idx = *self
            .positions
            .get(item)
            .map_err(|_| Error::InvalidElement("item is not in the heap"))?;
        let removed = self.take_slot(idx)?;
        if idx < self.heap.len() {
            self.percolate(idx);
        }

        self.check_invariants();
        Ok(removed)
    }

    /// Puts `new_item` into the slot of `old_item` and restores heap order; returns `old_item`.
    pub fn replace(&mut self, old_item: &T, new_item: T) -> Result<T> {
        if !self.contains(old_item) {
            return Err(Error::InvalidElement("replaced item is not in the heap"));
        }
        if self.contains(&new_item) {
            return Err(Error::InvalidElement("replacement is already in the heap"));
        }
        let idx = self
            .positions
            .remove(old_item)
            .map_err(|_| Error::InvalidElement("replaced item is not in the heap"))?;
        self.positions.put(new_item.clone(), idx);
        let old = std::mem::replace(&mut self.heap[idx], new_item);
        self.percolate(idx);

        self.check_invariants();
        Ok(old)
    }

    /// Moves the last element into `idx`, shrinks the array and unregisters the evicted item.
    fn take_slot(&mut self, idx: usize) -> Result<T> {
        let last = self.heap.len() - 1;
        self.swap(idx, last);
        let item = self.heap.pop().ok_or(Error::EmptyContainer)?;
        self.positions.remove(&item)?;
        Ok(item)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.update_position(a);
        self.update_position(b);
    }

    #[inline(always)]
    fn update_position(&mut self, idx: usize) {
        let slot = self.positions.get_mut(&self.heap[idx]);
        debug_assert!(slot.is_some(), "heap element without position entry");
        if let Some(slot) = slot {
            *slot = idx;
        }
    }

    fn percolate_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / NUM_CHILDREN;
            if self.heap[parent] > self.heap[idx] {
                self.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn percolate_down(&mut self, mut idx: usize) {
        loop {
            let first_child = NUM_CHILDREN * idx + 1;
            let last_child = (first_child + NUM_CHILDREN).min(self.heap.len());

            let mut min = idx;
            for child in first_child..last_child {
                if self.heap[child] < self.heap[min] {
                    min = child;
                }
            }
            if min == idx {
                break;
            }
            self.swap(idx, min);
            idx = min;
        }
    }

    /// Restores heap order around a slot whose content changed arbitrarily.
    fn percolate(&mut self, idx: usize) {
        if idx == 0 {
            self.percolate_down(idx);
            return;
        }
        let parent = (idx - 1) / NUM_CHILDREN;
        match self.heap[idx].cmp(&self.heap[parent]) {
            Ordering::Less => self.percolate_up(idx),
            Ordering::Greater => self.percolate_down(idx),
            Ordering::Equal => {}
        }
    }

    #[cfg(feature = "invariant-checks")]
    fn check_invariants(&self) {
        assert_eq!(self.heap.len(), self.positions.len());
        for (idx, item) in self.heap.iter().enumerate() {
            assert_eq!(self.positions.get(item), Ok(&idx), "stale position of slot {}", idx);
            if idx > 0 {
                let parent = (idx - 1) / NUM_CHILDREN;
                assert!(self.heap[parent] <= self.heap[idx], "heap order violated at slot {}", idx);
            }
        }
    }

    #[cfg(not(feature = "invariant-checks"))]
    #[inline(always)]
    fn check_invariants(&self) {}
}
