use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::heap::IndexedHeap;

/// Heap element remembering where it came from, so equal items stay distinct and ties keep
/// input order.
struct Ranked<'a, T> {
    item: &'a T,
    position: usize,
}

impl<'a, T> Clone for Ranked<'a, T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item,
            position: self.position,
        }
    }
}

impl<'a, T> PartialEq for Ranked<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<'a, T> Eq for Ranked<'a, T> {}

impl<'a, T> Hash for Ranked<'a, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state)
    }
}

impl<'a, T: Ord> PartialOrd for Ranked<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T: Ord> Ord for Ranked<'a, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item
            .cmp(other.item)
            .then(self.position.cmp(&other.position))
    }
}

/// Returns the input positions of the `k` largest items, ordered from smallest to largest.
///
/// `k` is clamped to `input.len()`. Equal items are ordered by their position in `input`.
pub fn top_k_indices<T: Ord>(k: usize, input: &[T]) -> Vec<usize> {
    let k = k.min(input.len());
    if k == 0 {
        return vec![];
    }

    // positions are unique, so `add` never sees a duplicate
    let mut heap = IndexedHeap::new();
    for (position, item) in input.iter().enumerate() {
        let ranked = Ranked { item, position };
        if heap.len() < k {
            let added = heap.add(ranked);
            debug_assert!(added.is_ok(), "position {} added twice", position);
            continue;
        }
        let evicts_min = matches!(heap.peek_min(), Ok(min) if ranked >= *min);
        if evicts_min {
            let added = heap.add(ranked);
            debug_assert!(added.is_ok(), "position {} added twice", position);
            let evicted = heap.remove_min();
            debug_assert!(evicted.is_ok(), "heap of {} items is empty", k);
        }
    }

    let mut sorted = Vec::with_capacity(k);
    while let Ok(ranked) = heap.remove_min() {
        sorted.push(ranked.position);
    }
    sorted
}

/// Returns the `k` largest items of `input`, ordered from smallest to largest, without
/// modifying `input`.
pub fn top_k_sort<T: Ord>(k: usize, input: &[T]) -> Vec<&T> {
    top_k_indices(k, input)
        .into_iter()
        .map(|idx| &input[idx])
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn returns_largest_in_ascending_order() {
        let input = vec![5, 1, 9, 3, 7, 2, 8];
        assert_eq!(top_k_sort(3, &input), vec![&7, &8, &9]);
        assert_eq!(input, vec![5, 1, 9, 3, 7, 2, 8]);
    }

    #[test]
    fn clamps_k_and_handles_zero() {
        let input = vec![3, 1, 2];
        assert_eq!(top_k_sort(10, &input), vec![&1, &2, &3]);
        assert!(top_k_sort(0, &input).is_empty());
        assert!(top_k_sort::<i32>(4, &[]).is_empty());
    }

    #[test]
    fn equal_items_keep_input_order() {
        let input = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let keys: Vec<u8> = input.iter().map(|(k, _)| *k).collect();
        assert_eq!(top_k_indices(4, &keys), vec![1, 3, 0, 2]);
        assert_eq!(top_k_indices(2, &keys), vec![0, 2]);
    }

    #[test]
    fn equal_items_are_all_kept() {
        let input = vec![7u8; 20];
        assert_eq!(top_k_indices(5, &input), vec![15, 16, 17, 18, 19]);
        assert_eq!(top_k_indices(20, &input), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn full_sort_matches_std() {
        let mut rand = Pcg64::seed_from_u64(842);
        let input: Vec<u16> = (0..500).map(|_| rand.gen_range(0..100)).collect();
        let mut expected = input.clone();
        expected.sort();

        let sorted: Vec<u16> = top_k_sort(input.len(), &input).into_iter().copied().collect();
        assert_eq!(sorted, expected);

        let top: Vec<u16> = top_k_sort(25, &input).into_iter().copied().collect();
        assert_eq!(top, expected[expected.len() - 25..].to_vec());
    }
}
