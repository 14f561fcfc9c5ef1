use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use log::debug;
use num_traits::{Bounded, Zero};

use crate::dictionary::ChainedHashDictionary;
use crate::graph::{Edge, Graph};
use crate::heap::IndexedHeap;
use crate::{Error, Result};

/// Best known way to reach `vertex`.
///
/// Entries are never mutated: a cheaper path produces a new entry with a fresh serial, which
/// replaces the old one both in the heap and in the table. Identity is the serial alone.
///
/// `reached` separates a path costing exactly `max_value()` from a vertex no path has reached
/// yet; on equal cost a reached entry orders first.
struct TableEntry<'a, V, W> {
    serial: usize,
    vertex: &'a V,
    predecessor: Option<&'a V>,
    cost: W,
    reached: bool,
    edge: Option<usize>,
}

impl<'a, V, W: Copy> Clone for TableEntry<'a, V, W> {
    fn clone(&self) -> Self {
        Self {
            serial: self.serial,
            vertex: self.vertex,
            predecessor: self.predecessor,
            cost: self.cost,
            reached: self.reached,
            edge: self.edge,
        }
    }
}

impl<'a, V, W> PartialEq for TableEntry<'a, V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.serial == other.serial
    }
}

impl<'a, V, W> Eq for TableEntry<'a, V, W> {}

impl<'a, V, W> Hash for TableEntry<'a, V, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serial.hash(state)
    }
}

impl<'a, V, W: PartialOrd> PartialOrd for TableEntry<'a, V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, V, W: PartialOrd> Ord for TableEntry<'a, V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.reached.cmp(&self.reached))
    }
}

impl<V, E> Graph<V, E>
where
    V: Hash + Eq,
    E: Edge<Vertex = V> + Ord,
{
    /// Dijkstra's algorithm from `start` to `end`.
    ///
    /// Returns the edges of a cheapest path, ordered from the edge leaving `start` to the edge
    /// entering `end`, or an empty path if both are the same vertex. Self-loops are never used.
    ///
    /// Costs never exceed `max_value()` of the weight type: a path whose cost would not fit
    /// counts as no path at all.
    pub fn shortest_path(&self, start: &V, end: &V) -> Result<Vec<&E>> {
        if !self.contains_vertex(start) || !self.contains_vertex(end) {
            return Err(Error::InvalidArgument("start or end is not a vertex of the graph"));
        }
        if start == end {
            return Ok(vec![]);
        }

        let infinity = <E::Weight as Bounded>::max_value();
        let mut serial = 0;
        let mut heap = IndexedHeap::new();
        let mut table = ChainedHashDictionary::new();

        for vertex in self.vertices() {
            let is_start = vertex == start;
            let entry = TableEntry {
                serial,
                vertex,
                predecessor: None,
                cost: if is_start { <E::Weight as Zero>::zero() } else { infinity },
                reached: is_start,
                edge: None,
            };
            heap.add(entry.clone())?;
            table.put(vertex, entry);
            serial += 1;
        }

        let mut settled = 0;
        while let Ok(current) = heap.remove_min() {
            if !current.reached {
                // everything left in the heap is unreachable
                break;
            }
            settled += 1;

            for &idx in self.adjacency.get(current.vertex)? {
                let edge = &self.edges[idx];
                if edge.is_self_loop() {
                    continue;
                }
                let next = edge.other_vertex(current.vertex)?;
                let known: &TableEntry<V, E::Weight> = table.get(&next)?;
                if known.cost < current.cost {
                    // settled already
                    continue;
                }

                // the sum stays within `known.cost`, so it cannot overflow
                let weight = edge.weight();
                let slack = known.cost - current.cost;
                let improves = if known.reached { weight < slack } else { weight <= slack };
                if improves {
                    let relaxed = TableEntry {
                        serial,
                        vertex: next,
                        predecessor: Some(current.vertex),
                        cost: current.cost + weight,
                        reached: true,
                        edge: Some(idx),
                    };
                    heap.replace(known, relaxed.clone())?;
                    table.put(next, relaxed);
                    serial += 1;
                }
            }
        }

        let mut entry = table.get(&end)?;
        if !entry.reached {
            return Err(Error::NoPathExists);
        }

        let mut path = vec![];
        while let (Some(idx), Some(predecessor)) = (entry.edge, entry.predecessor) {
            path.push(&self.edges[idx]);
            entry = table.get(&predecessor)?;
        }
        path.reverse();

        debug!(
            "shortest path with {} edges found after settling {} of {} vertices",
            path.len(),
            settled,
            self.num_vertices()
        );
        Ok(path)
    }
}
