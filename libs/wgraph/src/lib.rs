//! Generic containers and the graph algorithms built on top of them.
//!
//! [`ChainedHashDictionary`] backs every lookup table in the crate, [`IndexedHeap`] is a 4-ary
//! min-heap that can remove or replace arbitrary elements, [`DisjointSetForest`] is a union-find
//! with path compression and union by rank, and [`Graph`] is an immutable undirected weighted
//! graph exposing Kruskal's minimum spanning tree and Dijkstra's shortest path.

pub mod dictionary;
pub mod disjoint_set;
mod error;
pub mod graph;
pub mod heap;
pub mod sort;

pub use dictionary::{ArrayDictionary, ChainedHashDictionary};
pub use disjoint_set::DisjointSetForest;
pub use error::{Error, Result};
pub use graph::{total_weight, Edge, Graph, Weight, WeightedEdge};
pub use heap::IndexedHeap;
pub use sort::{top_k_indices, top_k_sort};
