use std::cmp::Ordering;
use std::hash::Hash;

use log::debug;
use num_traits::{Bounded, NumOps, Zero};

use crate::dictionary::ChainedHashDictionary;
use crate::sort::top_k_indices;
use crate::{Error, Result};

mod mst;
mod shortest_path;


// trait aliases are experimental (rust-lang/rfcs#1733)
pub trait Weight: Zero + Bounded + NumOps + Copy + PartialOrd {}

impl<W> Weight for W where W: Zero + Bounded + NumOps + Copy + PartialOrd {}

/// Undirected weighted edge between two vertices.
pub trait Edge {
    type Vertex: PartialEq;
    type Weight: Weight;

    fn vertex1(&self) -> &Self::Vertex;
    fn vertex2(&self) -> &Self::Vertex;
    fn weight(&self) -> Self::Weight;

    /// Returns the endpoint opposite to `vertex`.
    fn other_vertex(&self, vertex: &Self::Vertex) -> Result<&Self::Vertex> {
        if self.vertex1() == vertex {
            Ok(self.vertex2())
        } else if self.vertex2() == vertex {
            Ok(self.vertex1())
        } else {
            Err(Error::InvalidArgument("vertex is not an endpoint of the edge"))
        }
    }

    fn is_self_loop(&self) -> bool {
        self.vertex1() == self.vertex2()
    }
}

impl<'a, E: Edge> Edge for &'a E {
    type Vertex = E::Vertex;
    type Weight = E::Weight;

    #[inline(always)]
    fn vertex1(&self) -> &Self::Vertex {
        (**self).vertex1()
    }
    #[inline(always)]
    fn vertex2(&self) -> &Self::Vertex {
        (**self).vertex2()
    }
    #[inline(always)]
    fn weight(&self) -> Self::Weight {
        (**self).weight()
    }
}

/// Plain edge ordered by weight, then by its endpoints.
#[derive(Clone, Debug)]
pub struct WeightedEdge<V, W> {
    pub v1: V,
    pub v2: V,
    pub w: W,
}

impl<V, W> WeightedEdge<V, W> {
    pub fn new(v1: V, v2: V, w: W) -> Self {
        Self { v1, v2, w }
    }
}

impl<V: PartialEq, W: Weight> Edge for WeightedEdge<V, W> {
    type Vertex = V;
    type Weight = W;

    fn vertex1(&self) -> &V {
        &self.v1
    }
    fn vertex2(&self) -> &V {
        &self.v2
    }
    fn weight(&self) -> W {
        self.w
    }
}

impl<V: Ord, W: PartialOrd> Ord for WeightedEdge<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.w
            .partial_cmp(&other.w)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.v1.cmp(&other.v1))
            .then_with(|| self.v2.cmp(&other.v2))
    }
}

impl<V: Ord, W: PartialOrd> PartialOrd for WeightedEdge<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, W: PartialOrd> PartialEq for WeightedEdge<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord, W: PartialOrd> Eq for WeightedEdge<V, W> {}

/// Sum of the weights of `edges`.
pub fn total_weight<'a, E: Edge + 'a>(edges: impl IntoIterator<Item = &'a E>) -> E::Weight {
    edges
        .into_iter()
        .fold(<E::Weight as Zero>::zero(), |acc, edge| acc + edge.weight())
}

/// Immutable undirected weighted graph, possibly with self-loops, parallel edges and several
/// components.
///
/// Edges are kept sorted in ascending order; equal edges keep the order in which they were
/// passed to [`Graph::new`]. The adjacency lists refer to edges by their position in that
/// sorted list.
pub struct Graph<V, E> {
    adjacency: ChainedHashDictionary<V, Vec<usize>>,
    edges: Vec<E>,
}

impl<V, E> Graph<V, E>
where
    V: Hash + Eq,
    E: Edge<Vertex = V> + Ord,
{
    /// Builds a graph, rejecting duplicate vertices, negative weights and edges whose endpoints
    /// are not among `vertices`.
    pub fn new(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self> {
        let mut adjacency = ChainedHashDictionary::new();
        for vertex in vertices {
            if adjacency.contains_key(&vertex) {
                return Err(Error::InvalidArgument("duplicate vertex"));
            }
            adjacency.put(vertex, vec![]);
        }

        let edges: Vec<E> = edges.into_iter().collect();
        for edge in &edges {
            // also rejects NaN
            if !(edge.weight() >= <E::Weight as Zero>::zero()) {
                return Err(Error::InvalidArgument("edge weight must be non-negative"));
            }
            if !adjacency.contains_key(edge.vertex1()) || !adjacency.contains_key(edge.vertex2()) {
                return Err(Error::InvalidArgument("edge endpoint is not a vertex of the graph"));
            }
        }

        let order = top_k_indices(edges.len(), &edges);
        let mut sorted_position = vec![0; edges.len()];
        for (position, &original) in order.iter().enumerate() {
            sorted_position[original] = position;
        }

        for (original, edge) in edges.iter().enumerate() {
            let position = sorted_position[original];
            if let Some(incident) = adjacency.get_mut(edge.vertex1()) {
                incident.push(position);
            }
            if !edge.is_self_loop() {
                if let Some(incident) = adjacency.get_mut(edge.vertex2()) {
                    incident.push(position);
                }
            }
        }

        let mut slots: Vec<Option<E>> = edges.into_iter().map(Some).collect();
        let edges: Vec<E> = order.iter().filter_map(|&idx| slots[idx].take()).collect();

        debug!(
            "graph with {} vertices and {} edges created",
            adjacency.len(),
            edges.len()
        );
        Ok(Self { adjacency, edges })
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }

    /// All edges in ascending order.
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    pub fn incident_edges(&self, vertex: &V) -> Result<impl Iterator<Item = &E>> {
        let incident = self
            .adjacency
            .get(vertex)
            .map_err(|_| Error::InvalidArgument("vertex is not in the graph"))?;
        Ok(incident.iter().map(move |&idx| &self.edges[idx]))
    }
}
