use std::hash::Hash;

use log::debug;

use crate::disjoint_set::DisjointSetForest;
use crate::graph::{Edge, Graph};
use crate::Result;

impl<V, E> Graph<V, E>
where
    V: Hash + Eq,
    E: Edge<Vertex = V> + Ord,
{
    /// Kruskal's algorithm over the pre-sorted edge list.
    ///
    /// The graph is expected to be connected, otherwise the result is a spanning forest. When
    /// several minimum spanning trees exist, the one preferring earlier edges in sort order is
    /// returned. Edges are returned in ascending order.
    pub fn minimum_spanning_tree(&self) -> Result<Vec<&E>> {
        let mut forest = DisjointSetForest::new();
        for vertex in self.vertices() {
            forest.make_set(vertex)?;
        }

        let num_tree_edges = self.num_vertices().saturating_sub(1);
        let mut tree = Vec::with_capacity(num_tree_edges);
        for edge in &self.edges {
            if tree.len() >= num_tree_edges {
                break;
            }
            let (v1, v2) = (edge.vertex1(), edge.vertex2());
            if !forest.same_set(&v1, &v2)? {
                forest.union(&v1, &v2)?;
                tree.push(edge);
            }
        }

        if tree.len() < num_tree_edges {
            debug!(
                "graph is not connected, spanning forest has {} of {} edges",
                tree.len(),
                num_tree_edges
            );
        }
        Ok(tree)
    }
}
