use trailmesh_model::{Edge, NodeId};

/// Read-only CSR (Compressed Sparse Row) adjacency index over routing
/// graph nodes, mirroring the teacher's half-edge-adjacent `AdjacencyMatrix`
/// convention: `offsets[n]..offsets[n+1]` indexes into `neighbors` for the
/// sorted, deduplicated list of nodes adjacent to `n` via some edge.
/// Supports O(log deg) membership tests via binary search.
#[derive(Clone, Debug)]
pub struct AdjacencyIndex {
    offsets: Vec<u32>,
    neighbors: Vec<NodeId>,
}

impl AdjacencyIndex {
    pub fn build(num_nodes: usize, edges: &[Edge]) -> Self {
        let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); num_nodes];
        for edge in edges {
            adjacency[edge.source_node.0 as usize].push(edge.target_node);
            adjacency[edge.target_node.0 as usize].push(edge.source_node);
        }

        let mut offsets = Vec::with_capacity(num_nodes + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for mut row in adjacency {
            row.sort();
            row.dedup();
            neighbors.extend(row);
            offsets.push(neighbors.len() as u32);
        }
        Self { offsets, neighbors }
    }

    pub fn num_nodes(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Sorted slice of nodes adjacent to `node`.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let i = node.0 as usize;
        let (start, end) = (self.offsets[i] as usize, self.offsets[i + 1] as usize);
        &self.neighbors[start..end]
    }

    /// `true` if `other` is adjacent to `node` (binary search).
    pub fn contains(&self, node: NodeId, other: NodeId) -> bool {
        self.neighbors(node).binary_search(&other).is_ok()
    }
}
