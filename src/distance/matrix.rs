//! Dense integer travel cost matrix.

use crate::models::Node;

/// A dense n×n travel cost matrix stored in row-major order.
///
/// Row and column indices are node IDs. Costs are non-negative integers;
/// [`from_nodes`](Self::from_nodes) builds the usual truncated Euclidean
/// matrix.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 3, 4, 0, 100),
///     Node::new(2, 6, 8, 0, 100),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a truncated Euclidean matrix from node coordinates.
    ///
    /// Node IDs must be `0..nodes.len()`; each node is written at the row
    /// and column given by its ID.
    ///
    /// # Panics
    ///
    /// Panics if a node ID is not below `nodes.len()`.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut dm = Self::new(nodes.len());
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let d = a.distance_to(b);
                dm.set(a.id(), b.id(), d);
                dm.set(b.id(), a.id(), d);
            }
        }
        dm
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the travel cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: i64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `id` indexes a row of this matrix.
    pub fn contains(&self, id: usize) -> bool {
        id < self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new(0, 0, 0, 0, 100),
            Node::new(1, 3, 4, 0, 100),
            Node::new(2, 0, 8, 0, 100),
        ]
    }

    #[test]
    fn test_from_nodes() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(0, 2), 8);
        assert_eq!(dm.get(0, 0), 0);
        // (3,4) -> (0,8): sqrt(25) = 5
        assert_eq!(dm.get(1, 2), 5);
    }

    #[test]
    fn test_from_nodes_symmetric() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn test_from_nodes_uses_ids() {
        // Listed out of order; rows follow IDs, not positions.
        let nodes = vec![Node::new(1, 10, 0, 0, 0), Node::new(0, 0, 0, 0, 0)];
        let dm = DistanceMatrix::from_nodes(&nodes);
        assert_eq!(dm.get(0, 1), 10);
        assert_eq!(dm.get(1, 0), 10);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0, 5, 7, 0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(1, 0), 7);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2]).is_none());
    }

    #[test]
    fn test_set_get_contains() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42);
        assert_eq!(dm.get(0, 1), 42);
        assert_eq!(dm.get(1, 0), 0);
        assert!(dm.contains(2));
        assert!(!dm.contains(3));
    }
}
