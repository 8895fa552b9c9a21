//! Deterministic cheapest-insertion construction.
//!
//! # Algorithm
//!
//! Keep a pool of unplaced nodes. At each step rank the pool by
//! [`insertion_cost`](crate::evaluation::insertion_cost) against the current
//! node and arrival value, append the cheapest, advance the recurrence and
//! repeat until the pool is empty. Ties keep input order.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of nodes.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::{advance, rank_by_insertion_cost};
use crate::models::{Node, Tour};
use crate::strategy::Strategy;

/// Builds a tour over `path` by repeatedly appending the cheapest node.
///
/// Uses no randomness: the same input always yields the same tour.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::constructive::greedy_tour;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 5, 20),
///     Node::new(2, 20, 0, 25, 40),
///     Node::new(3, 5, 0, 0, 10),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let path: Vec<&Node> = nodes[1..].iter().collect();
///
/// let tour = greedy_tour(&path, &dm, 0, &nodes[0]);
/// assert_eq!(tour.ids(), vec![3, 1, 2]);
/// assert_eq!((tour.value(), tour.delay()), (25, 0));
/// ```
pub fn greedy_tour<'a>(
    path: &[&'a Node],
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
) -> Tour<'a> {
    let mut pool: Vec<&'a Node> = path.to_vec();
    let mut route = Vec::with_capacity(pool.len());
    let mut current = start;
    let mut value = value;
    let mut delay = 0;

    while !pool.is_empty() {
        rank_by_insertion_cost(&mut pool, current, distances, value);
        let next = pool.remove(0);
        let (arrival, lateness) = advance(distances, current, next, value);
        value = arrival;
        delay += lateness;
        route.push(next);
        current = next;
    }

    Tour::new(route, value, delay)
}

/// Greedy strategy; the deterministic baseline.
#[derive(Debug, Clone, Default)]
pub struct Greedy<'a> {
    solution: Tour<'a>,
}

impl Greedy<'_> {
    /// Creates a greedy strategy with no solution yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Strategy<'a> for Greedy<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        _rng: &mut R,
    ) -> Result<(), SolveError> {
        self.solution = greedy_tour(path, distances, value, start);
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate;
    use crate::random::create_rng;

    fn scenario() -> (Vec<Node>, DistanceMatrix) {
        let nodes = vec![
            Node::new(0, 0, 0, 0, 100),
            Node::new(1, 10, 0, 5, 20),
            Node::new(2, 20, 0, 25, 40),
            Node::new(3, 5, 0, 0, 10),
        ];
        let dm = DistanceMatrix::from_nodes(&nodes);
        (nodes, dm)
    }

    #[test]
    fn test_golden_scenario() {
        let (nodes, dm) = scenario();
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let tour = greedy_tour(&path, &dm, 0, &nodes[0]);
        // 0 → 3: 5; 3 → 1: 10; 1 → 2: 20, wait to 25
        assert_eq!(tour.ids(), vec![3, 1, 2]);
        assert_eq!(tour.value(), 25);
        assert_eq!(tour.delay(), 0);
    }

    #[test]
    fn test_deterministic() {
        let (nodes, dm) = scenario();
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let mut a = Greedy::new();
        let mut b = Greedy::new();
        a.execute(&path, &dm, 0, &nodes[0], &mut create_rng(1))
            .expect("greedy never fails");
        b.execute(&path, &dm, 0, &nodes[0], &mut create_rng(2))
            .expect("greedy never fails");
        assert_eq!(a.solution(), b.solution());
    }

    #[test]
    fn test_value_matches_recurrence() {
        let (nodes, dm) = scenario();
        let path: Vec<&Node> = vec![&nodes[2], &nodes[3], &nodes[1]];
        let tour = greedy_tour(&path, &dm, 7, &nodes[0]);
        assert_eq!(
            evaluate(tour.route(), &dm, 7, &nodes[0]),
            (tour.value(), tour.delay())
        );
    }

    #[test]
    fn test_empty_path() {
        let (nodes, dm) = scenario();
        let tour = greedy_tour(&[], &dm, 33, &nodes[0]);
        assert!(tour.is_empty());
        assert_eq!((tour.value(), tour.delay()), (33, 0));
    }

    #[test]
    fn test_single_node_delay() {
        let (nodes, dm) = scenario();
        // start value 12, 0 → 3 takes 5, arrives 17, closes 10
        let tour = greedy_tour(&[&nodes[3]], &dm, 12, &nodes[0]);
        assert_eq!(tour.ids(), vec![3]);
        assert_eq!(tour.value(), 17);
        assert_eq!(tour.delay(), (12 + 5 - 10_i64).max(0));
    }

    #[test]
    fn test_lateness_discounts_rank() {
        let (nodes, dm) = scenario();
        // From node 2 at t=25: node 1 scores 35 - 15 = 20, node 3 scores 40 - 30 = 10
        let tour = greedy_tour(&[&nodes[1], &nodes[3]], &dm, 25, &nodes[2]);
        assert_eq!(tour.ids(), vec![3, 1]);
        assert_eq!(tour.value(), 45);
        assert_eq!(tour.delay(), 30 + 25);
    }
}
