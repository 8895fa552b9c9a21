//! Random-order construction.
//!
//! Visits the nodes in a uniformly random order and evaluates that order
//! once. Serves as the baseline every other strategy should beat.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::evaluate;
use crate::models::{Node, Tour};
use crate::random::shuffle;
use crate::strategy::Strategy;

/// Builds a tour over `path` in a uniformly random order.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::constructive::random_tour;
/// use tw_dei::random::create_rng;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 5, 20),
///     Node::new(2, 20, 0, 25, 40),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let path: Vec<&Node> = nodes[1..].iter().collect();
///
/// let tour = random_tour(&path, &dm, 0, &nodes[0], &mut create_rng(42));
/// assert_eq!(tour.len(), 2);
/// ```
pub fn random_tour<'a, R: Rng + ?Sized>(
    path: &[&'a Node],
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
    rng: &mut R,
) -> Tour<'a> {
    let mut route = path.to_vec();
    shuffle(&mut route, rng);
    let (v, d) = evaluate(&route, distances, value, start);
    Tour::new(route, v, d)
}

/// Random-order strategy.
#[derive(Debug, Clone, Default)]
pub struct Shuffler<'a> {
    solution: Tour<'a>,
}

impl Shuffler<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Strategy<'a> for Shuffler<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError> {
        self.solution = random_tour(path, distances, value, start, rng);
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "shuffler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn line(n: usize) -> (Vec<Node>, DistanceMatrix) {
        let nodes: Vec<Node> = (0..n)
            .map(|i| Node::new(i, (i * 7 % 23) as i64, (i * 5 % 19) as i64, 0, 60))
            .collect();
        let dm = DistanceMatrix::from_nodes(&nodes);
        (nodes, dm)
    }

    #[test]
    fn test_permutation_and_state() {
        let (nodes, dm) = line(12);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let mut s = Shuffler::new();
        s.execute(&path, &dm, 9, &nodes[0], &mut create_rng(42))
            .expect("shuffler never fails");
        let sol = s.solution();
        let mut ids = sol.ids();
        ids.sort();
        assert_eq!(ids, (1..12).collect::<Vec<_>>());
        assert_eq!(
            evaluate(sol.route(), &dm, 9, &nodes[0]),
            (sol.value(), sol.delay())
        );
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let (nodes, dm) = line(15);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let a = random_tour(&path, &dm, 0, &nodes[0], &mut create_rng(5));
        let b = random_tour(&path, &dm, 0, &nodes[0], &mut create_rng(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_is_randomized() {
        let (nodes, dm) = line(15);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let mut rng = create_rng(1);
        let orders: Vec<Vec<usize>> = (0..5)
            .map(|_| random_tour(&path, &dm, 0, &nodes[0], &mut rng).ids())
            .collect();
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_empty_path() {
        let (nodes, dm) = line(2);
        let mut s = Shuffler::new();
        s.execute(&[], &dm, 21, &nodes[0], &mut create_rng(1))
            .expect("shuffler never fails");
        assert!(s.solution().is_empty());
        assert_eq!(s.solution().value(), 21);
    }
}
