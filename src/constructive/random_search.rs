//! Best-of-N random sampling.

use rand::Rng;

use super::shuffler::random_tour;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::models::{Node, Tour};
use crate::strategy::Strategy;

/// Random search strategy.
///
/// Draws one random order, then `iterations` more, and keeps the cheapest.
/// Ties keep the earlier sample.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::constructive::RandomSearch;
/// use tw_dei::random::create_rng;
/// use tw_dei::strategy::Strategy;
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
/// let mut search = RandomSearch::new(200);
/// search.execute(&path, &dm, 0, &nodes[0], &mut create_rng(42)).unwrap();
/// // 6 orders, 200 draws: the optimum is all but certain
/// assert_eq!(search.solution().cost(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSearch<'a> {
    iterations: usize,
    solution: Tour<'a>,
}

impl<'a> RandomSearch<'a> {
    /// Creates a random search drawing `iterations` extra samples per run.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            solution: Tour::default(),
        }
    }

    /// Extra samples drawn per run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Default for RandomSearch<'_> {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl<'a> Strategy<'a> for RandomSearch<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError> {
        let mut best = random_tour(path, distances, value, start, rng);
        if path.len() > 1 {
            for _ in 0..self.iterations {
                let sample = random_tour(path, distances, value, start, rng);
                if sample.cost() < best.cost() {
                    best = sample;
                }
            }
        }
        tracing::trace!(
            "random search: {} nodes, best cost {}",
            path.len(),
            best.cost()
        );
        self.solution = best;
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "random search"
    }
}
