//! Biased-randomized iterative construction.

use rand::Rng;

use super::config::BraConfig;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::{advance, evaluate, rank_by_insertion_cost};
use crate::models::{Node, Tour};
use crate::random::quasi_geometric_index;
use crate::strategy::Strategy;

/// Biased-randomized algorithm (BRA).
///
/// Each pass keeps a prefix of the incumbent and rebuilds the rest with a
/// greedy construction whose picks are drawn from a quasi-geometric
/// distribution over the ranked candidates. The rebuilt fraction `beta`
/// adapts: it resets to `beta_start` on improvement and grows by `beta_step`
/// (capped at 1) otherwise.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::bra::{BiasedRandomized, BraConfig};
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
/// let mut bra = BiasedRandomized::new(BraConfig::default().with_max_iterations(200));
/// bra.execute(&path, &dm, 0, &nodes[0], &mut create_rng(42)).unwrap();
/// assert_eq!(bra.solution().len(), 3);
/// assert!(bra.solution().cost() <= 25);
/// ```
#[derive(Debug, Clone)]
pub struct BiasedRandomized<'a> {
    config: BraConfig,
    beta: f64,
    solution: Tour<'a>,
    cost_history: Vec<i64>,
}

impl<'a> BiasedRandomized<'a> {
    /// Creates a BRA strategy with the given configuration.
    pub fn new(config: BraConfig) -> Self {
        let beta = config.beta_start;
        Self {
            config,
            beta,
            solution: Tour::default(),
            cost_history: Vec::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BraConfig {
        &self.config
    }

    /// Incumbent cost after the initial construction and after every pass
    /// of the last `execute` call.
    pub fn cost_history(&self) -> &[i64] {
        &self.cost_history
    }

    /// Builds one candidate from `incumbent`: freeze a prefix, rebuild the rest.
    fn build<R: Rng + ?Sized>(
        &self,
        incumbent: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Tour<'a> {
        let keep = ((1.0 - self.beta) * incumbent.len() as f64) as usize;
        let keep = keep.min(incumbent.len());
        let (prefix, rest) = incumbent.split_at(keep);

        let (mut val, mut delay) = evaluate(prefix, distances, value, start);
        let mut current = prefix.last().copied().unwrap_or(start);
        let mut route = prefix.to_vec();
        let mut pool = rest.to_vec();

        while !pool.is_empty() {
            rank_by_insertion_cost(&mut pool, current, distances, val);
            let pick = quasi_geometric_index(rng, self.config.alpha, pool.len());
            let next = pool.remove(pick);
            let (arrival, lateness) = advance(distances, current, next, val);
            val = arrival;
            delay += lateness;
            route.push(next);
            current = next;
        }

        Tour::new(route, val, delay)
    }
}

impl<'a> Strategy<'a> for BiasedRandomized<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        self.cost_history.clear();
        if path.is_empty() {
            self.solution = Tour::empty(value);
            return Ok(());
        }

        self.beta = self.config.beta_start;
        let mut best = self.build(path, distances, value, start, rng);
        self.cost_history.push(best.cost());
        let mut improvements = 0usize;

        for _ in 0..self.config.max_iterations {
            let candidate = self.build(best.route(), distances, value, start, rng);
            if candidate.cost() < best.cost() {
                best = candidate;
                self.beta = self.config.beta_start;
                improvements += 1;
            } else {
                self.beta = (self.beta + self.config.beta_step).min(1.0);
            }
            self.cost_history.push(best.cost());
        }

        tracing::debug!(
            "BRA: {} nodes, {} iterations, {} improvements, best cost {} (value {}, delay {})",
            path.len(),
            self.config.max_iterations,
            improvements,
            best.cost(),
            best.value(),
            best.delay()
        );
        self.solution = best;
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "bra"
    }
}
