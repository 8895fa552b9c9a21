//! Hybrid tabu/annealing execution loop.

use rand::Rng;

use super::config::HtaConfig;
use super::moves::{neighbour, Details, TabuList};
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::evaluate;
use crate::models::{Node, Tour};
use crate::strategy::Strategy;

fn tour_of<'a>(
    route: Vec<&'a Node>,
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
) -> Tour<'a> {
    let (v, d) = evaluate(&route, distances, value, start);
    Tour::new(route, v, d)
}

/// Hybrid simulated annealing and tabu search.
///
/// Starts from the nodes sorted by closing time, then tries up to
/// `max_repair_iterations` neighbours to drive its delay to zero, accepting
/// only strict delay reductions. The annealing phase follows: each
/// iteration draws a neighbour, accepts it by the Metropolis criterion and
/// cools the temperature geometrically. The best tour seen is returned.
///
/// Neighbours come from four moves: shift a late node left, shift a
/// waiting node right, reverse a segment, swap two nodes. Each move is
/// keyed by the nodes it touches and stays tabu for the next `tabu_size`
/// moves.
///
/// # Reference
///
/// Küçükoğlu, İ., Dewil, R., Cattrysse, D. (2019). "Hybrid simulated
/// annealing and tabu search method for the electric travelling salesman
/// problem with time windows and mixed charging rates", *Expert Systems
/// with Applications* 134, 279-303.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::hta::{HtaConfig, HybridTabuAnnealing};
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
/// let mut hta = HybridTabuAnnealing::new(HtaConfig::default().with_max_iterations(200));
/// hta.execute(&path, &dm, 0, &nodes[0], &mut create_rng(42)).unwrap();
/// // closing-time order [3, 1, 2] is already optimal here
/// assert_eq!(hta.solution().cost(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct HybridTabuAnnealing<'a> {
    config: HtaConfig,
    solution: Tour<'a>,
    cost_history: Vec<i64>,
}

impl<'a> HybridTabuAnnealing<'a> {
    pub fn new(config: HtaConfig) -> Self {
        Self {
            config,
            solution: Tour::default(),
            cost_history: Vec::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &HtaConfig {
        &self.config
    }

    /// Best cost after the repair phase and after every annealing iteration
    /// of the last `execute` call.
    pub fn cost_history(&self) -> &[i64] {
        &self.cost_history
    }

    /// Tries neighbours of `current` until its delay is zero or the repair
    /// budget is spent. Only strict delay reductions are kept.
    fn repair<R: Rng + ?Sized>(
        &self,
        mut current: Tour<'a>,
        tabu: &mut TabuList,
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Tour<'a> {
        let mut details = Details::of(current.route(), distances, value, start);
        let mut tries = 0usize;
        while current.delay() > 0 && tries < self.config.max_repair_iterations {
            tries += 1;
            let route = neighbour(current.route(), &details, tabu, &self.config, rng);
            let candidate = tour_of(route, distances, value, start);
            if candidate.delay() < current.delay() {
                current = candidate;
                details = Details::of(current.route(), distances, value, start);
            }
        }
        tracing::trace!(
            "HTA: repair stopped after {} tries with delay {}",
            tries,
            current.delay()
        );
        current
    }
}

impl<'a> Strategy<'a> for HybridTabuAnnealing<'a> {
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

        let mut tabu = TabuList::new(self.config.tabu_size);
        let mut route = path.to_vec();
        route.sort_by_key(|n| n.close());
        let initial = tour_of(route, distances, value, start);

        let mut current = self.repair(initial, &mut tabu, distances, value, start, rng);
        let mut details = Details::of(current.route(), distances, value, start);
        let mut best = current.clone();
        self.cost_history.push(best.cost());

        let mut temperature = self.config.initial_temperature;
        let mut accepted = 0usize;
        for _ in 0..self.config.max_iterations {
            let route = neighbour(current.route(), &details, &mut tabu, &self.config, rng);
            let candidate = tour_of(route, distances, value, start);
            let delta = candidate.cost() - current.cost();

            // Metropolis acceptance criterion
            let accept = if delta < 0 {
                true
            } else if temperature > 0.0 {
                rng.random_range(0.0..1.0) < (-(delta as f64) / temperature).exp()
            } else {
                false
            };

            if accept {
                current = candidate;
                details = Details::of(current.route(), distances, value, start);
                accepted += 1;
                if current.cost() < best.cost() {
                    best = current.clone();
                }
            }
            temperature *= self.config.cooling;
            self.cost_history.push(best.cost());
        }

        tracing::debug!(
            "HTA: {} nodes, {} iterations, {} accepted, {} tabu moves, best cost {} (value {}, delay {})",
            path.len(),
            self.config.max_iterations,
            accepted,
            tabu.len(),
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
        "hybrid tabu annealing"
    }
}
