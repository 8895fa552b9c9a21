//! Particle swarm execution loop.

use rand::Rng;

use super::config::PsoConfig;
use super::particle::{NodeIndex, Particle};
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::evaluate;
use crate::models::{Node, Tour};
use crate::strategy::Strategy;

/// Particle swarm optimization (PSO) strategy.
///
/// The global best starts as the input order. Every iteration each particle
/// moves once against the global best of the previous iteration; the best
/// personal best of the round replaces the global best only at the end of
/// the round if it is strictly better. The loop stops after
/// `max_iterations`, or once more than `max_no_improvement` consecutive
/// rounds fail to improve.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::pso::{ParticleSwarm, PsoConfig};
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
/// let config = PsoConfig::default()
///     .with_swarm_size(5)
///     .with_max_iterations(50)
///     .with_max_no_improvement(20);
/// let mut pso = ParticleSwarm::new(config);
/// pso.execute(&path, &dm, 0, &nodes[0], &mut create_rng(42)).unwrap();
/// assert_eq!(pso.solution().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSwarm<'a> {
    config: PsoConfig,
    swarm: Vec<Particle<'a>>,
    solution: Tour<'a>,
    iterations: usize,
    cost_history: Vec<i64>,
}

impl<'a> ParticleSwarm<'a> {
    /// Creates a PSO strategy with the given configuration.
    pub fn new(config: PsoConfig) -> Self {
        Self {
            config,
            swarm: Vec::new(),
            solution: Tour::default(),
            iterations: 0,
            cost_history: Vec::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Particles as left by the last `execute` call.
    pub fn swarm(&self) -> &[Particle<'a>] {
        &self.swarm
    }

    /// Iterations performed by the last `execute` call.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Global best cost at start and after every iteration of the last
    /// `execute` call.
    pub fn cost_history(&self) -> &[i64] {
        &self.cost_history
    }
}

impl<'a> Strategy<'a> for ParticleSwarm<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        self.iterations = 0;
        self.cost_history.clear();
        self.swarm.clear();
        if path.is_empty() {
            self.solution = Tour::empty(value);
            return Ok(());
        }

        let index = NodeIndex::new(path);
        let (v, d) = evaluate(path, distances, value, start);
        let mut global_best = Tour::new(path.to_vec(), v, d);
        self.cost_history.push(global_best.cost());

        for _ in 0..self.config.swarm_size {
            let mut particle = Particle::new(self.config.beta, self.config.deep_search);
            particle.initialize(path, distances, value, start, rng);
            self.swarm.push(particle);
        }

        let mut no_improvement = 0usize;
        for iteration in 0..self.config.max_iterations {
            self.iterations = iteration + 1;

            let mut round_best: Option<Tour<'a>> = None;
            for particle in &mut self.swarm {
                let best = particle.step(&global_best, &index, distances, value, start, rng)?;
                if round_best.as_ref().is_none_or(|r| best.cost() < r.cost()) {
                    round_best = Some(best.clone());
                }
            }

            match round_best {
                Some(best) if best.cost() < global_best.cost() => {
                    tracing::trace!(
                        "PSO: iteration {} improved global best {} -> {}",
                        iteration,
                        global_best.cost(),
                        best.cost()
                    );
                    global_best = best;
                    no_improvement = 0;
                }
                _ => no_improvement += 1,
            }
            self.cost_history.push(global_best.cost());

            if no_improvement > self.config.max_no_improvement {
                break;
            }
        }

        tracing::debug!(
            "PSO: {} nodes, {} particles, {} iterations, best cost {} (value {}, delay {})",
            path.len(),
            self.swarm.len(),
            self.iterations,
            global_best.cost(),
            global_best.value(),
            global_best.delay()
        );
        self.solution = global_best;
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "pso"
    }
}
