//! Recursive time-window partitioning around a wrapped strategy.

use rand::rngs::StdRng;
use rand::Rng;

use super::config::DeiConfig;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::models::{Node, Tour};
use crate::random::rng_from_seed;
use crate::strategy::Strategy;

/// Counters collected during the last [`DivideEtImpera::solve`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeiStats {
    /// Pivot draws made while trying to partition subpaths.
    pub partition_attempts: usize,
    /// Subpaths successfully split in two.
    pub splits: usize,
    /// Subpaths handed to the wrapped strategy.
    pub segments: usize,
    /// Deepest recursion level reached (0 = top level).
    pub max_depth: usize,
}

/// The tour under construction, carried from one segment into the next.
struct Progress<'a> {
    route: Vec<&'a Node>,
    value: i64,
    delay: i64,
    current: &'a Node,
}

/// Divide-et-impera orchestrator.
///
/// A subpath longer than `split_threshold` is split around a random pivot
/// node into the nodes whose window closes before the pivot opens and all
/// the others; the two halves are solved recursively, earlier half first.
/// A subpath that is short enough, or that cannot be split within
/// `max_split` attempts, is handed to the wrapped [`Strategy`]. Arrival value
/// and last node flow from each solved segment into the next, so the
/// concatenated route evaluates exactly like the sum of its segments.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::constructive::Greedy;
/// use tw_dei::dei::DivideEtImpera;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 5, 20),
///     Node::new(2, 20, 0, 25, 40),
///     Node::new(3, 5, 0, 0, 10),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
///
/// let mut dei = DivideEtImpera::new(Greedy::new(), &dm, 30, 1000);
/// let tour = dei.solve(&nodes).unwrap();
/// assert_eq!(tour.ids(), vec![0, 3, 1, 2]);
/// assert_eq!((tour.value(), tour.delay()), (25, 0));
/// ```
pub struct DivideEtImpera<'m, S, R = StdRng> {
    strategy: S,
    distances: &'m DistanceMatrix,
    config: DeiConfig,
    rng: R,
    stats: DeiStats,
}

impl<'m, S> DivideEtImpera<'m, S, StdRng> {
    /// Creates an orchestrator with split threshold `p` and at most
    /// `max_split` partition attempts per subpath.
    pub fn new(strategy: S, distances: &'m DistanceMatrix, p: usize, max_split: usize) -> Self {
        let config = DeiConfig::default()
            .with_split_threshold(p)
            .with_max_split(max_split);
        Self::with_config(strategy, distances, config)
    }

    /// Creates an orchestrator from a full configuration.
    pub fn with_config(strategy: S, distances: &'m DistanceMatrix, config: DeiConfig) -> Self {
        let rng = rng_from_seed(config.seed);
        Self {
            strategy,
            distances,
            config,
            rng,
            stats: DeiStats::default(),
        }
    }
}

impl<'m, S, R: Rng> DivideEtImpera<'m, S, R> {
    /// Replaces the random generator.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> DivideEtImpera<'m, S, R2> {
        DivideEtImpera {
            strategy: self.strategy,
            distances: self.distances,
            config: self.config,
            rng,
            stats: self.stats,
        }
    }

    /// The wrapped strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The configuration in use.
    pub fn config(&self) -> &DeiConfig {
        &self.config
    }

    /// Counters from the last `solve` call.
    pub fn stats(&self) -> DeiStats {
        self.stats
    }

    /// Sequences `nodes`, starting from the base node.
    ///
    /// The returned route is a permutation of `nodes` that begins with the
    /// base node (which adds nothing to value or delay). State from earlier
    /// calls is discarded.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidConfig`] if the configuration is invalid
    /// - [`SolveError::NodeOutOfRange`] / [`SolveError::DuplicateNode`] for
    ///   node IDs that do not map one-to-one onto the distance matrix
    /// - [`SolveError::BaseNotFound`] if the configured base node is absent
    /// - any error raised by the wrapped strategy
    #[tracing::instrument(level = "debug", name = "DEI solve", skip_all, fields(nodes = nodes.len()))]
    pub fn solve<'a>(&mut self, nodes: &'a [Node]) -> Result<Tour<'a>, SolveError>
    where
        S: Strategy<'a>,
    {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        self.check_nodes(nodes)?;
        self.stats = DeiStats::default();

        let base_idx = match self.config.base_node {
            Some(id) => nodes
                .iter()
                .position(|n| n.id() == id)
                .ok_or(SolveError::BaseNotFound(id))?,
            None if nodes.is_empty() => return Ok(Tour::empty(0)),
            None => 0,
        };
        let base = &nodes[base_idx];
        let path: Vec<&'a Node> = nodes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != base_idx)
            .map(|(_, n)| n)
            .collect();

        let mut progress = Progress {
            route: Vec::with_capacity(nodes.len()),
            value: 0,
            delay: 0,
            current: base,
        };
        progress.route.push(base);
        self.divide(path, &mut progress, 0)?;

        if self.config.return_to_base && progress.route.len() > 1 {
            progress.value += self.distances.get(progress.current.id(), base.id());
        }

        tracing::debug!(
            "DEI[{}]: {} nodes, {} segments, {} splits, {} partition attempts, value {}, delay {}",
            self.strategy.name(),
            nodes.len(),
            self.stats.segments,
            self.stats.splits,
            self.stats.partition_attempts,
            progress.value,
            progress.delay
        );
        Ok(Tour::new(progress.route, progress.value, progress.delay))
    }

    /// Runs [`solve`](Self::solve) `restarts` times and keeps the cheapest tour.
    ///
    /// Ties keep the earliest tour found.
    pub fn solve_repeated<'a>(
        &mut self,
        nodes: &'a [Node],
        restarts: usize,
    ) -> Result<Tour<'a>, SolveError>
    where
        S: Strategy<'a>,
    {
        if restarts == 0 {
            return Err(SolveError::InvalidConfig(
                "restarts must be at least 1".into(),
            ));
        }
        let mut best = self.solve(nodes)?;
        for _ in 1..restarts {
            let tour = self.solve(nodes)?;
            if tour.cost() < best.cost() {
                best = tour;
            }
        }
        Ok(best)
    }

    fn check_nodes(&self, nodes: &[Node]) -> Result<(), SolveError> {
        let size = self.distances.size();
        let mut seen = vec![false; size];
        for n in nodes {
            if !self.distances.contains(n.id()) {
                return Err(SolveError::NodeOutOfRange {
                    node_id: n.id(),
                    size,
                });
            }
            if std::mem::replace(&mut seen[n.id()], true) {
                return Err(SolveError::DuplicateNode(n.id()));
            }
        }
        Ok(())
    }

    fn divide<'a>(
        &mut self,
        path: Vec<&'a Node>,
        progress: &mut Progress<'a>,
        depth: usize,
    ) -> Result<(), SolveError>
    where
        S: Strategy<'a>,
    {
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if path.len() <= self.config.split_threshold {
            return self.conquer(&path, progress);
        }

        match self.partition(&path) {
            Some((first, second)) => {
                self.stats.splits += 1;
                tracing::trace!(
                    "DEI: split {} nodes into {} + {} at depth {}",
                    path.len(),
                    first.len(),
                    second.len(),
                    depth
                );
                self.divide(first, progress, depth + 1)?;
                self.divide(second, progress, depth + 1)
            }
            None => {
                tracing::debug!(
                    "DEI: no split for {} nodes after {} attempts, solving whole",
                    path.len(),
                    self.config.max_split
                );
                self.conquer(&path, progress)
            }
        }
    }

    /// Draws pivots until one splits `path` into two non-empty parts.
    ///
    /// `first` holds the nodes whose window closes before the pivot opens.
    fn partition<'a>(&mut self, path: &[&'a Node]) -> Option<(Vec<&'a Node>, Vec<&'a Node>)> {
        for _ in 0..self.config.max_split {
            self.stats.partition_attempts += 1;
            let pivot = path[self.rng.random_range(0..path.len())];
            let (first, second): (Vec<&'a Node>, Vec<&'a Node>) =
                path.iter().partition(|n| n.close() < pivot.open());
            if !first.is_empty() && !second.is_empty() {
                return Some((first, second));
            }
        }
        None
    }

    /// Solves one subpath with the wrapped strategy and appends the result.
    fn conquer<'a>(
        &mut self,
        path: &[&'a Node],
        progress: &mut Progress<'a>,
    ) -> Result<(), SolveError>
    where
        S: Strategy<'a>,
    {
        self.stats.segments += 1;
        self.strategy.execute(
            path,
            self.distances,
            progress.value,
            progress.current,
            &mut self.rng,
        )?;

        let solution = self.strategy.solution();
        progress.route.extend_from_slice(solution.route());
        progress.value = solution.value();
        progress.delay += solution.delay();
        if let Some(last) = solution.last() {
            progress.current = last;
        }
        tracing::trace!(
            "DEI: segment of {} nodes solved, value {}, delay {}",
            path.len(),
            progress.value,
            progress.delay
        );
        Ok(())
    }
}
