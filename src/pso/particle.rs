//! A single swarm agent.

use rand::Rng;

use crate::constructive::greedy_tour;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::{advance, evaluate, rank_by_insertion_cost};
use crate::local_search::reversal_search;
use crate::models::{Node, Tour};
use crate::random::{quasi_geometric_index, shuffle};

/// Dense numbering of the nodes of one subpath.
///
/// Built once per swarm run. Reference routes and construction bookkeeping
/// are keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    slots: Vec<Option<usize>>,
    len: usize,
}

impl NodeIndex {
    /// Numbers the nodes of `path` by their position.
    pub fn new(path: &[&Node]) -> Self {
        let size = path.iter().map(|n| n.id() + 1).max().unwrap_or(0);
        let mut slots = vec![None; size];
        for (i, n) in path.iter().enumerate() {
            slots[n.id()] = Some(i);
        }
        Self {
            slots,
            len: path.len(),
        }
    }

    /// The slot of node `id`, if it belongs to the subpath.
    pub fn slot(&self, id: usize) -> Option<usize> {
        self.slots.get(id).copied().flatten()
    }

    /// Number of nodes in the subpath.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the subpath is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A reference route with a slot → position lookup.
struct Reference<'r, 'a> {
    name: &'static str,
    route: &'r [&'a Node],
    index: &'r NodeIndex,
    positions: Vec<Option<usize>>,
}

impl<'r, 'a> Reference<'r, 'a> {
    fn new(
        name: &'static str,
        route: &'r [&'a Node],
        index: &'r NodeIndex,
    ) -> Result<Self, SolveError> {
        let mut positions = vec![None; index.len()];
        for (i, n) in route.iter().enumerate() {
            let slot = index.slot(n.id()).ok_or(SolveError::MissingNode {
                node_id: n.id(),
                reference: name,
            })?;
            positions[slot] = Some(i);
        }
        Ok(Self {
            name,
            route,
            index,
            positions,
        })
    }

    /// The node following `node` in this route, `None` if `node` is last.
    fn successor(&self, node: &Node) -> Result<Option<&'a Node>, SolveError> {
        let pos = self
            .index
            .slot(node.id())
            .and_then(|slot| self.positions[slot])
            .ok_or(SolveError::MissingNode {
                node_id: node.id(),
                reference: self.name,
            })?;
        Ok(self.route.get(pos + 1).copied())
    }
}

fn shuffled_tour<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
    rng: &mut R,
) -> Tour<'a> {
    let mut route = route.to_vec();
    shuffle(&mut route, rng);
    let (v, d) = evaluate(&route, distances, value, start);
    Tour::new(route, v, d)
}

/// A particle of the swarm.
///
/// Holds three independently owned routes over the same node set: a greedy
/// seed, an exploratory `intention` re-randomized after every move, and
/// its personal best. A move builds a new route whose every step is drawn
/// from the successors these routes and the swarm's global best propose.
#[derive(Debug, Clone)]
pub struct Particle<'a> {
    beta: f64,
    deep_search: f64,
    greedy: Tour<'a>,
    intention: Tour<'a>,
    personal_best: Tour<'a>,
}

impl<'a> Particle<'a> {
    /// Creates an uninitialized particle.
    pub fn new(beta: f64, deep_search: f64) -> Self {
        Self {
            beta,
            deep_search,
            greedy: Tour::default(),
            intention: Tour::default(),
            personal_best: Tour::default(),
        }
    }

    /// Seeds the greedy route and two random shuffles of `path`.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) {
        self.greedy = greedy_tour(path, distances, value, start);
        self.personal_best = shuffled_tour(path, distances, value, start, rng);
        self.intention = shuffled_tour(path, distances, value, start, rng);
    }

    /// The greedy seed route.
    pub fn greedy(&self) -> &Tour<'a> {
        &self.greedy
    }

    /// The exploratory route.
    pub fn intention(&self) -> &Tour<'a> {
        &self.intention
    }

    /// The best route this particle has built.
    pub fn personal_best(&self) -> &Tour<'a> {
        &self.personal_best
    }

    /// Moves the particle: builds one route guided by its references and
    /// `global_best`, then updates intention and personal best.
    ///
    /// Returns the (possibly unchanged) personal best.
    ///
    /// # Errors
    ///
    /// [`SolveError::MissingNode`] if a placed node cannot be found in one
    /// of the reference routes.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        global_best: &Tour<'a>,
        index: &NodeIndex,
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<&Tour<'a>, SolveError> {
        let built = self.construct(global_best, index, distances, value, start, rng)?;

        self.intention = shuffled_tour(built.route(), distances, value, start, rng);

        let roll: f64 = rng.random();
        let built = if roll < self.deep_search {
            reversal_search(built, distances, value, start)
        } else {
            built
        };

        if built.cost() < self.personal_best.cost() {
            self.personal_best = built;
        }
        Ok(&self.personal_best)
    }

    fn construct<R: Rng + ?Sized>(
        &self,
        global_best: &Tour<'a>,
        index: &NodeIndex,
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<Tour<'a>, SolveError> {
        let references = [
            Reference::new("greedy", self.greedy.route(), index)?,
            Reference::new("intention", self.intention.route(), index)?,
            Reference::new("personal best", self.personal_best.route(), index)?,
            Reference::new("global best", global_best.route(), index)?,
        ];

        let n = global_best.len();
        let mut remaining: Vec<&'a Node> = global_best.route().to_vec();
        let mut used = vec![false; index.len()];
        let mut route: Vec<&'a Node> = Vec::with_capacity(n);
        let mut current = start;
        let mut val = value;
        let mut delay = 0;

        for _ in 0..n {
            let mut options: Vec<&'a Node> = Vec::with_capacity(references.len());
            if route.is_empty() {
                options.extend(references.iter().filter_map(|r| r.route.first().copied()));
            } else {
                for reference in &references {
                    if let Some(next) = reference.successor(current)? {
                        let placed = index.slot(next.id()).is_some_and(|slot| used[slot]);
                        if !placed {
                            options.push(next);
                        }
                    }
                }
            }

            let next = if options.is_empty() {
                let idx = rng.random_range(0..remaining.len());
                remaining.remove(idx)
            } else {
                rank_by_insertion_cost(&mut options, current, distances, val);
                let next = options[quasi_geometric_index(rng, self.beta, options.len())];
                let idx = remaining
                    .iter()
                    .position(|n| n.id() == next.id())
                    .ok_or(SolveError::MissingNode {
                        node_id: next.id(),
                        reference: "remaining",
                    })?;
                remaining.remove(idx)
            };

            let (arrival, lateness) = advance(distances, current, next, val);
            val = arrival;
            delay += lateness;
            if let Some(slot) = index.slot(next.id()) {
                used[slot] = true;
            }
            route.push(next);
            current = next;
        }

        Ok(Tour::new(route, val, delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn instance(n: usize) -> (Vec<Node>, DistanceMatrix) {
        let nodes: Vec<Node> = (0..n)
            .map(|i| {
                let x = ((i * 17) % 41) as i64;
                let y = ((i * 29) % 37) as i64;
                let open = (i as i64 * 13) % 90;
                Node::new(i, x, y, open, open + 40)
            })
            .collect();
        let dm = DistanceMatrix::from_nodes(&nodes);
        (nodes, dm)
    }

    fn identity<'a>(path: &[&'a Node], dm: &DistanceMatrix, start: &'a Node) -> Tour<'a> {
        let (v, d) = evaluate(path, dm, 0, start);
        Tour::new(path.to_vec(), v, d)
    }

    fn sorted_ids(tour: &Tour<'_>) -> Vec<usize> {
        let mut ids = tour.ids();
        ids.sort();
        ids
    }

    #[test]
    fn test_initialize_references_are_permutations() {
        let (nodes, dm) = instance(10);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let mut p = Particle::new(0.9, 0.0);
        p.initialize(&path, &dm, 0, &nodes[0], &mut create_rng(42));
        let expected: Vec<usize> = (1..10).collect();
        assert_eq!(sorted_ids(p.greedy()), expected);
        assert_eq!(sorted_ids(p.intention()), expected);
        assert_eq!(sorted_ids(p.personal_best()), expected);
        assert_eq!(p.greedy(), &greedy_tour(&path, &dm, 0, &nodes[0]));
    }

    #[test]
    fn test_step_keeps_permutation() {
        let (nodes, dm) = instance(12);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let mut rng = create_rng(7);
        let mut p = Particle::new(0.6, 0.5);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);
        for _ in 0..20 {
            let best = p
                .step(&global, &index, &dm, 0, &nodes[0], &mut rng)
                .expect("references share the node set");
            assert_eq!(sorted_ids(best), (1..12).collect::<Vec<_>>());
            assert_eq!(sorted_ids(p.intention()), (1..12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_personal_best_never_worsens() {
        let (nodes, dm) = instance(15);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let mut rng = create_rng(3);
        let mut p = Particle::new(0.9, 0.2);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);
        let mut last = p.personal_best().cost();
        for _ in 0..30 {
            let cost = p
                .step(&global, &index, &dm, 0, &nodes[0], &mut rng)
                .expect("references share the node set")
                .cost();
            assert!(cost <= last);
            last = cost;
        }
    }

    #[test]
    fn test_state_matches_recurrence() {
        let (nodes, dm) = instance(9);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let mut rng = create_rng(21);
        let mut p = Particle::new(0.5, 1.0);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);
        p.step(&global, &index, &dm, 0, &nodes[0], &mut rng)
            .expect("references share the node set");
        for tour in [p.greedy(), p.intention(), p.personal_best()] {
            assert_eq!(
                evaluate(tour.route(), &dm, 0, &nodes[0]),
                (tour.value(), tour.delay())
            );
        }
    }

    #[test]
    fn test_missing_node_is_reported() {
        let (nodes, dm) = instance(6);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let mut rng = create_rng(1);
        let mut p = Particle::new(0.9, 0.0);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);

        // A global best holding a node outside the subpath.
        let foreign: Vec<&Node> = vec![&nodes[0]; 3];
        let global = identity(&foreign, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let err = p
            .step(&global, &index, &dm, 0, &nodes[0], &mut rng)
            .expect_err("node 0 is not in the particle's references");
        assert!(matches!(err, SolveError::MissingNode { .. }));
    }

    #[test]
    fn test_single_node() {
        let (nodes, dm) = instance(2);
        let path: Vec<&Node> = vec![&nodes[1]];
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let mut rng = create_rng(5);
        let mut p = Particle::new(0.9, 1.0);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);
        let best = p
            .step(&global, &index, &dm, 0, &nodes[0], &mut rng)
            .expect("single node");
        assert_eq!(best.ids(), vec![1]);
    }

    #[test]
    fn test_node_index_sized_by_subpath() {
        let nodes: Vec<Node> = (0..5)
            .map(|i| Node::new(1000 + i, i as i64 * 3, 0, 0, 50))
            .collect();
        let path: Vec<&Node> = nodes.iter().collect();
        let index = NodeIndex::new(&path);
        assert_eq!(index.len(), 5);
        assert_eq!(index.slot(1003), Some(3));
        assert_eq!(index.slot(7), None);
        assert_eq!(index.slot(5000), None);

        let reference = Reference::new("greedy", &path[..], &index).expect("same node set");
        assert_eq!(reference.positions.len(), 5);
        assert_eq!(
            reference.successor(&nodes[1]).expect("known node").map(|n| n.id()),
            Some(1002)
        );
        assert_eq!(reference.successor(&nodes[4]).expect("known node"), None);
    }

    #[test]
    fn test_step_with_sparse_ids() {
        let nodes: Vec<Node> = (0..8)
            .map(|i| Node::new(i * 100, (i * 7 % 11) as i64, (i * 3 % 5) as i64, 0, 40))
            .collect();
        let mut dm = DistanceMatrix::new(701);
        for a in &nodes {
            for b in &nodes {
                dm.set(a.id(), b.id(), a.distance_to(b));
            }
        }
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        let mut rng = create_rng(13);
        let mut p = Particle::new(0.7, 0.3);
        p.initialize(&path, &dm, 0, &nodes[0], &mut rng);
        for _ in 0..10 {
            let best = p
                .step(&global, &index, &dm, 0, &nodes[0], &mut rng)
                .expect("references share the node set");
            assert_eq!(sorted_ids(best), (1..8).map(|i| i * 100).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_high_beta_picks_top_ranked_head() {
        let (nodes, dm) = instance(12);
        let path: Vec<&Node> = nodes[1..].iter().collect();
        let global = identity(&path, &dm, &nodes[0]);
        let index = NodeIndex::new(&path);
        for seed in 0..10 {
            let mut rng = create_rng(seed);
            let mut p = Particle::new(0.999_999_9, 0.0);
            p.initialize(&path, &dm, 0, &nodes[0], &mut rng);

            let mut heads: Vec<&Node> = [p.greedy(), p.intention(), p.personal_best(), &global]
                .iter()
                .filter_map(|t| t.route().first().copied())
                .collect();
            rank_by_insertion_cost(&mut heads, &nodes[0], &dm, 0);

            let built = p
                .construct(&global, &index, &dm, 0, &nodes[0], &mut rng)
                .expect("references share the node set");
            assert_eq!(built.route()[0].id(), heads[0].id());
        }
    }
}
