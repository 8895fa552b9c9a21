//! Neighbourhood moves and the tabu list.

use std::collections::{HashSet, VecDeque};

use rand::Rng;

use super::config::HtaConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::advance;
use crate::models::Node;

/// Draws per move before a tabu candidate is accepted anyway.
const MAX_TABU_RETRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum MoveKind {
    ShiftLeft,
    ShiftRight,
    Reverse,
    Swap,
}

/// Identifies a move by its kind and the IDs of the two nodes involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct MoveKey {
    kind: MoveKind,
    first: usize,
    second: usize,
}

impl MoveKey {
    fn new(kind: MoveKind, first: &Node, second: &Node) -> Self {
        Self {
            kind,
            first: first.id(),
            second: second.id(),
        }
    }
}

/// FIFO of recent moves with O(1) membership.
#[derive(Debug, Clone)]
pub(super) struct TabuList {
    capacity: usize,
    queue: VecDeque<MoveKey>,
    set: HashSet<MoveKey>,
}

impl TabuList {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            set: HashSet::with_capacity(capacity),
        }
    }

    pub(super) fn contains(&self, key: &MoveKey) -> bool {
        self.set.contains(key)
    }

    /// Records `key`, evicting the oldest entry when full.
    pub(super) fn push(&mut self, key: MoveKey) {
        if self.capacity == 0 || self.set.contains(&key) {
            return;
        }
        if self.queue.len() >= self.capacity {
            if let Some(old) = self.queue.pop_front() {
                self.set.remove(&old);
            }
        }
        self.queue.push_back(key);
        self.set.insert(key);
    }

    pub(super) fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Positions where the route waits for a window to open, and where it is late.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Details {
    pub(super) waits: Vec<usize>,
    pub(super) delays: Vec<usize>,
}

impl Details {
    pub(super) fn of(
        route: &[&Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &Node,
    ) -> Self {
        let mut details = Self::default();
        let mut current = start;
        let mut value = value;
        for (pos, &next) in route.iter().enumerate() {
            let reach = value + distances.get(current.id(), next.id());
            let (arrival, lateness) = advance(distances, current, next, value);
            if reach < next.open() {
                details.waits.push(pos);
            }
            if lateness > 0 {
                details.delays.push(pos);
            }
            value = arrival;
            current = next;
        }
        details
    }
}

/// Draws a move until it is not tabu (or retries run out) and records it.
fn pick<F>(tabu: &mut TabuList, mut draw: F) -> (usize, usize)
where
    F: FnMut() -> (MoveKey, usize, usize),
{
    let mut candidate = draw();
    for _ in 0..MAX_TABU_RETRIES {
        if !tabu.contains(&candidate.0) {
            break;
        }
        candidate = draw();
    }
    tabu.push(candidate.0);
    (candidate.1, candidate.2)
}

/// Moves a late node to an earlier position.
pub(super) fn shift_left<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    details: &Details,
    tabu: &mut TabuList,
    rng: &mut R,
) -> Vec<&'a Node> {
    let mut out = route.to_vec();
    if details.delays.is_empty() {
        return out;
    }
    let (moved, other) = pick(tabu, || {
        let moved = details.delays[rng.random_range(0..details.delays.len())];
        let other = rng.random_range(0..=moved.saturating_sub(1));
        (
            MoveKey::new(MoveKind::ShiftLeft, route[other], route[moved]),
            moved,
            other,
        )
    });
    let node = out.remove(moved);
    out.insert(other, node);
    out
}

/// Moves a node that had to wait to a later position.
pub(super) fn shift_right<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    details: &Details,
    tabu: &mut TabuList,
    rng: &mut R,
) -> Vec<&'a Node> {
    let mut out = route.to_vec();
    if details.waits.is_empty() {
        return out;
    }
    let (moved, other) = pick(tabu, || {
        let moved = details.waits[rng.random_range(0..details.waits.len())];
        let other = rng.random_range(moved..route.len());
        (
            MoveKey::new(MoveKind::ShiftRight, route[other], route[moved]),
            moved,
            other,
        )
    });
    let node = out.remove(moved);
    out.insert(other, node);
    out
}

/// Reverses the segment between two random positions (end exclusive).
pub(super) fn reverse<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    tabu: &mut TabuList,
    rng: &mut R,
) -> Vec<&'a Node> {
    let mut out = route.to_vec();
    let n = route.len();
    let (i, j) = pick(tabu, || {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        (MoveKey::new(MoveKind::Reverse, route[i], route[j]), i, j)
    });
    out[i.min(j)..i.max(j)].reverse();
    out
}

/// Exchanges two random positions.
pub(super) fn swap<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    tabu: &mut TabuList,
    rng: &mut R,
) -> Vec<&'a Node> {
    let mut out = route.to_vec();
    let n = route.len();
    let (i, j) = pick(tabu, || {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        (MoveKey::new(MoveKind::Swap, route[i], route[j]), i, j)
    });
    out.swap(i, j);
    out
}

/// Generates one neighbour: a random move, then an optional perturbation
/// that relocates a fraction of the nodes.
///
/// `route` must not be empty.
pub(super) fn neighbour<'a, R: Rng + ?Sized>(
    route: &[&'a Node],
    details: &Details,
    tabu: &mut TabuList,
    config: &HtaConfig,
    rng: &mut R,
) -> Vec<&'a Node> {
    let mut out = match rng.random_range(0..4) {
        0 => shift_left(route, details, tabu, rng),
        1 => shift_right(route, details, tabu, rng),
        2 => reverse(route, tabu, rng),
        _ => swap(route, tabu, rng),
    };

    let roll: f64 = rng.random();
    if roll < config.perturbation {
        let count = (out.len() as f64 * config.perturbed) as usize;
        for _ in 0..count {
            let node = out.remove(rng.random_range(0..out.len()));
            let at = rng.random_range(0..=out.len());
            out.insert(at, node);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn sorted_ids(route: &[&Node]) -> Vec<usize> {
        let mut ids: Vec<usize> = route.iter().map(|n| n.id()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_details() {
        let (nodes, dm) = scenario();
        // 0 → 2 arrives 20, waits to 25; 2 → 1 at 35, late; 1 → 3 at 40, late
        let route = vec![&nodes[2], &nodes[1], &nodes[3]];
        let details = Details::of(&route, &dm, 0, &nodes[0]);
        assert_eq!(details.waits, vec![0]);
        assert_eq!(details.delays, vec![1, 2]);
    }

    #[test]
    fn test_shift_left_moves_late_node_earlier() {
        let (nodes, dm) = scenario();
        let route = vec![&nodes[2], &nodes[1], &nodes[3]];
        let details = Details::of(&route, &dm, 0, &nodes[0]);
        let mut tabu = TabuList::new(10);
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let out = shift_left(&route, &details, &mut tabu, &mut rng);
            assert_eq!(sorted_ids(&out), vec![1, 2, 3]);
            assert_ne!(out, route);
        }
    }

    #[test]
    fn test_shift_without_candidates_is_identity() {
        let (nodes, dm) = scenario();
        let route = vec![&nodes[3], &nodes[1], &nodes[2]];
        let details = Details::of(&route, &dm, 0, &nodes[0]);
        assert!(details.delays.is_empty());
        let mut tabu = TabuList::new(10);
        let out = shift_left(&route, &details, &mut tabu, &mut create_rng(1));
        assert_eq!(out, route);
        assert_eq!(tabu.len(), 0);
    }

    #[test]
    fn test_neighbour_is_permutation() {
        let nodes: Vec<Node> = (0..12)
            .map(|i| Node::new(i, (i * 7 % 13) as i64, (i * 5 % 11) as i64, 0, 30))
            .collect();
        let dm = DistanceMatrix::from_nodes(&nodes);
        let route: Vec<&Node> = nodes[1..].iter().collect();
        let config = HtaConfig::default().with_perturbation(1.0).with_perturbed(0.5);
        let mut tabu = TabuList::new(5);
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let details = Details::of(&route, &dm, 0, &nodes[0]);
            let out = neighbour(&route, &details, &mut tabu, &config, &mut rng);
            assert_eq!(sorted_ids(&out), (1..12).collect::<Vec<_>>());
        }
        assert!(tabu.len() <= 5);
    }

    #[test]
    fn test_tabu_list_evicts_oldest() {
        let (nodes, _) = scenario();
        let a = MoveKey::new(MoveKind::Swap, &nodes[1], &nodes[2]);
        let b = MoveKey::new(MoveKind::Swap, &nodes[2], &nodes[3]);
        let c = MoveKey::new(MoveKind::Reverse, &nodes[1], &nodes[2]);
        let mut tabu = TabuList::new(2);
        tabu.push(a);
        tabu.push(b);
        tabu.push(b);
        assert_eq!(tabu.len(), 2);
        tabu.push(c);
        assert!(!tabu.contains(&a));
        assert!(tabu.contains(&b));
        assert!(tabu.contains(&c));
    }

    #[test]
    fn test_zero_capacity_tabu_list() {
        let (nodes, _) = scenario();
        let mut tabu = TabuList::new(0);
        tabu.push(MoveKey::new(MoveKind::Swap, &nodes[1], &nodes[2]));
        assert_eq!(tabu.len(), 0);
    }
}
