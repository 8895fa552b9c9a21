//! Restarting 2-opt descent over the time-window objective.
//!
//! # Algorithm
//!
//! Scan position pairs `a < b` in lexicographic order. Reverse `[a..=b]`
//! and re-evaluate the whole route; on a strict improvement keep the
//! reversal and restart the scan from `a = 0`, otherwise undo it. Stop
//! when a full scan finds nothing, so the result is a local optimum under
//! segment reversal.
//!
//! Unlike [`reversal_search`](super::reversal_search), which makes one pass,
//! this runs to convergence.
//!
//! # Complexity
//!
//! O(n³) per scan; the number of scans is bounded by the number of strict
//! cost decreases.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use crate::constructive::random_tour;
use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::evaluation::evaluate;
use crate::models::{Node, Tour};
use crate::strategy::Strategy;

/// Runs restarting 2-opt descent on `tour` until no reversal improves it.
///
/// `value` and `start` are the carried state the tour was evaluated from.
///
/// # Examples
///
/// ```
/// use tw_dei::models::{Node, Tour};
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::evaluation::evaluate;
/// use tw_dei::local_search::two_opt_search;
///
/// let nodes: Vec<Node> = (0..6).map(|i| Node::new(i, i as i64 * 10, 0, 0, 1000)).collect();
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let route = vec![&nodes[3], &nodes[2], &nodes[1], &nodes[4], &nodes[5]];
/// let (value, delay) = evaluate(&route, &dm, 0, &nodes[0]);
///
/// let out = two_opt_search(Tour::new(route, value, delay), &dm, 0, &nodes[0]);
/// assert_eq!(out.ids(), vec![1, 2, 3, 4, 5]);
/// assert_eq!(out.value(), 50);
/// ```
pub fn two_opt_search<'a>(
    tour: Tour<'a>,
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
) -> Tour<'a> {
    let (mut route, mut best_value, mut best_delay) = tour.into_parts();
    let n = route.len();
    let mut improved = n >= 2;
    let mut scans = 0usize;

    while improved {
        improved = false;
        scans += 1;
        'scan: for a in 0..n - 1 {
            for b in a + 1..n {
                route[a..=b].reverse();
                let (v, d) = evaluate(&route, distances, value, start);
                if v + d < best_value + best_delay {
                    best_value = v;
                    best_delay = d;
                    improved = true;
                    break 'scan;
                }
                route[a..=b].reverse();
            }
        }
    }

    tracing::trace!(
        "2-opt: {} nodes converged after {} scans, cost {}",
        n,
        scans,
        best_value + best_delay
    );
    Tour::new(route, best_value, best_delay)
}

/// 2-opt strategy: a random order improved by [`two_opt_search`].
#[derive(Debug, Clone, Default)]
pub struct TwoOpt<'a> {
    solution: Tour<'a>,
}

impl TwoOpt<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Strategy<'a> for TwoOpt<'a> {
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError> {
        let initial = random_tour(path, distances, value, start, rng);
        self.solution = two_opt_search(initial, distances, value, start);
        Ok(())
    }

    fn solution(&self) -> &Tour<'a> {
        &self.solution
    }

    fn name(&self) -> &'static str {
        "2-opt"
    }
}
