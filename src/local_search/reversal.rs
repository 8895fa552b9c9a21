//! Segment-reversal (2-opt style) deep search.
//!
//! # Algorithm
//!
//! For every position pair `a < b`, reverse the segment `[a..=b]` and
//! re-evaluate the whole route with the arrival/lateness recurrence. Keep
//! the reversal if `value + delay` strictly improves, otherwise undo it.
//! Later pairs operate on the route as modified by earlier accepted ones.
//! A single pass is made.
//!
//! Full re-evaluation is required: waiting and lateness make the objective
//! non-additive over edges, so the classic edge-delta of 2-opt does not apply.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::evaluation::evaluate;
use crate::models::{Node, Tour};

/// Applies one pass of segment-reversal search to `tour`.
///
/// `value` and `start` are the carried state the tour was evaluated from.
/// The returned tour is never worse than the input.
///
/// # Examples
///
/// ```
/// use tw_dei::models::{Node, Tour};
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::evaluation::evaluate;
/// use tw_dei::local_search::reversal_search;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 0, 100),
///     Node::new(2, 20, 0, 0, 100),
///     Node::new(3, 30, 0, 0, 100),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let route = vec![&nodes[3], &nodes[2], &nodes[1]];
/// let (value, delay) = evaluate(&route, &dm, 0, &nodes[0]);
///
/// let improved = reversal_search(Tour::new(route, value, delay), &dm, 0, &nodes[0]);
/// assert_eq!(improved.ids(), vec![1, 2, 3]);
/// assert_eq!(improved.value(), 30);
/// ```
pub fn reversal_search<'a>(
    tour: Tour<'a>,
    distances: &DistanceMatrix,
    value: i64,
    start: &'a Node,
) -> Tour<'a> {
    let (mut route, mut best_value, mut best_delay) = tour.into_parts();
    let n = route.len();
    if n < 2 {
        return Tour::new(route, best_value, best_delay);
    }

    for a in 0..n - 1 {
        for b in a + 1..n {
            route[a..=b].reverse();
            let (v, d) = evaluate(&route, distances, value, start);
            if v + d < best_value + best_delay {
                best_value = v;
                best_delay = d;
            } else {
                route[a..=b].reverse();
            }
        }
    }

    Tour::new(route, best_value, best_delay)
}
