//! Arrival/lateness recurrence and insertion cost.
//!
//! Every strategy evaluates routes through [`advance`], folding left to right:
//!
//! ```text
//! value ← max(value + d(current, next), next.open)
//! delay ← delay + max(0, value − next.close)
//! ```
//!
//! The fold is order dependent, so reordering a route changes its result.

use crate::distance::DistanceMatrix;
use crate::models::Node;

/// Applies one step of the recurrence, moving from `from` to `to`.
///
/// Returns the new arrival value and the lateness incurred at `to`.
pub fn advance(distances: &DistanceMatrix, from: &Node, to: &Node, value: i64) -> (i64, i64) {
    let arrival = (value + distances.get(from.id(), to.id())).max(to.open());
    (arrival, to.window().lateness(arrival))
}

/// Evaluates a route starting at `start` with arrival value `value`.
///
/// Returns `(value, delay)` after the last node; `delay` only counts the
/// lateness accumulated along `route`. An empty route returns `(value, 0)`.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::evaluation::evaluate;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 5, 20),
///     Node::new(2, 20, 0, 25, 40),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let route: Vec<&Node> = vec![&nodes[2], &nodes[1]];
/// // 0 → 2: arrive 20, wait to 25; 2 → 1: arrive 35, late by 15
/// assert_eq!(evaluate(&route, &dm, 0, &nodes[0]), (35, 15));
/// ```
pub fn evaluate(route: &[&Node], distances: &DistanceMatrix, value: i64, start: &Node) -> (i64, i64) {
    let mut current = start;
    let mut value = value;
    let mut delay = 0;
    for &next in route {
        let (arrival, lateness) = advance(distances, current, next, value);
        value = arrival;
        delay += lateness;
        current = next;
    }
    (value, delay)
}

/// Ranking score for visiting `candidate` right after `current`.
///
/// `max(open, value + d) − max(0, value + d − close)` with
/// `d = distances[current][candidate]`. Lower is better. Only used to order
/// candidates; it ignores downstream effects.
pub fn insertion_cost(
    candidate: &Node,
    current: &Node,
    distances: &DistanceMatrix,
    value: i64,
) -> i64 {
    let reach = value + distances.get(current.id(), candidate.id());
    candidate.open().max(reach) - (reach - candidate.close()).max(0)
}

/// Sorts candidates by increasing [`insertion_cost`].
///
/// The sort is stable: ties keep their incoming order, which keeps seeded
/// biased selection reproducible.
pub fn rank_by_insertion_cost(
    candidates: &mut [&Node],
    current: &Node,
    distances: &DistanceMatrix,
    value: i64,
) {
    candidates.sort_by_key(|n| insertion_cost(n, current, distances, value));
}
