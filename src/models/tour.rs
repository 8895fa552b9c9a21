//! Tour type: an ordered route with its running state.

use super::Node;

/// An ordered visiting sequence with its objective components.
///
/// `value` is the earliest feasible arrival time at the last node of the
/// route, `delay` the lateness accumulated along it. Nodes are borrowed from
/// the caller's node list and never copied.
///
/// # Examples
///
/// ```
/// use tw_dei::models::{Node, Tour};
///
/// let nodes = vec![Node::new(1, 0, 0, 0, 10), Node::new(2, 5, 0, 0, 10)];
/// let tour = Tour::new(nodes.iter().collect(), 12, 2);
/// assert_eq!(tour.ids(), vec![1, 2]);
/// assert_eq!(tour.cost(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour<'a> {
    route: Vec<&'a Node>,
    value: i64,
    delay: i64,
}

impl<'a> Tour<'a> {
    /// Creates a tour from a route and its evaluated state.
    pub fn new(route: Vec<&'a Node>, value: i64, delay: i64) -> Self {
        Self {
            route,
            value,
            delay,
        }
    }

    /// An empty route that leaves the carried `value` untouched.
    pub fn empty(value: i64) -> Self {
        Self::new(Vec::new(), value, 0)
    }

    /// The ordered nodes of this tour.
    pub fn route(&self) -> &[&'a Node] {
        &self.route
    }

    /// Arrival time after the last node.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Accumulated lateness.
    pub fn delay(&self) -> i64 {
        self.delay
    }

    /// Objective: `value + delay`.
    pub fn cost(&self) -> i64 {
        self.value + self.delay
    }

    /// Number of nodes in the route.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    /// Returns `true` if the route has no nodes.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// The last node of the route, if any.
    pub fn last(&self) -> Option<&'a Node> {
        self.route.last().copied()
    }

    /// Node IDs in visiting order.
    pub fn ids(&self) -> Vec<usize> {
        self.route.iter().map(|n| n.id()).collect()
    }

    /// Splits the tour into `(route, value, delay)`.
    pub fn into_parts(self) -> (Vec<&'a Node>, i64, i64) {
        (self.route, self.value, self.delay)
    }
}

impl Default for Tour<'_> {
    fn default() -> Self {
        Self::empty(0)
    }
}
