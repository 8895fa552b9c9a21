//! The capability every solving strategy provides to the orchestrator.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::models::{Node, Tour};

/// A construction/improvement strategy for one subpath.
///
/// [`execute`](Self::execute) stores its result internally and
/// [`solution`](Self::solution) hands it back, so the orchestrator can drive
/// any strategy the same way. Each `execute` call is self-contained: state
/// from a previous call never leaks into the next one.
///
/// The stored tour must be a permutation of exactly the nodes passed in,
/// its `value` the arrival time after its last node (continuing from the
/// carried value), and its `delay` the lateness accumulated on this subpath
/// only. An empty subpath yields an empty tour with the carried value.
///
/// # Examples
///
/// ```
/// use tw_dei::models::Node;
/// use tw_dei::distance::DistanceMatrix;
/// use tw_dei::constructive::Greedy;
/// use tw_dei::random::create_rng;
/// use tw_dei::strategy::Strategy;
///
/// let nodes = vec![
///     Node::new(0, 0, 0, 0, 100),
///     Node::new(1, 10, 0, 5, 20),
///     Node::new(2, 20, 0, 25, 40),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let path: Vec<&Node> = nodes[1..].iter().collect();
///
/// let mut greedy = Greedy::new();
/// greedy.execute(&path, &dm, 0, &nodes[0], &mut create_rng(42)).unwrap();
/// assert_eq!(greedy.solution().ids(), vec![1, 2]);
/// ```
pub trait Strategy<'a> {
    /// Solves `path`, continuing from `start` at arrival time `value`.
    fn execute<R: Rng + ?Sized>(
        &mut self,
        path: &[&'a Node],
        distances: &DistanceMatrix,
        value: i64,
        start: &'a Node,
        rng: &mut R,
    ) -> Result<(), SolveError>;

    /// The tour found by the last `execute` call.
    fn solution(&self) -> &Tour<'a>;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;
}
