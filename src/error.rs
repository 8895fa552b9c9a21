//! Error type shared by strategies and the orchestrator.

use thiserror::Error;

/// Errors that abort a solving run.
///
/// Degenerate partitions and non-improving iterations are part of the normal
/// search and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A node expected in a reference route was absent.
    ///
    /// Signals broken candidate bookkeeping; the route under construction
    /// can no longer be trusted to be a permutation.
    #[error("node {node_id} is missing from the {reference} reference route")]
    MissingNode {
        /// ID of the node that could not be located.
        node_id: usize,
        /// Name of the reference route that was searched.
        reference: &'static str,
    },

    /// A node ID does not index the distance matrix.
    #[error("node {node_id} is out of range for a distance matrix of size {size}")]
    NodeOutOfRange {
        /// Offending node ID.
        node_id: usize,
        /// Size of the distance matrix.
        size: usize,
    },

    /// Two input nodes share the same ID.
    #[error("node {0} appears more than once in the input")]
    DuplicateNode(usize),

    /// The configured base node is not among the input nodes.
    #[error("base node {0} is not in the node list")]
    BaseNotFound(usize),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
