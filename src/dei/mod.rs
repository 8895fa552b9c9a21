//! Divide-et-impera orchestration.
//!
//! Large instances are split recursively around pivot nodes: everything
//! whose window closes before the pivot opens must come earlier. Each
//! resulting subpath is solved with the wrapped strategy and appended to the
//! tour, carrying arrival value and last node across the join.

mod config;
mod runner;

pub use config::DeiConfig;
pub use runner::{DeiStats, DivideEtImpera};
