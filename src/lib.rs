//! # tw-dei
//!
//! Sequencing of locations with time windows (TSPTW-style) into a single
//! route that minimizes arrival time plus accumulated lateness.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, TimeWindow, Tour)
//! - [`distance`] — Integer travel cost matrix
//! - [`evaluation`] — Arrival/lateness recurrence and insertion cost
//! - [`random`] — Seeded generators and quasi-geometric biased selection
//! - [`strategy`] — The `Strategy` capability shared by all solvers
//! - [`constructive`] — Greedy, random-order and random-search construction
//! - [`bra`] — Biased-randomized iterative construction
//! - [`pso`] — Particle swarm metaheuristic
//! - [`hta`] — Hybrid tabu search / simulated annealing
//! - [`local_search`] — Segment-reversal deep search and 2-opt descent
//! - [`dei`] — Divide-et-impera orchestrator

pub mod bra;
pub mod constructive;
pub mod dei;
pub mod distance;
mod error;
pub mod evaluation;
pub mod hta;
pub mod local_search;
pub mod models;
pub mod pso;
pub mod random;
pub mod strategy;

pub use error::SolveError;
