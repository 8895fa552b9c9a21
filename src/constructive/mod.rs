//! Constructive heuristics.
//!
//! - [`greedy_tour`] / [`Greedy`] — Deterministic cheapest-insertion, O(n² log n)
//! - [`random_tour`] / [`Shuffler`] — Uniformly random order, evaluated once
//! - [`RandomSearch`] — Best of N random orders

mod greedy;
mod random_search;
mod shuffler;

pub use greedy::{greedy_tour, Greedy};
pub use random_search::RandomSearch;
pub use shuffler::{random_tour, Shuffler};
