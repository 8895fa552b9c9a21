//! Route evaluation.
//!
//! The arrival/lateness recurrence is the single source of truth for the
//! objective; all strategies go through it.

mod evaluator;

pub use evaluator::{advance, evaluate, insertion_cost, rank_by_insertion_cost};
