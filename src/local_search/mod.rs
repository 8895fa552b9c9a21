//! Local search operators.
//!
//! - [`reversal_search`] — Segment reversal evaluated with the full recurrence, one pass
//! - [`two_opt_search`] / [`TwoOpt`] — Segment reversal restarted until convergence

mod reversal;
mod two_opt;

pub use reversal::reversal_search;
pub use two_opt::{two_opt_search, TwoOpt};
