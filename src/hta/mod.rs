//! Hybrid Tabu search / simulated Annealing (HTA).
//!
//! A repair phase pushes the closing-time order towards zero delay, then
//! simulated annealing explores shift, reversal and swap moves while a
//! tabu list keeps recently used moves from being redrawn.

mod config;
mod moves;
mod runner;

pub use config::HtaConfig;
pub use runner::HybridTabuAnnealing;
