//! Biased-Randomized Algorithm (BRA).
//!
//! Iterative partial rebuild of an incumbent route with quasi-geometric
//! biased selection and a reactive freeze fraction.
//!
//! # Reference
//!
//! Grasas, A., Juan, A.A., Faulin, J., de Armas, J., Ramalhinho, H. (2017).
//! "Biased randomization of heuristics using skewed probability
//! distributions", *Computers & Industrial Engineering* 110, 216-228.

mod config;
mod runner;

pub use config::BraConfig;
pub use runner::BiasedRandomized;
