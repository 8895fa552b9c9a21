//! Particle Swarm Optimization (PSO) for permutations.
//!
//! Each particle tracks a greedy seed, an exploratory intention and its
//! personal best. A move assembles a new route position by position from
//! the successors proposed by those three routes and the swarm's global
//! best, choosing among them with quasi-geometric biased selection.
//!
//! # Reference
//!
//! Kennedy, J., Eberhart, R. (1995). "Particle swarm optimization",
//! *Proceedings of ICNN'95* 4, 1942-1948.

mod config;
mod particle;
mod runner;

pub use config::PsoConfig;
pub use particle::{NodeIndex, Particle};
pub use runner::ParticleSwarm;
