//! Travel cost matrices.
//!
//! Provides a dense integer cost matrix shared read-only by every strategy.

mod matrix;

pub use matrix::DistanceMatrix;
