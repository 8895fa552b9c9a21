//! Domain model types for time-window sequencing.
//!
//! Provides nodes with time windows and tours as ordered sequences of
//! borrowed nodes together with their arrival value and accumulated delay.

mod node;
mod tour;

pub use node::{Node, TimeWindow};
pub use tour::Tour;
