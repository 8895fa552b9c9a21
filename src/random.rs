//! Random number utilities.
//!
//! All randomness in a run flows through one explicitly owned generator
//! that is passed down by `&mut`; nothing here keeps global state.

use rand::distr::Open01;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded standard generator.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use tw_dei::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Draws an index in `0..size` from a quasi-geometric distribution.
///
/// Computes `⌊ln(U) / ln(1 − skew)⌋ mod size` with `U` uniform in `(0, 1)`.
/// Index 0 (the best ranked candidate) is the most likely; as `skew → 1`
/// the draw collapses onto 0, as `skew → 0` it approaches uniform.
///
/// Returns 0 when `size` is 0.
///
/// # Examples
///
/// ```
/// use tw_dei::random::{create_rng, quasi_geometric_index};
///
/// let mut rng = create_rng(42);
/// let idx = quasi_geometric_index(&mut rng, 0.9, 5);
/// assert!(idx < 5);
/// ```
pub fn quasi_geometric_index<R: Rng + ?Sized>(rng: &mut R, skew: f64, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let u: f64 = rng.sample(Open01);
    let draw = (u.ln() / (1.0 - skew).ln()).floor();
    // `as` saturates, so a degenerate skew never produces an out-of-range index
    (draw as usize) % size
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
