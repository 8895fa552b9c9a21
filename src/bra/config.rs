//! Biased-randomized construction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`BiasedRandomized`](super::BiasedRandomized).
///
/// # Examples
///
/// ```
/// use tw_dei::bra::BraConfig;
///
/// let config = BraConfig::default()
///     .with_alpha(0.8)
///     .with_beta_start(0.2)
///     .with_beta_step(0.05)
///     .with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraConfig {
    /// Selection skew in (0, 1). Higher values stay closer to greedy.
    pub alpha: f64,

    /// Fraction of the incumbent rebuilt after an improvement, in [0, 1].
    ///
    /// The first `(1 − beta) · len` nodes of the incumbent are kept as a
    /// frozen prefix.
    pub beta_start: f64,

    /// Increase of the rebuilt fraction after each non-improving pass, in [0, 1].
    pub beta_step: f64,

    /// Number of rebuild passes after the initial construction.
    pub max_iterations: usize,
}

impl Default for BraConfig {
    fn default() -> Self {
        Self {
            alpha: 0.9,
            beta_start: 0.1,
            beta_step: 0.1,
            max_iterations: 3000,
        }
    }
}

impl BraConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta_start(mut self, beta: f64) -> Self {
        self.beta_start = beta;
        self
    }

    pub fn with_beta_step(mut self, step: f64) -> Self {
        self.beta_step = step;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }
        if !(0.0..=1.0).contains(&self.beta_start) {
            return Err(format!(
                "beta_start must be in [0, 1], got {}",
                self.beta_start
            ));
        }
        if !(0.0..=1.0).contains(&self.beta_step) {
            return Err(format!("beta_step must be in [0, 1], got {}", self.beta_step));
        }
        Ok(())
    }
}
