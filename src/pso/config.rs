//! Particle swarm configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`ParticleSwarm`](super::ParticleSwarm).
///
/// # Examples
///
/// ```
/// use tw_dei::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(10)
///     .with_max_iterations(200)
///     .with_max_no_improvement(50)
///     .with_deep_search(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// Selection skew of each particle's biased pick, in (0, 1).
    pub beta: f64,

    /// Probability of a segment-reversal pass after each move, in [0, 1].
    pub deep_search: f64,

    /// Maximum number of swarm iterations.
    pub max_iterations: usize,

    /// Stop once this many consecutive iterations pass without improving
    /// the global best.
    pub max_no_improvement: usize,

    /// Number of particles.
    pub swarm_size: usize,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            beta: 0.9,
            deep_search: 0.02,
            max_iterations: 3000,
            max_no_improvement: 1000,
            swarm_size: 30,
        }
    }
}

impl PsoConfig {
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_deep_search(mut self, probability: f64) -> Self {
        self.deep_search = probability;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_no_improvement(mut self, n: usize) -> Self {
        self.max_no_improvement = n;
        self
    }

    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(format!("beta must be in (0, 1), got {}", self.beta));
        }
        if !(0.0..=1.0).contains(&self.deep_search) {
            return Err(format!(
                "deep_search must be in [0, 1], got {}",
                self.deep_search
            ));
        }
        if self.swarm_size == 0 {
            return Err("swarm_size must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert!((config.beta - 0.9).abs() < 1e-12);
        assert!((config.deep_search - 0.02).abs() < 1e-12);
        assert_eq!(config.max_iterations, 3000);
        assert_eq!(config.max_no_improvement, 1000);
        assert_eq!(config.swarm_size, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_beta() {
        assert!(PsoConfig::default().with_beta(0.0).validate().is_err());
        assert!(PsoConfig::default().with_beta(1.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_deep_search() {
        assert!(PsoConfig::default().with_deep_search(1.2).validate().is_err());
        assert!(PsoConfig::default().with_deep_search(-0.5).validate().is_err());
    }

    #[test]
    fn test_validate_empty_swarm() {
        assert!(PsoConfig::default().with_swarm_size(0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PsoConfig =
            serde_json::from_str(r#"{"swarm_size": 5, "deep_search": 0.5}"#).expect("valid json");
        assert_eq!(config.swarm_size, 5);
        assert!((config.deep_search - 0.5).abs() < 1e-12);
        assert_eq!(config.max_iterations, 3000);
    }
}
