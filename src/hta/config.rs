//! Hybrid tabu/annealing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`HybridTabuAnnealing`](super::HybridTabuAnnealing).
///
/// # Examples
///
/// ```
/// use tw_dei::hta::HtaConfig;
///
/// let config = HtaConfig::default()
///     .with_max_iterations(500)
///     .with_initial_temperature(200.0)
///     .with_cooling(0.9)
///     .with_tabu_size(80);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtaConfig {
    /// Annealing iterations after the repair phase.
    pub max_iterations: usize,

    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T ← cooling · T` per iteration.
    pub cooling: f64,

    /// Probability in [0, 1] of perturbing a neighbour after the move.
    pub perturbation: f64,

    /// Fraction in [0, 1] of the route relocated by one perturbation.
    pub perturbed: f64,

    /// Number of recent moves kept tabu. 0 disables the tabu list.
    pub tabu_size: usize,

    /// Neighbours tried while driving the starting route to zero delay.
    pub max_repair_iterations: usize,
}

impl Default for HtaConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            initial_temperature: 500.0,
            cooling: 0.95,
            perturbation: 0.1,
            perturbed: 0.1,
            tabu_size: 400,
            max_repair_iterations: 1000,
        }
    }
}

impl HtaConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: f64) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_perturbation(mut self, p: f64) -> Self {
        self.perturbation = p;
        self
    }

    pub fn with_perturbed(mut self, fraction: f64) -> Self {
        self.perturbed = fraction;
        self
    }

    pub fn with_tabu_size(mut self, n: usize) -> Self {
        self.tabu_size = n;
        self
    }

    pub fn with_max_repair_iterations(mut self, n: usize) -> Self {
        self.max_repair_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.cooling <= 0.0 || self.cooling >= 1.0 {
            return Err(format!("cooling must be in (0, 1), got {}", self.cooling));
        }
        if !(0.0..=1.0).contains(&self.perturbation) {
            return Err(format!(
                "perturbation must be in [0, 1], got {}",
                self.perturbation
            ));
        }
        if !(0.0..=1.0).contains(&self.perturbed) {
            return Err(format!("perturbed must be in [0, 1], got {}", self.perturbed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HtaConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tabu_size, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_cooling() {
        assert!(HtaConfig::default().with_cooling(1.0).validate().is_err());
        assert!(HtaConfig::default().with_cooling(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_probabilities() {
        assert!(HtaConfig::default()
            .with_perturbation(1.5)
            .validate()
            .is_err());
        assert!(HtaConfig::default().with_perturbed(-0.1).validate().is_err());
        assert!(HtaConfig::default()
            .with_initial_temperature(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HtaConfig =
            serde_json::from_str(r#"{"tabu_size": 80, "cooling": 0.9}"#).expect("valid json");
        assert_eq!(config.tabu_size, 80);
        assert_eq!(config.cooling, 0.9);
        assert_eq!(config.max_iterations, 1000);
    }
}
