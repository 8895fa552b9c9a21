//! Divide-et-impera configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`DivideEtImpera`](super::DivideEtImpera).
///
/// # Examples
///
/// ```
/// use tw_dei::dei::DeiConfig;
///
/// let config = DeiConfig::default()
///     .with_split_threshold(20)
///     .with_max_split(100)
///     .with_base_node(0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeiConfig {
    /// Subpaths with at most this many nodes are solved directly (`p`).
    /// With 0 every non-empty subpath goes through partitioning.
    pub split_threshold: usize,

    /// Maximum partition attempts for one subpath before solving it whole.
    pub max_split: usize,

    /// ID of the node the tour starts from. `None` uses the first input node.
    pub base_node: Option<usize>,

    /// Add the travel cost from the last node back to the base node.
    pub return_to_base: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DeiConfig {
    fn default() -> Self {
        Self {
            split_threshold: 30,
            max_split: 1000,
            base_node: None,
            return_to_base: false,
            seed: None,
        }
    }
}

impl DeiConfig {
    pub fn with_split_threshold(mut self, p: usize) -> Self {
        self.split_threshold = p;
        self
    }

    pub fn with_max_split(mut self, n: usize) -> Self {
        self.max_split = n;
        self
    }

    pub fn with_base_node(mut self, id: usize) -> Self {
        self.base_node = Some(id);
        self
    }

    pub fn with_return_to_base(mut self, enabled: bool) -> Self {
        self.return_to_base = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_split == 0 {
            return Err("max_split must be at least 1".into());
        }
        Ok(())
    }
}
