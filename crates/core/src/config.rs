//! Configuration structures for the sales report system.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum number of entries in each seller's `top_products`.
    pub top_products_limit: usize,
    /// Rank-based bonus tiers.
    pub bonus: BonusConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_products_limit: 10,
            bonus: BonusConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that limits and rates are usable.
    pub fn validate(&self) -> Result<()> {
        if self.top_products_limit == 0 {
            return Err(Error::config("top_products_limit must be at least 1"));
        }
        self.bonus.validate()
    }
}

/// Bonus tiers applied over the profit-sorted seller list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Rate for rank 0.
    pub top_rate: f64,
    /// Rate for ranks 1 through `podium_size - 1`.
    pub podium_rate: f64,
    /// Number of podium ranks, including rank 0.
    pub podium_size: usize,
    /// Rate for every other rank except the last.
    pub base_rate: f64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            top_rate: 0.15,
            podium_rate: 0.10,
            podium_size: 3,
            base_rate: 0.05,
        }
    }
}

impl BonusConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("top_rate", self.top_rate),
            ("podium_rate", self.podium_rate),
            ("base_rate", self.base_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::config(format!(
                    "bonus.{name} must be a non-negative number, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
