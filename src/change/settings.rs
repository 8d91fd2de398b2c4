//! Complete run settings for a change-making search.

use crate::error::Result;
use crate::ga::GaConfig;

use super::coins::{us_coins, Coin};
use super::problem::MakeChange;

/// Target, coin set and GA parameters in one immutable value.
///
/// With the `serde` feature this deserializes from a config file; missing
/// fields fall back to [`Default`]:
///
/// ```toml
/// target = 88
///
/// [[coins]]
/// name = "quarters"
/// value = 25
/// max_count = 3
///
/// [ga]
/// population_size = 500
/// generations = 10
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MakeChangeSettings {
    /// Amount to make, in minor currency units.
    pub target: u64,

    /// Denominations in gene order.
    pub coins: Vec<Coin>,

    pub ga: GaConfig,
}

impl Default for MakeChangeSettings {
    /// US coins, population 500, 10 generations.
    fn default() -> Self {
        Self {
            target: 0,
            coins: us_coins(),
            ga: GaConfig::default()
                .with_population_size(500)
                .with_generations(10),
        }
    }
}

impl MakeChangeSettings {
    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    pub fn with_coins(mut self, coins: Vec<Coin>) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Validates everything and builds the problem.
    pub fn problem(&self) -> Result<MakeChange> {
        self.ga.validate()?;
        MakeChange::new(self.target, self.coins.clone())
    }
}
