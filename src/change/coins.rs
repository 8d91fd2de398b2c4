//! Coin denominations.

use crate::error::{EvolutionError, Result};

/// One coin denomination and how many of it a solution may use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coin {
    /// Display name, plural (e.g. `"quarters"`).
    pub name: String,

    /// Value in minor currency units. Must be positive.
    pub value: u64,

    /// Largest count a solution may hold; the gene range is `0..=max_count`.
    pub max_count: u32,
}

impl Coin {
    pub fn new(name: impl Into<String>, value: u64, max_count: u32) -> Self {
        Self {
            name: name.into(),
            value,
            max_count,
        }
    }

    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        if self.value == 0 {
            return Err(EvolutionError::InvalidConfig(format!(
                "coin {index} ({}) has zero value",
                self.name
            )));
        }
        Ok(())
    }
}

/// US quarters, dimes, nickels and pennies with the usual per-change limits.
///
/// Any amount from 0 to 99 cents can be made within these limits.
pub fn us_coins() -> Vec<Coin> {
    vec![
        Coin::new("quarters", 25, 3),
        Coin::new("dimes", 10, 2),
        Coin::new("nickels", 5, 1),
        Coin::new("pennies", 1, 4),
    ]
}
