//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! It is built once, validated, and borrowed by the engine for the whole run.

use crate::error::{EvolutionError, Result};

use super::operators::{Crossover, Mutation};
use super::selection::Selection;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, generation count, operator choice and rates,
/// elitism, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_makechange::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_makechange::ga::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(500)
///     .with_generations(10)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::Uniform)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of chromosomes in the population (P). Constant for the run.
    pub population_size: usize,

    /// Number of generation steps to run. Zero returns the best of the
    /// initial population.
    pub generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Fraction of the population preserved as elites (0.0–1.0).
    ///
    /// Any positive ratio keeps at least the single best chromosome.
    /// Elites never fill the whole population: at least one offspring slot
    /// always remains.
    pub elite_ratio: f64,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate chromosomes in parallel using rayon.
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            elite_ratio: 0.02,
            crossover_rate: 0.9,
            mutation_rate: 1.0 / 12.0,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Number of elites carried into each next generation.
    ///
    /// `floor(P × elite_ratio)`, raised to 1 for any positive ratio, and
    /// capped at `P - 1`.
    pub fn elite_count(&self) -> usize {
        if self.population_size == 0 {
            return 0;
        }
        let raw = (self.population_size as f64 * self.elite_ratio) as usize;
        let floor = usize::from(self.elite_ratio > 0.0);
        raw.max(floor).min(self.population_size - 1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(invalid("tournament size must be at least 1"));
        }
        if let Mutation::Creep(step) = self.mutation {
            if step <= 0 {
                return Err(invalid("creep step must be positive"));
            }
        }
        for (name, value) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvolutionError::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EvolutionError {
    EvolutionError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::SinglePoint);
        assert_eq!(config.mutation, Mutation::UniformReset);
        assert!((config.elite_ratio - 0.02).abs() < 1e-10);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0 / 12.0).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(500)
            .with_generations(10)
            .with_selection(Selection::Rank)
            .with_crossover(Crossover::TwoPoint)
            .with_mutation(Mutation::Creep(2))
            .with_elite_ratio(0.2)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 500);
        assert_eq!(config.generations, 10);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert_eq!(config.mutation, Mutation::Creep(2));
        assert!((config.elite_ratio - 0.2).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(
            config.validate(),
            Err(EvolutionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_member_population_is_valid() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_ok());
        assert_eq!(config.elite_count(), 0);
    }

    #[test]
    fn test_zero_generations_is_valid() {
        assert!(GaConfig::default().with_generations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_raw_field_values() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GaConfig {
            crossover_rate: f64::NAN,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(GaConfig::default()
            .with_tournament_size(0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_mutation(Mutation::Creep(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_elite_ratio(1.5)
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.elite_ratio - 1.0).abs() < 1e-10);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    // ---- elite_count ----

    #[test]
    fn test_elite_count() {
        let config = GaConfig::default().with_population_size(500);
        assert_eq!(config.elite_count(), 10);

        // positive ratio keeps at least the best
        let config = GaConfig::default().with_population_size(10);
        assert_eq!(config.elite_count(), 1);

        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(0.0);
        assert_eq!(config.elite_count(), 0);

        // never the whole population
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_ratio(1.0);
        assert_eq!(config.elite_count(), 9);
    }

    #[test]
    fn test_with_tournament_size() {
        let config = GaConfig::default().with_tournament_size(5);
        assert_eq!(config.selection, Selection::Tournament(5));
    }
}
