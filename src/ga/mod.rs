//! Genetic Algorithm framework for bounded-integer chromosomes.
//!
//! The engine owns the representation: every chromosome is an ordered list
//! of `i64` genes, each constrained by a [`GeneSpec`]. Users plug in their
//! problem by implementing [`FitnessEvaluator`], which only maps gene values
//! to a score.
//!
//! # Core Traits
//!
//! - [`Fitness`]: Comparable score type (lower is better)
//! - [`FitnessEvaluator`]: Pure scoring policy plus a per-generation hook
//!
//! # Key Types
//!
//! - [`GeneSpec`] / [`GeneTemplate`]: Legal value ranges per gene position
//! - [`Chromosome`]: Gene values with a cached, self-invalidating score
//! - [`Population`]: Fixed-size set of chromosomes
//! - [`Selection`], [`Crossover`], [`Mutation`]: Genetic operators
//! - [`GaConfig`]: Algorithm parameters (population size, generations, rates)
//! - [`Evolution`]: Step-wise engine state; [`GaRunner`]: full-run driver
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod chromosome;
mod config;
mod gene;
mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use gene::{GeneSpec, GeneTemplate};
pub use operators::{Crossover, Mutation};
pub use population::Population;
pub use runner::{Evolution, GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
pub use types::{Fitness, FitnessEvaluator};
