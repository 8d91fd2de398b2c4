//! Evolutionary search for minimum-coin change.
//!
//! The crate is split in two layers:
//!
//! - [`ga`]: a generic, domain-agnostic genetic algorithm over bounded
//!   integer genes, with pluggable selection, crossover and mutation
//!   operators and a pluggable [`FitnessEvaluator`](ga::FitnessEvaluator).
//! - [`change`]: the coin-change problem, expressed as one gene per coin
//!   denomination and a scoring policy that prefers exact totals, then
//!   fewer coins.
//!
//! Errors from either layer are [`error::EvolutionError`].
//!
//! # Features
//!
//! - `parallel` (default): evaluate populations on rayon's thread pool
//! - `serde`: `Serialize`/`Deserialize` for configuration and report types
//! - `cli` (default): the `make-change` binary

pub mod change;
pub mod error;
pub mod ga;
