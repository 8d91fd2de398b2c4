//! Error types shared by the GA core and the coin-change problem.

use thiserror::Error;

/// A fitness evaluator could not score a chromosome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// Intermediate arithmetic left the score's numeric range.
    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),

    /// Gene count does not match what the evaluator was configured for.
    #[error("expected {expected} genes, got {actual}")]
    GeneCount { expected: usize, actual: usize },

    /// A gene value the evaluator cannot interpret.
    #[error("gene {index} has unusable value {value}")]
    InvalidGene { index: usize, value: i64 },
}

/// Errors surfaced by configuration and by a running evolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvolutionError {
    /// `index` is the gene's position when the spec was built as part of a
    /// template, `None` for a standalone spec.
    #[error(
        "invalid gene specification{}: lower bound {lower} > upper bound {upper}",
        at_position(.index)
    )]
    InvalidGeneSpecification {
        index: Option<usize>,
        lower: i64,
        upper: i64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The evaluator failed on the chromosome at `index` of the population
    /// being built. The published population is left untouched.
    #[error("evaluation of chromosome {index} failed: {source}")]
    Evaluation {
        index: usize,
        #[source]
        source: EvaluationError,
    },

    /// The evaluator failed on a finished run's best chromosome.
    #[error("scoring the best chromosome failed: {source}")]
    Report {
        #[source]
        source: EvaluationError,
    },

    #[error("population size mismatch: expected {expected}, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, EvolutionError>;

fn at_position(index: &Option<usize>) -> String {
    index.map(|i| format!(" at position {i}")).unwrap_or_default()
}
