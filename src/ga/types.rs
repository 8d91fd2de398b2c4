//! Core trait definitions for the GA framework.
//!
//! [`Fitness`] and [`FitnessEvaluator`] define the contract between the
//! generic evolution engine and a problem-specific scoring policy. The engine
//! owns the representation (bounded integer genes); the evaluator only
//! turns gene values into a score.

use crate::error::EvaluationError;

use super::runner::GenerationStats;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `f64`, `f32` and `u64`.
/// For maximization problems, negate the fitness or use a wrapper type.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for u64 {
    fn worst() -> Self {
        u64::MAX
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Scores a chromosome's gene values.
///
/// Implementations must be pure: the same genes always give the same score,
/// and evaluation has no side effects. Every combination of in-range gene
/// values must produce a score; returning `Err` is reserved for genuine
/// failures such as arithmetic overflow, and aborts the run.
///
/// # Thread Safety
///
/// `FitnessEvaluator` must be `Send + Sync` because the engine may evaluate
/// chromosomes in parallel using rayon.
///
/// # Implementing
///
/// ```
/// use u_makechange::error::EvaluationError;
/// use u_makechange::ga::FitnessEvaluator;
///
/// struct SumOfSquares;
///
/// impl FitnessEvaluator for SumOfSquares {
///     type Score = u64;
///
///     fn evaluate(&self, genes: &[i64]) -> Result<u64, EvaluationError> {
///         genes.iter().try_fold(0u64, |acc, &g| {
///             acc.checked_add(g.unsigned_abs().pow(2))
///                 .ok_or(EvaluationError::Overflow("summing squares"))
///         })
///     }
/// }
/// ```
pub trait FitnessEvaluator: Send + Sync {
    /// The score type. Lower is better.
    type Score: Fitness;

    /// Scores one chromosome.
    fn evaluate(&self, genes: &[i64]) -> Result<Self::Score, EvaluationError>;

    /// Called at the end of each generation with that generation's statistics.
    ///
    /// Useful for progress reporting. The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats<Self::Score>) {}
}

impl<E: FitnessEvaluator + ?Sized> FitnessEvaluator for &E {
    type Score = E::Score;

    fn evaluate(&self, genes: &[i64]) -> Result<Self::Score, EvaluationError> {
        (**self).evaluate(genes)
    }

    fn on_generation(&self, stats: &GenerationStats<Self::Score>) {
        (**self).on_generation(stats)
    }
}

/// Compares two fitness values, treating incomparable values (NaN) as equal.
pub(crate) fn cmp_fitness<F: Fitness>(a: &F, b: &F) -> std::cmp::Ordering {
    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}
