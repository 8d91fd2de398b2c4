//! Crossover and mutation for bounded-integer chromosomes.
//!
//! Crossover only exchanges whole gene values between parents, so two
//! in-range parents always give in-range children. Mutation draws or clamps
//! against the gene's [`GeneSpec`](super::GeneSpec), so it cannot leave the
//! range either.
//!
//! # Crossover Operators
//!
//! - [`Crossover::SinglePoint`]: swap the tails after one cut (O(n))
//! - [`Crossover::TwoPoint`]: swap the segment between two cuts (O(n))
//! - [`Crossover::Uniform`]: swap each position with probability 1/2 (O(n))
//!
//! # Mutation Operators
//!
//! - [`Mutation::UniformReset`]: redraw the gene from its whole range
//! - [`Mutation::Creep`]: add a bounded offset, clamped to the range
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"

use rand::Rng;

use super::chromosome::Chromosome;
use super::gene::GeneTemplate;
use super::types::Fitness;

// ============================================================================
// Crossover
// ============================================================================

/// Recombination strategy for two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Cut once at a random position; children swap everything after it.
    #[default]
    SinglePoint,

    /// Cut twice; children swap the segment between the cuts.
    TwoPoint,

    /// Each position is swapped independently with probability 1/2.
    Uniform,
}

impl Crossover {
    /// Produces two children from two parents.
    ///
    /// Child A starts from `parent_a` and child B from `parent_b`; the
    /// operator decides which positions are exchanged.
    ///
    /// # Panics
    /// Panics if parents have different lengths.
    pub fn cross<R: Rng>(
        &self,
        parent_a: &[i64],
        parent_b: &[i64],
        rng: &mut R,
    ) -> (Vec<i64>, Vec<i64>) {
        let n = parent_a.len();
        assert_eq!(n, parent_b.len(), "parents must have equal length");

        let mut child_a = parent_a.to_vec();
        let mut child_b = parent_b.to_vec();
        if n < 2 {
            return (child_a, child_b);
        }

        match self {
            Crossover::SinglePoint => {
                // cut in 1..n so both parents contribute
                let cut = rng.random_range(1..n);
                child_a[cut..].swap_with_slice(&mut child_b[cut..]);
            }
            Crossover::TwoPoint => {
                let (start, end) = random_segment(n, rng);
                child_a[start..=end].swap_with_slice(&mut child_b[start..=end]);
            }
            Crossover::Uniform => {
                for i in 0..n {
                    if rng.random_bool(0.5) {
                        std::mem::swap(&mut child_a[i], &mut child_b[i]);
                    }
                }
            }
        }
        (child_a, child_b)
    }

    /// Crosses two chromosomes with probability `rate`.
    ///
    /// When crossover is skipped the children are copies of the parents and
    /// keep their cached scores.
    pub fn apply<F: Fitness, R: Rng>(
        &self,
        parent_a: &Chromosome<F>,
        parent_b: &Chromosome<F>,
        rate: f64,
        rng: &mut R,
    ) -> (Chromosome<F>, Chromosome<F>) {
        if rate <= 0.0 || !rng.random_bool(rate.min(1.0)) {
            return (parent_a.clone(), parent_b.clone());
        }
        let (a, b) = self.cross(parent_a.genes(), parent_b.genes(), rng);
        (Chromosome::new(a), Chromosome::new(b))
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Per-gene perturbation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Replace the gene with a value drawn uniformly from its range.
    #[default]
    UniformReset,

    /// Add a uniform offset in `[-step, step]`, clamped to the range.
    Creep(i64),
}

impl Mutation {
    /// Mutates `chromosome` in place, each gene independently with
    /// probability `rate`.
    ///
    /// Returns whether any gene value changed. A `rate` of 0 never touches
    /// the chromosome, so its cached score survives.
    pub fn mutate<F: Fitness, R: Rng>(
        &self,
        chromosome: &mut Chromosome<F>,
        template: &GeneTemplate,
        rate: f64,
        rng: &mut R,
    ) -> bool {
        if rate <= 0.0 {
            return false;
        }
        let rate = rate.min(1.0);
        let mut changed = false;

        for (i, spec) in template.specs().iter().enumerate().take(chromosome.len()) {
            if !rng.random_bool(rate) {
                continue;
            }
            let old = chromosome.gene(i);
            let new = match *self {
                Mutation::UniformReset => spec.sample(rng),
                Mutation::Creep(step) => {
                    let step = step.unsigned_abs().min(i64::MAX as u64) as i64;
                    let offset = rng.random_range(-step..=step);
                    spec.clamp(old.saturating_add(offset))
                }
            };
            if new != old {
                chromosome.set_gene(i, new);
                changed = true;
            }
        }
        changed
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
