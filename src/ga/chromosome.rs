//! Candidate solutions.

use rand::Rng;

use super::gene::GeneTemplate;
use super::types::Fitness;

/// One candidate solution: ordered gene values plus a cached score.
///
/// The score is cleared whenever a gene changes, so a chromosome with
/// `fitness() == Some(_)` always carries the score of its current genes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<F: Fitness> {
    genes: Vec<i64>,
    fitness: Option<F>,
}

impl<F: Fitness> Chromosome<F> {
    /// Wraps gene values; the score starts unset.
    pub fn new(genes: Vec<i64>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Draws a chromosome uniformly within `template`.
    pub fn random<R: Rng>(template: &GeneTemplate, rng: &mut R) -> Self {
        Self::new(template.sample(rng))
    }

    pub fn genes(&self) -> &[i64] {
        &self.genes
    }

    pub fn gene(&self, index: usize) -> i64 {
        self.genes[index]
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Overwrites one gene. Invalidates the cached score if the value changed.
    pub fn set_gene(&mut self, index: usize, value: i64) {
        if self.genes[index] != value {
            self.genes[index] = value;
            self.fitness = None;
        }
    }

    /// Cached score, if evaluated since the last change.
    pub fn fitness(&self) -> Option<F> {
        self.fitness
    }

    /// Cached score, or [`Fitness::worst`] when unevaluated.
    pub fn fitness_or_worst(&self) -> F {
        self.fitness.unwrap_or_else(F::worst)
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub(crate) fn set_fitness(&mut self, fitness: F) {
        self.fitness = Some(fitness);
    }

    pub fn into_genes(self) -> Vec<i64> {
        self.genes
    }
}
