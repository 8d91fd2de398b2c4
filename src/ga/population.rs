//! Fixed-size populations and their evaluation.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{EvolutionError, Result};

use super::chromosome::Chromosome;
use super::gene::GeneTemplate;
use super::types::{cmp_fitness, Fitness, FitnessEvaluator};

/// The chromosomes under simultaneous evolution.
///
/// Size is fixed at construction. Only the evolution engine replaces a
/// population, and it does so wholesale.
#[derive(Debug, Clone)]
pub struct Population<F: Fitness> {
    members: Vec<Chromosome<F>>,
}

impl<F: Fitness> Population<F> {
    /// Random initial population of `size` chromosomes.
    pub fn random<R: Rng>(template: &GeneTemplate, size: usize, rng: &mut R) -> Self {
        Self {
            members: (0..size)
                .map(|_| Chromosome::random(template, rng))
                .collect(),
        }
    }

    /// Wraps `members`, checking the expected size.
    pub fn from_members(members: Vec<Chromosome<F>>, expected: usize) -> Result<Self> {
        if members.len() != expected {
            return Err(EvolutionError::PopulationSizeMismatch {
                expected,
                actual: members.len(),
            });
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Chromosome<F>] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome<F>> {
        self.members.iter()
    }

    /// Scores in member order; unevaluated members report [`Fitness::worst`].
    pub fn scores(&self) -> Vec<F> {
        self.members.iter().map(Chromosome::fitness_or_worst).collect()
    }

    /// Evaluates every member lacking a cached score.
    ///
    /// Returns the number of evaluations performed. On failure, the error
    /// names the first failing member; scores already written stay valid for
    /// their genes.
    pub fn evaluate<E>(&mut self, evaluator: &E, parallel: bool) -> Result<usize>
    where
        E: FitnessEvaluator<Score = F>,
    {
        evaluate_members(&mut self.members, evaluator, parallel)
    }

    /// The member with the lowest score.
    ///
    /// Unevaluated members rank as [`Fitness::worst`]. `None` when empty.
    pub fn best(&self) -> Option<&Chromosome<F>> {
        self.members
            .iter()
            .min_by(|a, b| cmp_fitness(&a.fitness_or_worst(), &b.fitness_or_worst()))
    }

    /// Member indices ordered best first. Ties keep member order.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.members.len()).collect();
        order.sort_by(|&a, &b| {
            cmp_fitness(
                &self.members[a].fitness_or_worst(),
                &self.members[b].fitness_or_worst(),
            )
        });
        order
    }

    /// Mean score over evaluated members, as `f64`.
    pub fn mean_fitness(&self) -> Option<f64> {
        let (sum, n) = self
            .members
            .iter()
            .filter_map(Chromosome::fitness)
            .fold((0.0, 0usize), |(s, n), f| (s + f.to_f64(), n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}

/// Evaluates unevaluated chromosomes in place.
///
/// In parallel mode each chromosome's score slot is written by exactly one
/// worker; the call returns only after every evaluation has finished.
/// Without the `parallel` feature the flag is ignored.
pub(crate) fn evaluate_members<F, E>(
    members: &mut [Chromosome<F>],
    evaluator: &E,
    parallel: bool,
) -> Result<usize>
where
    F: Fitness,
    E: FitnessEvaluator<Score = F>,
{
    if parallel {
        return evaluate_parallel(members, evaluator);
    }
    evaluate_sequential(members, evaluator)
}

fn evaluate_sequential<F, E>(members: &mut [Chromosome<F>], evaluator: &E) -> Result<usize>
where
    F: Fitness,
    E: FitnessEvaluator<Score = F>,
{
    members
        .iter_mut()
        .enumerate()
        .map(|(i, c)| evaluate_one(evaluator, i, c))
        .sum()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<F, E>(members: &mut [Chromosome<F>], evaluator: &E) -> Result<usize>
where
    F: Fitness,
    E: FitnessEvaluator<Score = F>,
{
    let outcomes: Vec<Result<usize>> = members
        .par_iter_mut()
        .enumerate()
        .map(|(i, c)| evaluate_one(evaluator, i, c))
        .collect();
    outcomes.into_iter().sum()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<F, E>(members: &mut [Chromosome<F>], evaluator: &E) -> Result<usize>
where
    F: Fitness,
    E: FitnessEvaluator<Score = F>,
{
    evaluate_sequential(members, evaluator)
}

fn evaluate_one<F, E>(evaluator: &E, index: usize, c: &mut Chromosome<F>) -> Result<usize>
where
    F: Fitness,
    E: FitnessEvaluator<Score = F>,
{
    if c.is_evaluated() {
        return Ok(0);
    }
    let f = evaluator
        .evaluate(c.genes())
        .map_err(|source| EvolutionError::Evaluation { index, source })?;
    c.set_fitness(f);
    Ok(1)
}
