//! GA evolutionary loop execution.
//!
//! [`Evolution`] is the generation-by-generation state machine:
//! initialization → (select → crossover → mutate → evaluate → replace)*.
//! [`GaRunner`] drives it for the configured number of generations, with
//! optional cancellation between generations.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{EvolutionError, Result};

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::gene::GeneTemplate;
use super::population::Population;
use super::types::{Fitness, FitnessEvaluator};

/// Summary of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats<F: Fitness> {
    /// Generation number, starting at 1 for the first step.
    pub generation: usize,

    /// Best score seen so far in the run.
    pub best_fitness: F,

    /// Best score within this generation's population.
    pub generation_best: F,

    /// Mean score of this generation's population.
    pub mean_fitness: f64,

    /// Evaluator calls made during this step.
    pub evaluations: usize,
}

/// Result of a GA optimization run.
///
/// Contains the best chromosome found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<F: Fitness> {
    /// The best chromosome found during the entire run.
    pub best: Chromosome<F>,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: F,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,

    /// Total evaluator calls, initial population included.
    pub evaluations: usize,
}

/// The evolution engine's state between generations.
///
/// The published population is always complete and fully evaluated: a step
/// builds the next population on the side and swaps it in only after every
/// member has a score. A failed step leaves the engine exactly as it was.
///
/// ```
/// use u_makechange::change::{us_coins, MakeChange};
/// use u_makechange::ga::{Evolution, GaConfig};
///
/// let problem = MakeChange::new(41, us_coins()).unwrap();
/// let template = problem.template();
/// let config = GaConfig::default().with_population_size(50).with_seed(7);
///
/// let mut evolution = Evolution::new(&problem, &template, &config).unwrap();
/// let before = evolution.best_fitness();
/// evolution.step().unwrap();
/// assert_eq!(evolution.generation(), 1);
/// assert!(evolution.best_fitness() <= before);
/// assert_eq!(evolution.population().len(), 50);
/// ```
pub struct Evolution<'a, E: FitnessEvaluator> {
    evaluator: &'a E,
    template: &'a GeneTemplate,
    config: &'a GaConfig,
    rng: StdRng,
    population: Population<E::Score>,
    best: Chromosome<E::Score>,
    generation: usize,
    evaluations: usize,
    history: Vec<f64>,
}

impl<'a, E: FitnessEvaluator> Evolution<'a, E> {
    /// Validates the configuration, then creates and evaluates a random
    /// initial population.
    pub fn new(evaluator: &'a E, template: &'a GeneTemplate, config: &'a GaConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut population = Population::random(template, config.population_size, &mut rng);
        let evaluations = population
            .evaluate(evaluator, config.parallel)
            .map_err(log_failure)?;

        let best = population
            .best()
            .cloned()
            .ok_or(EvolutionError::PopulationSizeMismatch {
                expected: config.population_size,
                actual: 0,
            })?;

        let mut history = Vec::with_capacity(config.generations + 1);
        history.push(best.fitness_or_worst().to_f64());

        debug!(
            "initial population of {} evaluated, best {:?}",
            population.len(),
            best.fitness_or_worst()
        );

        Ok(Self {
            evaluator,
            template,
            config,
            rng,
            population,
            best,
            generation: 0,
            evaluations,
            history,
        })
    }

    /// Runs one generation and publishes the new population.
    pub fn step(&mut self) -> Result<GenerationStats<E::Score>> {
        let config = self.config;
        let size = config.population_size;
        let elite_count = config.elite_count();
        let members = self.population.members();

        let mut next: Vec<Chromosome<E::Score>> = Vec::with_capacity(size);

        // Elite preservation
        let ranked = self.population.ranked_indices();
        next.extend(ranked[..elite_count].iter().map(|&i| members[i].clone()));

        // Selection, pairwise crossover, mutation
        let offspring = size - elite_count;
        let scores = self.population.scores();
        let parents = config
            .selection
            .select_many(&scores, offspring.div_ceil(2) * 2, &mut self.rng);

        for pair in parents.chunks_exact(2) {
            let (a, b) = config.crossover.apply(
                &members[pair[0]],
                &members[pair[1]],
                config.crossover_rate,
                &mut self.rng,
            );
            for mut child in [a, b] {
                if next.len() >= size {
                    break;
                }
                config
                    .mutation
                    .mutate(&mut child, self.template, config.mutation_rate, &mut self.rng);
                next.push(child);
            }
        }

        debug_assert_eq!(next.len(), size, "generation assembled with wrong size");
        let mut next = Population::from_members(next, size)?;

        // Barrier: every member is scored before anything reads the scores
        let evaluations = next
            .evaluate(self.evaluator, config.parallel)
            .map_err(log_failure)?;

        let generation_best = next
            .best()
            .ok_or(EvolutionError::PopulationSizeMismatch {
                expected: size,
                actual: 0,
            })?;
        let generation_best_fitness = generation_best.fitness_or_worst();
        if generation_best_fitness < self.best.fitness_or_worst() {
            self.best = generation_best.clone();
        }

        let mean_fitness = next.mean_fitness().unwrap_or(f64::NAN);
        self.population = next;
        self.generation += 1;
        self.evaluations += evaluations;
        self.history.push(self.best_fitness().to_f64());

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness: self.best_fitness(),
            generation_best: generation_best_fitness,
            mean_fitness,
            evaluations,
        };
        debug!(
            "generation {}: best {:?}, generation best {:?}, mean {:.3}, {} evaluations",
            stats.generation, stats.best_fitness, stats.generation_best, mean_fitness, evaluations
        );
        self.evaluator.on_generation(&stats);

        Ok(stats)
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current (fully evaluated) population.
    pub fn population(&self) -> &Population<E::Score> {
        &self.population
    }

    /// Best chromosome seen so far.
    pub fn best(&self) -> &Chromosome<E::Score> {
        &self.best
    }

    pub fn best_fitness(&self) -> E::Score {
        self.best.fitness_or_worst()
    }

    /// Consumes the engine into a run result.
    pub fn into_result(self, cancelled: bool) -> GaResult<E::Score> {
        GaResult {
            best_fitness: self.best.fitness_or_worst(),
            best: self.best,
            generations: self.generation,
            cancelled,
            fitness_history: self.history,
            evaluations: self.evaluations,
        }
    }
}

fn log_failure(err: EvolutionError) -> EvolutionError {
    warn!("aborting run: {err}");
    err
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyEvaluator::new();
/// let template = GeneTemplate::from_bounds(&[(0, 3), (0, 2)])?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &template, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for `config.generations` generations.
    ///
    /// Fails on an invalid configuration or when the evaluator fails.
    pub fn run<E: FitnessEvaluator>(
        evaluator: &E,
        template: &GeneTemplate,
        config: &GaConfig,
    ) -> Result<GaResult<E::Score>> {
        Self::run_with_cancel(evaluator, template, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked before each generation. When set, the run stops
    /// and returns the best solution found so far; the generation in
    /// progress, if any, is never published half-built.
    pub fn run_with_cancel<E: FitnessEvaluator>(
        evaluator: &E,
        template: &GeneTemplate,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<E::Score>> {
        let mut evolution = Evolution::new(evaluator, template, config)?;
        let mut cancelled = false;

        for _ in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            evolution.step()?;
        }

        if cancelled {
            info!(
                "run cancelled after {} of {} generations, best {:?}",
                evolution.generation(),
                config.generations,
                evolution.best_fitness()
            );
        } else {
            info!(
                "run finished after {} generations, best {:?}",
                evolution.generation(),
                evolution.best_fitness()
            );
        }

        Ok(evolution.into_result(cancelled))
    }
}

// ============================================================================
// Tests
// ============================================================================
