//! Property tests for the GA operators and the change-making score.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_makechange::change::{us_coins, MakeChange};
use u_makechange::ga::{
    Chromosome, Crossover, Evolution, FitnessEvaluator, GaConfig, GeneTemplate, Mutation,
    Selection,
};

/// 1..6 genes, each with a random (possibly negative) inclusive range.
fn template_strategy() -> impl Strategy<Value = GeneTemplate> {
    prop::collection::vec((-20i64..20, 0i64..15), 1..6).prop_map(|ranges| {
        let bounds: Vec<(i64, i64)> = ranges.into_iter().map(|(lo, w)| (lo, lo + w)).collect();
        GeneTemplate::from_bounds(&bounds).expect("lo <= lo + w")
    })
}

fn crossover_strategy() -> impl Strategy<Value = Crossover> {
    prop_oneof![
        Just(Crossover::SinglePoint),
        Just(Crossover::TwoPoint),
        Just(Crossover::Uniform),
    ]
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![Just(Mutation::UniformReset), (1i64..10).prop_map(Mutation::Creep)]
}

fn us_genes() -> impl Strategy<Value = Vec<i64>> {
    (0i64..=3, 0i64..=2, 0i64..=1, 0i64..=4).prop_map(|(q, d, n, p)| vec![q, d, n, p])
}

/// Sum of gene distances from the range's lower bound.
struct Spread<'a>(&'a GeneTemplate);

impl FitnessEvaluator for Spread<'_> {
    type Score = u64;
    fn evaluate(
        &self,
        genes: &[i64],
    ) -> Result<u64, u_makechange::error::EvaluationError> {
        Ok(genes
            .iter()
            .zip(self.0.specs())
            .map(|(&g, s)| (g - s.lower()) as u64)
            .sum())
    }
}

proptest! {
    #[test]
    fn prop_operators_keep_genes_in_bounds(
        template in template_strategy(),
        crossover in crossover_strategy(),
        mutation in mutation_strategy(),
        rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a: Chromosome<u64> = Chromosome::random(&template, &mut rng);
        let b: Chromosome<u64> = Chromosome::random(&template, &mut rng);
        prop_assert!(template.accepts(a.genes()));
        prop_assert!(template.accepts(b.genes()));

        let (mut c1, mut c2) = crossover.apply(&a, &b, 1.0, &mut rng);
        prop_assert!(template.accepts(c1.genes()));
        prop_assert!(template.accepts(c2.genes()));

        mutation.mutate(&mut c1, &template, rate, &mut rng);
        mutation.mutate(&mut c2, &template, rate, &mut rng);
        prop_assert!(template.accepts(c1.genes()));
        prop_assert!(template.accepts(c2.genes()));
    }

    #[test]
    fn prop_zero_rate_mutation_is_identity(
        template in template_strategy(),
        mutation in mutation_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original: Chromosome<u64> = Chromosome::random(&template, &mut rng);
        let mut c = original.clone();
        prop_assert!(!mutation.mutate(&mut c, &template, 0.0, &mut rng));
        prop_assert_eq!(c, original);
    }

    #[test]
    fn prop_selection_returns_valid_indices(
        scores in prop::collection::vec(0u64..1000, 1..50),
        k in 1usize..6,
        count in 0usize..40,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        for selection in [Selection::Tournament(k), Selection::Roulette, Selection::Rank] {
            let picks = selection.select_many(&scores, count, &mut rng);
            prop_assert_eq!(picks.len(), count);
            prop_assert!(picks.iter().all(|&i| i < scores.len()));
        }
    }

    #[test]
    fn prop_engine_preserves_size_bounds_and_progress(
        template in template_strategy(),
        size in 1usize..40,
        crossover in crossover_strategy(),
        mutation in mutation_strategy(),
        seed in any::<u64>(),
    ) {
        let config = GaConfig::default()
            .with_population_size(size)
            .with_crossover(crossover)
            .with_mutation(mutation)
            .with_mutation_rate(0.3)
            .with_seed(seed)
            .with_parallel(false);
        let evaluator = Spread(&template);
        let mut evolution = Evolution::new(&evaluator, &template, &config).unwrap();
        let mut previous = evolution.best_fitness();
        for _ in 0..8 {
            evolution.step().unwrap();
            let pop = evolution.population();
            prop_assert_eq!(pop.len(), size);
            prop_assert!(pop.iter().all(|c| template.accepts(c.genes())));
            prop_assert!(evolution.best_fitness() <= previous);
            previous = evolution.best_fitness();
        }
    }

    #[test]
    fn prop_change_score_is_deterministic(target in 0u64..200, genes in us_genes()) {
        let problem = MakeChange::new(target, us_coins()).unwrap();
        prop_assert_eq!(problem.evaluate(&genes), problem.evaluate(&genes));
    }

    #[test]
    fn prop_exact_outranks_any_miss(
        target in 0u64..105,
        a in us_genes(),
        b in us_genes(),
    ) {
        let problem = MakeChange::new(target, us_coins()).unwrap();
        let (total_a, coins_a) = problem.tally(&a).unwrap();
        let (total_b, coins_b) = problem.tally(&b).unwrap();
        let (score_a, score_b) = (problem.evaluate(&a).unwrap(), problem.evaluate(&b).unwrap());

        match (total_a == target, total_b == target) {
            (true, false) => prop_assert!(score_a < score_b),
            (false, true) => prop_assert!(score_b < score_a),
            (true, true) => prop_assert_eq!(score_a.cmp(&score_b), coins_a.cmp(&coins_b)),
            (false, false) => {
                let (miss_a, miss_b) = (total_a.abs_diff(target), total_b.abs_diff(target));
                if miss_a != miss_b {
                    prop_assert_eq!(score_a.cmp(&score_b), miss_a.cmp(&miss_b));
                } else {
                    prop_assert_eq!(score_a.cmp(&score_b), coins_a.cmp(&coins_b));
                }
            }
        }
    }
}
