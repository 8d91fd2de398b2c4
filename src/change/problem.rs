//! The change-making fitness policy and its reports.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::{EvaluationError, EvolutionError, Result};
use crate::ga::{Fitness, FitnessEvaluator, GaConfig, GaResult, GaRunner, GeneSpec, GeneTemplate};

use super::coins::Coin;

/// Find the fewest coins summing to `target`.
///
/// Scores are [`ChangeScore`]s ordered by distance from the target, then by
/// coin count. Any exact combination outranks every miss, misses closer to
/// the target outrank farther ones, and ties go to fewer coins. Every
/// in-range combination has a score, whatever the target.
#[derive(Debug, Clone)]
pub struct MakeChange {
    target: u64,
    coins: Vec<Coin>,
    miss_unit: u64,
}

impl MakeChange {
    /// Sets up the problem for `target` minor units.
    ///
    /// Fails when `coins` is empty, a coin has zero value, or the coin limits
    /// allow a total or a coin count beyond `u64`.
    pub fn new(target: u64, coins: Vec<Coin>) -> Result<Self> {
        if coins.is_empty() {
            return Err(EvolutionError::InvalidConfig(
                "at least one coin denomination is required".into(),
            ));
        }
        for (i, coin) in coins.iter().enumerate() {
            coin.validate(i)?;
        }
        let miss_unit = coins
            .iter()
            .try_fold(1u64, |acc, c| acc.checked_add(c.max_count as u64))
            .ok_or_else(|| EvolutionError::InvalidConfig("coin limits overflow".into()))?;

        let problem = Self {
            target,
            coins,
            miss_unit,
        };
        if problem.max_reachable().is_none() {
            return Err(EvolutionError::InvalidConfig(
                "coin values times limits overflow".into(),
            ));
        }
        Ok(problem)
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// One gene per coin, ranging over `0..=max_count`.
    pub fn template(&self) -> GeneTemplate {
        let specs = self
            .coins
            .iter()
            .map(|c| GeneSpec::new(0, c.max_count as i64))
            .collect::<Result<Vec<_>>>()
            .expect("0 <= max_count always holds");
        GeneTemplate::new(specs).expect("coins are non-empty")
    }

    /// Largest total reachable within the coin limits.
    pub fn max_reachable(&self) -> Option<u64> {
        self.coins.iter().try_fold(0u64, |acc, c| {
            acc.checked_add(c.value.checked_mul(c.max_count as u64)?)
        })
    }

    /// Sums value and count of a gene vector: `(total_value, coin_count)`.
    pub fn tally(&self, genes: &[i64]) -> std::result::Result<(u64, u64), EvaluationError> {
        if genes.len() != self.coins.len() {
            return Err(EvaluationError::GeneCount {
                expected: self.coins.len(),
                actual: genes.len(),
            });
        }
        genes
            .iter()
            .zip(&self.coins)
            .enumerate()
            .try_fold((0u64, 0u64), |(total, count), (index, (&gene, coin))| {
                let n = u64::try_from(gene)
                    .map_err(|_| EvaluationError::InvalidGene { index, value: gene })?;
                let value = n
                    .checked_mul(coin.value)
                    .and_then(|v| total.checked_add(v))
                    .ok_or(EvaluationError::Overflow("summing coin values"))?;
                let count = count
                    .checked_add(n)
                    .ok_or(EvaluationError::Overflow("counting coins"))?;
                Ok((value, count))
            })
    }

    /// Describes a gene vector in coin terms.
    pub fn report(&self, genes: &[i64]) -> std::result::Result<ChangeReport, EvaluationError> {
        let (total_value, coin_count) = self.tally(genes)?;
        let counts = genes
            .iter()
            .zip(&self.coins)
            .map(|(&gene, coin)| CoinCount {
                name: coin.name.clone(),
                value: coin.value,
                count: gene as u64,
            })
            .collect();
        Ok(ChangeReport {
            target: self.target,
            counts,
            total_value,
            coin_count,
            exact: total_value == self.target,
        })
    }

    /// Runs the GA with `config` and reports the best combination found.
    pub fn solve(&self, config: &GaConfig) -> Result<ChangeSolution> {
        self.solve_with_cancel(config, None)
    }

    /// Like [`solve`](Self::solve), stopping between generations once
    /// `cancel` is set.
    pub fn solve_with_cancel(
        &self,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ChangeSolution> {
        let template = self.template();
        let result = GaRunner::run_with_cancel(self, &template, config, cancel)?;
        self.solution(result)
    }

    /// Turns a finished run into a [`ChangeSolution`].
    pub fn solution(&self, result: GaResult<ChangeScore>) -> Result<ChangeSolution> {
        let report = self
            .report(result.best.genes())
            .map_err(|source| EvolutionError::Report { source })?;
        if !report.exact {
            log::info!(
                "target {} not reached exactly; closest total is {}",
                self.target,
                report.total_value
            );
        }
        Ok(ChangeSolution { report, result })
    }
}

impl FitnessEvaluator for MakeChange {
    type Score = ChangeScore;

    fn evaluate(&self, genes: &[i64]) -> std::result::Result<ChangeScore, EvaluationError> {
        let (total, coins) = self.tally(genes)?;
        Ok(ChangeScore {
            miss: total.abs_diff(self.target),
            coins,
            unit: self.miss_unit,
        })
    }
}

/// Score of one coin combination. Lower is better.
///
/// Compares by `miss` (distance from the target), then by `coins`. `unit` is
/// one more than the largest possible coin count of the problem; it is the
/// same for every score of a run and only shapes [`Fitness::to_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeScore {
    pub miss: u64,
    pub coins: u64,
    pub unit: u64,
}

impl ChangeScore {
    pub fn is_exact(&self) -> bool {
        self.miss == 0
    }
}

impl Fitness for ChangeScore {
    fn worst() -> Self {
        Self {
            miss: u64::MAX,
            coins: u64::MAX,
            unit: u64::MAX,
        }
    }

    /// `coins` when exact, `unit × (1 + miss) + coins` otherwise, in `f64`.
    fn to_f64(self) -> f64 {
        if self.is_exact() {
            self.coins as f64
        } else {
            self.unit as f64 * (1.0 + self.miss as f64) + self.coins as f64
        }
    }
}

impl fmt::Display for ChangeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "exact, {} coins", self.coins)
        } else {
            write!(f, "off by {}, {} coins", self.miss, self.coins)
        }
    }
}

/// Count of one denomination in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinCount {
    pub name: String,
    pub value: u64,
    pub count: u64,
}

/// A combination of coins described for output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeReport {
    pub target: u64,

    /// One entry per denomination, in coin order.
    pub counts: Vec<CoinCount>,

    pub total_value: u64,
    pub coin_count: u64,

    /// Whether `total_value == target`. An unreachable target is not an
    /// error; the report then holds the closest combination found.
    pub exact: bool,
}

/// Best combination of a run plus the raw GA result.
#[derive(Debug, Clone)]
pub struct ChangeSolution {
    pub report: ChangeReport,
    pub result: GaResult<ChangeScore>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::us_coins;

    fn problem(target: u64) -> MakeChange {
        MakeChange::new(target, us_coins()).unwrap()
    }

    #[test]
    fn test_exact_scores_coin_count() {
        let p = problem(88);
        let score = p.evaluate(&[3, 1, 0, 3]).unwrap();
        assert!(score.is_exact());
        assert_eq!(score.coins, 7);
        assert_eq!(score.to_f64(), 7.0);
    }

    #[test]
    fn test_all_zero_is_scored() {
        let p = problem(88);
        let score = p.evaluate(&[0, 0, 0, 0]).unwrap();
        assert_eq!((score.miss, score.coins), (88, 0));
        // M = 3 + 2 + 1 + 4 + 1 = 11
        assert_eq!(score.to_f64(), (11 * 89) as f64);

        let zero = problem(0);
        assert!(zero.evaluate(&[0, 0, 0, 0]).unwrap().is_exact());
    }

    #[test]
    fn test_huge_target_is_scored() {
        let p = problem(u64::MAX);
        let far = p.evaluate(&[0, 0, 0, 0]).unwrap();
        let near = p.evaluate(&[3, 2, 1, 4]).unwrap();
        assert_eq!(far.miss, u64::MAX);
        assert_eq!(near.miss, u64::MAX - 104);
        assert!(near < far);
        assert!(far < ChangeScore::worst());
        assert!(near.to_f64().is_finite());
    }

    #[test]
    fn test_score_f64_follows_order() {
        let p = problem(30);
        let mut scores: Vec<ChangeScore> =
            all_genes().iter().map(|g| p.evaluate(g).unwrap()).collect();
        scores.sort();
        for pair in scores.windows(2) {
            assert!(pair[0].to_f64() <= pair[1].to_f64(), "{pair:?}");
        }
    }

    fn all_genes() -> Vec<[i64; 4]> {
        let mut out = Vec::new();
        for q in 0..=3 {
            for d in 0..=2 {
                for n in 0..=1 {
                    for p in 0..=4 {
                        out.push([q, d, n, p]);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_exact_beats_every_miss() {
        for target in [0, 30, 41, 88, 99] {
            let p = problem(target);
            let (exact, miss): (Vec<_>, Vec<_>) = all_genes()
                .into_iter()
                .map(|g| (p.tally(&g).unwrap().0 == target, p.evaluate(&g).unwrap()))
                .partition(|(is_exact, _)| *is_exact);
            let worst_exact = exact.iter().map(|&(_, s)| s).max().unwrap();
            let best_miss = miss.iter().map(|&(_, s)| s).min().unwrap();
            assert!(
                worst_exact < best_miss,
                "target {target}: exact {worst_exact} vs miss {best_miss}"
            );
        }
    }

    #[test]
    fn test_closer_miss_is_better() {
        let p = problem(1000);
        let max = p.evaluate(&[3, 2, 1, 4]).unwrap();
        let less = p.evaluate(&[3, 2, 1, 3]).unwrap();
        assert!(max < less);
        let best = all_genes()
            .into_iter()
            .min_by_key(|g| p.evaluate(g).unwrap())
            .unwrap();
        assert_eq!(best, [3, 2, 1, 4]);
    }

    #[test]
    fn test_miss_ties_prefer_fewer_coins() {
        let p = problem(30);
        // both total 25
        let quarter = p.evaluate(&[1, 0, 0, 0]).unwrap();
        let dimes_and_nickel = p.evaluate(&[0, 2, 1, 0]).unwrap();
        assert!(quarter < dimes_and_nickel);
    }

    #[test]
    fn test_deterministic() {
        let p = problem(67);
        let genes = [2, 1, 1, 2];
        assert_eq!(p.evaluate(&genes), p.evaluate(&genes));
    }

    #[test]
    fn test_gene_count_mismatch() {
        let p = problem(5);
        assert_eq!(
            p.evaluate(&[1, 0]),
            Err(EvaluationError::GeneCount {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_negative_gene_rejected() {
        let p = problem(5);
        assert_eq!(
            p.evaluate(&[0, 0, -1, 0]),
            Err(EvaluationError::InvalidGene {
                index: 2,
                value: -1
            })
        );
    }

    #[test]
    fn test_overflowing_coin_limits_rejected() {
        assert!(matches!(
            MakeChange::new(1, vec![Coin::new("bars", u64::MAX, 2)]),
            Err(EvolutionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_out_of_range_overflow_is_reported() {
        let p = MakeChange::new(1, vec![Coin::new("bars", u64::MAX, 1)]).unwrap();
        assert!(p.evaluate(&[1]).is_ok());
        assert!(matches!(
            p.evaluate(&[2]),
            Err(EvaluationError::Overflow(_))
        ));
    }

    #[test]
    fn test_report_failure_has_no_member_index() {
        let p = problem(88);
        let template = GeneTemplate::from_bounds(&[(0, 1)]).unwrap();
        let config = GaConfig::default()
            .with_population_size(2)
            .with_generations(0)
            .with_parallel(false);
        let result = GaRunner::run(&SingleGene, &template, &config).unwrap();
        let err = p.solution(result).unwrap_err();
        assert_eq!(
            err,
            EvolutionError::Report {
                source: EvaluationError::GeneCount {
                    expected: 4,
                    actual: 1
                }
            }
        );
    }

    /// Scores one-gene vectors as if they were exact change.
    struct SingleGene;

    impl FitnessEvaluator for SingleGene {
        type Score = ChangeScore;

        fn evaluate(&self, genes: &[i64]) -> std::result::Result<ChangeScore, EvaluationError> {
            Ok(ChangeScore {
                miss: 0,
                coins: genes[0] as u64,
                unit: 2,
            })
        }
    }

    #[test]
    fn test_template_matches_coins() {
        let template = problem(10).template();
        assert_eq!(template.len(), 4);
        assert_eq!(template.spec(0).upper(), 3);
        assert_eq!(template.spec(3).upper(), 4);
        assert!(template.specs().iter().all(|s| s.lower() == 0));
    }

    #[test]
    fn test_invalid_problems() {
        assert!(MakeChange::new(10, vec![]).is_err());
        assert!(MakeChange::new(10, vec![Coin::new("air", 0, 1)]).is_err());
        assert!(MakeChange::new(10, vec![Coin::new("a", 1, u32::MAX); 1]).is_ok());
        assert!(MakeChange::new(u64::MAX, us_coins()).is_ok());
    }

    #[test]
    fn test_report() {
        let report = problem(88).report(&[3, 1, 0, 3]).unwrap();
        assert!(report.exact);
        assert_eq!(report.total_value, 88);
        assert_eq!(report.coin_count, 7);
        assert_eq!(report.counts[0].name, "quarters");
        assert_eq!(report.counts[0].count, 3);
        assert_eq!(problem(104).max_reachable(), Some(104));
    }
}
