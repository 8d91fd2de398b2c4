//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes are chosen as parents for
//! crossover. Strategies work on the score list of the current population,
//! so they never see the genes and cannot disturb them.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

use super::types::{cmp_fitness, Fitness};

/// Selection strategy for choosing parents.
///
/// All strategies assume **minimization** (lower fitness = better), sample
/// with replacement, and give a strictly better score at least the selection
/// probability of a strictly worse one.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_makechange::ga::Selection;
///
/// let scores = [12u64, 3, 40, 7];
/// let mut rng = StdRng::seed_from_u64(42);
/// let parents = Selection::Tournament(3).select_many(&scores, 6, &mut rng);
/// assert_eq!(parents.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` chromosomes at random, keep the best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Since we minimize, uses inverse fitness transformation. Every member
    /// keeps a small positive weight, including the worst.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Rank-based selection.
    ///
    /// Selection probability is proportional to rank position, not raw
    /// fitness value: the best of `n` gets weight `n`, the worst weight 1.
    /// Equal scores share the same weight.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per call (sort), O(n) per draw
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select one parent index.
    ///
    /// # Panics
    /// Panics if `scores` is empty.
    pub fn select<F: Fitness, R: Rng>(&self, scores: &[F], rng: &mut R) -> usize {
        assert!(!scores.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(scores, *k, rng),
            Selection::Roulette => Wheel::roulette(scores).spin(rng),
            Selection::Rank => Wheel::rank(scores).spin(rng),
        }
    }

    /// Select `count` parent indices with replacement.
    ///
    /// Weight tables for roulette and rank are built once per call.
    ///
    /// # Panics
    /// Panics if `scores` is empty and `count > 0`.
    pub fn select_many<F: Fitness, R: Rng>(
        &self,
        scores: &[F],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        if count == 0 {
            return Vec::new();
        }
        assert!(!scores.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => (0..count).map(|_| tournament(scores, *k, rng)).collect(),
            Selection::Roulette => {
                let wheel = Wheel::roulette(scores);
                (0..count).map(|_| wheel.spin(rng)).collect()
            }
            Selection::Rank => {
                let wheel = Wheel::rank(scores);
                (0..count).map(|_| wheel.spin(rng)).collect()
            }
        }
    }
}

/// Tournament selection: pick k random chromosomes, return best.
fn tournament<F: Fitness, R: Rng>(scores: &[F], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = scores.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if scores[idx] < scores[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Cumulative weight table for proportional draws.
struct Wheel {
    cumulative: Vec<f64>,
}

impl Wheel {
    /// Inverse-fitness weights: `w_i = max - f_i + epsilon`.
    ///
    /// Non-finite scores (e.g. infinite penalties) get the minimum weight.
    fn roulette<F: Fitness>(scores: &[F]) -> Self {
        let epsilon = 1e-10;
        let fitnesses: Vec<f64> = scores.iter().map(|f| f.to_f64()).collect();
        let max_fitness = fitnesses
            .iter()
            .copied()
            .filter(|f| f.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);

        Self::from_weights(fitnesses.iter().map(|&f| {
            if !f.is_finite() {
                return epsilon;
            }
            let w = max_fitness - f + epsilon;
            if w > 0.0 {
                w
            } else {
                epsilon
            }
        }))
    }

    /// Linear ranking with shared weight for tied scores.
    fn rank<F: Fitness>(scores: &[F]) -> Self {
        let n = scores.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| cmp_fitness(&scores[a], &scores[b]));

        let mut weights = vec![0.0; n];
        let mut pos = 0;
        while pos < n {
            let mut end = pos + 1;
            while end < n && cmp_fitness(&scores[order[end]], &scores[order[pos]]).is_eq() {
                end += 1;
            }
            // rank 0 (best) weighs n, ties take the weight of their best position
            let weight = (n - pos) as f64;
            for &idx in &order[pos..end] {
                weights[idx] = weight;
            }
            pos = end;
        }
        Self::from_weights(weights)
    }

    fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let mut total = 0.0;
        let cumulative = weights
            .into_iter()
            .map(|w| {
                total += w;
                total
            })
            .collect();
        Self { cumulative }
    }

    fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.cumulative.len();
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        if n == 1 || total <= 0.0 || !total.is_finite() {
            return rng.random_range(0..n);
        }
        let threshold = rng.random_range(0.0..total);
        self.cumulative
            .partition_point(|&c| c <= threshold)
            .min(n - 1) // floating-point fallback
    }
}
