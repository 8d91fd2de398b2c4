//! Minimum-coin change making on top of the GA core.
//!
//! One gene per coin denomination holds how many of that coin are used.
//! [`MakeChange`] is the [`FitnessEvaluator`](crate::ga::FitnessEvaluator):
//! it prefers exact totals first, then fewer coins.
//!
//! ```
//! use u_makechange::change::{us_coins, MakeChange};
//! use u_makechange::ga::GaConfig;
//!
//! let problem = MakeChange::new(88, us_coins()).unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(500)
//!     .with_generations(10)
//!     .with_seed(42);
//! let solution = problem.solve(&config).unwrap();
//! assert_eq!(solution.report.total_value, 88);
//! assert_eq!(solution.report.coin_count, 7);
//! ```

mod coins;
mod problem;
mod settings;

pub use coins::{us_coins, Coin};
pub use problem::{ChangeReport, ChangeScore, ChangeSolution, CoinCount, MakeChange};
pub use settings::MakeChangeSettings;
