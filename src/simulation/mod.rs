//! Game simulation and batch aggregation.
//!
//! - [`engine`]: compiled rules, half-inning state machine, single games
//! - [`batch`]: many seeded trials reduced to summaries, curves, and sweeps
//! - [`statistics`]: mean/std, run distributions, JSON output

pub mod batch;
pub mod engine;
pub mod statistics;

// Re-export commonly used items
pub use batch::{
    curve_trial_seed, expected_runs_per_inning_curve, game_trial_seed, play_games,
    run_distributions, runs_grid, simulate_many, variance_vs_mean, BatchSummary, CurvePoint,
    FormatDistribution, GameFormat, MeanStdPoint, RunsGrid,
};
pub use engine::{
    simulate_game, simulate_half_inning, simulate_half_inning_bounded, BatterSlot, GameProgress,
    GameResult, GameRules, HalfInning, HalfInningResult, PlateAppearance,
};
pub use statistics::{mean_and_std, save_json, RunDistribution};
