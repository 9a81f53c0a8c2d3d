//! Batch aggregation over many independent trials.
//!
//! Every trial gets its own seed derived from `config.seed`; the config is
//! never mutated. Trials run on the rayon pool and are collected in trial
//! order before reduction, so results do not depend on the thread count.
//!
//! | Function | Trial | Seed of trial `i` |
//! |----------|-------|-------------------|
//! | [`simulate_many`] | full game | `seed + i·7919` |
//! | [`expected_runs_per_inning_curve`] | half-inning from slot 0 | `seed + i·104729 + outs·1299709` |
//! | [`runs_grid`], [`run_distributions`], [`variance_vs_mean`] | full game | `seed + i·7919` |

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::SimConfig;
use crate::constants::*;
use crate::error::{ConfigError, SimError};

use super::engine::{check_positive, GameResult, GameRules};
use super::statistics::{mean_and_std, mean_and_std_u32, RunDistribution};

/// Seed for game trial `trial`.
#[inline]
pub fn game_trial_seed(base_seed: u64, trial: usize) -> u64 {
    base_seed.wrapping_add((trial as u64).wrapping_mul(GAME_SEED_STRIDE))
}

/// Seed for EV-curve trial `trial` at `outs` outs per inning.
#[inline]
pub fn curve_trial_seed(base_seed: u64, trial: usize, outs: u32) -> u64 {
    base_seed
        .wrapping_add((trial as u64).wrapping_mul(CURVE_TRIAL_SEED_STRIDE))
        .wrapping_add((outs as u64).wrapping_mul(CURVE_OUTS_SEED_STRIDE))
}

/// Mean and spread of runs over a batch of games.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchSummary {
    pub avg_total_runs: f64,
    pub std_total_runs: f64,
    /// Both teams' per-game runs pooled into one sample.
    pub avg_runs_per_team: f64,
    pub std_runs_per_team: f64,
}

/// Expected runs per half-inning at one outs-per-inning value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    pub outs: u32,
    pub expected_value: f64,
    pub std_dev: f64,
}

/// Mean per-team runs for every (outs, innings) combination.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunsGrid {
    pub outs: Vec<u32>,
    pub innings: Vec<u32>,
    /// `avg_runs_per_team[outs_idx][innings_idx]`.
    pub avg_runs_per_team: Vec<Vec<f64>>,
}

/// Innings per game and outs per half-inning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameFormat {
    pub innings: u32,
    pub outs_per_inning: u32,
}

impl GameFormat {
    pub fn new(innings: u32, outs_per_inning: u32) -> Self {
        Self {
            innings,
            outs_per_inning,
        }
    }

    /// e.g. "9x3".
    pub fn label(&self) -> String {
        format!("{}x{}", self.innings, self.outs_per_inning)
    }

    /// 9×3, 6×4, 5×5.
    pub fn comparison_set() -> Vec<GameFormat> {
        DEFAULT_COMPARISON_FORMATS
            .iter()
            .map(|&(innings, outs)| GameFormat::new(innings, outs))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormatDistribution {
    pub label: String,
    pub format: GameFormat,
    pub distribution: RunDistribution,
}

/// Mean and spread of per-game per-team runs at one outs value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeanStdPoint {
    pub outs: u32,
    pub mean: f64,
    pub std_dev: f64,
}

/// Play `n` games with derived seeds, in trial order.
pub fn play_games(
    rules: &GameRules,
    innings: u32,
    outs_per_inning: u32,
    base_seed: u64,
    n: usize,
) -> Vec<GameResult> {
    (0..n)
        .into_par_iter()
        .map(|i| rules.play_game(innings, outs_per_inning, game_trial_seed(base_seed, i), false))
        .collect()
}

/// Run `n` games and summarise total and per-team runs.
pub fn simulate_many(
    innings: u32,
    outs_per_inning: u32,
    config: &SimConfig,
    n: usize,
) -> Result<BatchSummary, SimError> {
    check_positive(innings, "innings")?;
    check_positive(outs_per_inning, "outs_per_inning")?;
    check_positive(n, "n")?;
    let rules = GameRules::new(config)?;

    let start = Instant::now();
    let games = play_games(&rules, innings, outs_per_inning, config.seed, n);

    let totals: Vec<u32> = games.iter().map(|g| g.total_runs).collect();
    let per_team: Vec<u32> = games
        .iter()
        .map(|g| g.team1_runs)
        .chain(games.iter().map(|g| g.team2_runs))
        .collect();
    let (avg_total_runs, std_total_runs) = mean_and_std_u32(&totals);
    let (avg_runs_per_team, std_runs_per_team) = mean_and_std_u32(&per_team);

    debug!(
        games = n,
        innings,
        outs_per_inning,
        seed = config.seed,
        avg_total_runs,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch complete"
    );

    Ok(BatchSummary {
        avg_total_runs,
        std_total_runs,
        avg_runs_per_team,
        std_runs_per_team,
    })
}

/// Expected runs per half-inning for outs 1..=`max_outs`.
pub fn expected_runs_per_inning_curve(
    config: &SimConfig,
    max_outs: u32,
    sims_per_point: usize,
) -> Result<Vec<CurvePoint>, SimError> {
    check_positive(max_outs, "max_outs")?;
    check_positive(sims_per_point, "sims_per_point")?;
    let rules = GameRules::new(config)?;
    let base_seed = config.seed;

    let start = Instant::now();
    let curve = (1..=max_outs)
        .map(|outs| {
            let runs: Vec<u32> = (0..sims_per_point)
                .into_par_iter()
                .map(|i| {
                    let mut rng = SmallRng::seed_from_u64(curve_trial_seed(base_seed, i, outs));
                    rules.play_half_inning(outs, 0, &mut rng).runs
                })
                .collect();
            let (expected_value, std_dev) = mean_and_std_u32(&runs);
            CurvePoint {
                outs,
                expected_value,
                std_dev,
            }
        })
        .collect();

    debug!(
        max_outs,
        sims_per_point,
        seed = base_seed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "EV curve complete"
    );
    Ok(curve)
}

/// Mean per-team runs over `sims` games for outs 1..=`max_outs` ×
/// innings 1..=`max_innings`.
pub fn runs_grid(
    config: &SimConfig,
    max_outs: u32,
    max_innings: u32,
    sims: usize,
) -> Result<RunsGrid, SimError> {
    check_positive(max_outs, "max_outs")?;
    check_positive(max_innings, "max_innings")?;
    check_positive(sims, "sims")?;
    let rules = GameRules::new(config)?;

    let start = Instant::now();
    let outs: Vec<u32> = (1..=max_outs).collect();
    let innings: Vec<u32> = (1..=max_innings).collect();
    let avg_runs_per_team = outs
        .iter()
        .map(|&o| {
            innings
                .iter()
                .map(|&inn| {
                    let per_team: Vec<f64> = play_games(&rules, inn, o, config.seed, sims)
                        .iter()
                        .map(GameResult::runs_per_team)
                        .collect();
                    mean_and_std(&per_team).0
                })
                .collect()
        })
        .collect();

    debug!(
        max_outs,
        max_innings,
        sims,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "runs grid complete"
    );
    Ok(RunsGrid {
        outs,
        innings,
        avg_runs_per_team,
    })
}

/// Per-team run distributions for each format, both teams pooled.
pub fn run_distributions(
    config: &SimConfig,
    formats: &[GameFormat],
    sims: usize,
) -> Result<Vec<FormatDistribution>, SimError> {
    check_positive(sims, "sims")?;
    let rules = GameRules::new(config)?;

    formats
        .iter()
        .map(|&format| -> Result<FormatDistribution, SimError> {
            check_positive(format.innings, "innings")?;
            check_positive(format.outs_per_inning, "outs_per_inning")?;
            let games = play_games(
                &rules,
                format.innings,
                format.outs_per_inning,
                config.seed,
                sims,
            );
            let runs: Vec<u32> = games
                .iter()
                .flat_map(|g| [g.team1_runs, g.team2_runs])
                .collect();
            // sims > 0, so the sample is never empty.
            let distribution = RunDistribution::from_runs(&runs)
                .ok_or(ConfigError::NonPositive { field: "sims" })?;
            debug!(format = %format.label(), mean = distribution.mean, "distribution complete");
            Ok(FormatDistribution {
                label: format.label(),
                format,
                distribution,
            })
        })
        .collect()
}

/// Mean and standard deviation of per-team runs per game for outs
/// 1..=`max_outs` at a fixed number of innings.
pub fn variance_vs_mean(
    config: &SimConfig,
    innings: u32,
    max_outs: u32,
    sims: usize,
) -> Result<Vec<MeanStdPoint>, SimError> {
    check_positive(innings, "innings")?;
    check_positive(max_outs, "max_outs")?;
    check_positive(sims, "sims")?;
    let rules = GameRules::new(config)?;

    Ok((1..=max_outs)
        .map(|outs| {
            let per_team: Vec<f64> = play_games(&rules, innings, outs, config.seed, sims)
                .iter()
                .map(GameResult::runs_per_team)
                .collect();
            let (mean, std_dev) = mean_and_std(&per_team);
            MeanStdPoint {
                outs,
                mean,
                std_dev,
            }
        })
        .collect())
}
