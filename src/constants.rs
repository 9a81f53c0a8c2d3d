//! Rule constants, seed strides, and calibrated defaults.
//!
//! Advancement probabilities model average-case baserunning and are the same
//! for every batter; they are not part of [`crate::config::SimConfig`].
//! Defaults reproduce a rough league-average offense:
//! - [`DEFAULT_LINEUP`]: nine defensive positions in batting order
//! - [`DEFAULT_BATTERS`]: (BA, OBP) per position
//! - [`DEFAULT_HIT_DISTRIBUTION`]: single / double / triple / home run shares

/// P(runner on second scores on a single). Otherwise the runner stops at third.
pub const SINGLE_SCORE_FROM_SECOND: f64 = 0.68;

/// P(runner on first takes third on a single). Otherwise the runner stops at second.
pub const SINGLE_FIRST_TO_THIRD: f64 = 0.30;

/// P(runner on first scores on a double). Otherwise the runner stops at third.
pub const DOUBLE_SCORE_FROM_FIRST: f64 = 0.45;

/// A 2B→3B steal is only attempted while the projected out count is below this.
pub const STEAL_THIRD_MAX_OUTS: u32 = 2;

/// Seed stride between consecutive full-game trials.
pub const GAME_SEED_STRIDE: u64 = 7919;

/// Seed stride between consecutive half-inning trials on the EV curve.
pub const CURVE_TRIAL_SEED_STRIDE: u64 = 104_729;

/// Seed stride between outs-per-inning points on the EV curve.
pub const CURVE_OUTS_SEED_STRIDE: u64 = 1_299_709;

/// Default number of games for [`crate::simulation::simulate_many`].
pub const DEFAULT_NUM_GAMES: usize = 2000;

/// Default largest outs-per-inning value on the EV curve.
pub const DEFAULT_CURVE_MAX_OUTS: u32 = 9;

/// Default half-innings simulated per EV curve point.
pub const DEFAULT_CURVE_SIMS: usize = 4000;

/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Walk/HBP bump added on top of OBP − BA.
pub const DEFAULT_WALK_HBP_BUMP: f64 = 0.003;

pub const DEFAULT_STEAL_ATT_1B_TO_2B: f64 = 0.02;
pub const DEFAULT_STEAL_ATT_2B_TO_3B: f64 = 0.006;
pub const DEFAULT_STEAL_SUCC_1B_TO_2B: f64 = 0.74;
pub const DEFAULT_STEAL_SUCC_2B_TO_3B: f64 = 0.70;

/// (single, double, triple, home_run) weights.
pub const DEFAULT_HIT_DISTRIBUTION: [f64; 4] = [0.69, 0.21, 0.02, 0.08];

/// Default batting order.
pub const DEFAULT_LINEUP: [&str; 9] = ["SS", "2B", "CF", "1B", "DH", "RF", "LF", "3B", "C"];

/// Default (position, BA, OBP) table.
pub const DEFAULT_BATTERS: [(&str, f64, f64); 9] = [
    ("C", 0.239, 0.307),
    ("1B", 0.249, 0.324),
    ("2B", 0.242, 0.311),
    ("3B", 0.245, 0.317),
    ("SS", 0.257, 0.321),
    ("LF", 0.248, 0.321),
    ("CF", 0.250, 0.320),
    ("RF", 0.255, 0.324),
    ("DH", 0.252, 0.330),
];

/// Game formats compared by [`crate::simulation::run_distributions`]: (innings, outs).
pub const DEFAULT_COMPARISON_FORMATS: [(u32, u32); 3] = [(9, 3), (6, 4), (5, 5)];
