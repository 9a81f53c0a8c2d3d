//! # Baseball run-scoring simulator
//!
//! Estimates runs per inning and per game under configurable rules (outs
//! per half-inning, innings per game, batter rates, baserunning and steal
//! behaviour) by Monte Carlo simulation.
//!
//! ## Layers
//!
//! | Layer | Module | Description |
//! |-------|--------|-------------|
//! | Configuration | [`config`] | Lineup, (BA, OBP) per position, hit mix, steal rates, seed |
//! | Advancement rules | [`game_mechanics`] | Walk / single / double / triple / home run on a base state |
//! | Steal resolution | [`game_mechanics::resolve_steals`] | 1B→2B then 2B→3B attempts before each plate appearance |
//! | Half-inning | [`simulation::HalfInning`] | Plate appearances until the out limit; bases persist within the inning |
//! | Game | [`simulation::simulate_game`] | Alternating half-innings, per-team lineup cursors, one seeded RNG |
//! | Batch | [`simulation::batch`] | Many seeded games or half-innings reduced to means and std devs |
//!
//! ## Plate appearance
//!
//! For the batter at the lineup cursor, `prob_walk = max(0, OBP − BA) + bump`
//! and `prob_hit = BA`. One uniform draw `r` selects walk (`r < prob_walk`),
//! hit (`r < prob_walk + prob_hit`), or out. A hit draws again against the
//! cumulative hit distribution (single, double, triple, else home run).
//!
//! ## Reproducibility
//!
//! Everything is deterministic given a seed. A game consumes one
//! [`rand::rngs::SmallRng`] seeded from `config.seed`; batch trial `i`
//! plays with a seed derived from the base seed and `i` (see
//! [`simulation::batch`]), never by mutating the config.

pub mod config;
pub mod constants;
pub mod env_config;
pub mod error;
pub mod game_mechanics;
pub mod simulation;
pub mod types;

#[cfg(test)]
pub(crate) mod test_rng;

pub use config::{Batter, HitDistribution, SimConfig, StealParams};
pub use error::{ConfigError, SimError};
pub use types::{Bases, HitType, PlateResult};
