//! Half-inning and game simulation.
//!
//! [`GameRules`] is a validated, compiled [`SimConfig`]: each lineup slot
//! becomes a [`CutTable`] over (walk, hit, out) and the hit distribution a
//! [`CutTable`] over hit types. [`HalfInning`] is the explicit state machine
//! (outs, bases, lineup cursor) driven one loop iteration at a time:
//!
//! 1. resolve steals; stop if the out limit is reached
//! 2. draw `r` for the batter at the cursor: walk, hit, or out
//! 3. on a hit, draw `r2` for the hit type and apply its advancement
//! 4. advance the cursor (wrapping), out or not
//!
//! A game alternates team 1 and team 2 half-innings on one seeded
//! [`SmallRng`]; each team keeps its own cursor across innings while bases
//! reset every half-inning.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{SimConfig, StealParams};
use crate::error::{ConfigError, SimError};
use crate::game_mechanics::{apply_hit, force_walk, resolve_steals};
use crate::types::{Bases, CutTable, HitType, PlateResult};

/// One compiled lineup slot.
#[derive(Clone, Debug)]
pub struct BatterSlot {
    pub position: String,
    pub plate: CutTable<PlateResult>,
}

/// Validated configuration in lookup-table form. Shared read-only by every
/// trial of a batch; trials differ only in the seed they are played with.
#[derive(Clone, Debug)]
pub struct GameRules {
    lineup: Vec<BatterSlot>,
    hits: CutTable<HitType>,
    steals: StealParams,
}

impl GameRules {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut lineup = Vec::with_capacity(config.lineup.len());
        for position in &config.lineup {
            let batter = config
                .batters
                .get(position)
                .ok_or_else(|| ConfigError::MissingBatter {
                    position: position.clone(),
                })?;
            let prob_walk = batter.walk_probability(config.walk_hbp_bump);
            let prob_hit = batter.ba;
            lineup.push(BatterSlot {
                position: position.clone(),
                plate: CutTable::new(
                    vec![
                        (prob_walk, PlateResult::Walk),
                        (prob_walk + prob_hit, PlateResult::Hit),
                    ],
                    PlateResult::Out,
                ),
            });
        }

        let [single, double, triple] = config.hit_distribution.cut_points();
        let hits = CutTable::new(
            vec![
                (single, HitType::Single),
                (double, HitType::Double),
                (triple, HitType::Triple),
            ],
            HitType::HomeRun,
        );

        Ok(Self {
            lineup,
            hits,
            steals: config.steal_params(),
        })
    }

    pub fn lineup_len(&self) -> usize {
        self.lineup.len()
    }

    pub fn slot(&self, index: usize) -> &BatterSlot {
        &self.lineup[index % self.lineup.len()]
    }

    pub fn hit_table(&self) -> &CutTable<HitType> {
        &self.hits
    }

    pub fn steals(&self) -> &StealParams {
        &self.steals
    }

    /// Start a half-inning with empty bases and no outs.
    pub fn half_inning(&self, outs_per_inning: u32, start_batter: usize) -> HalfInning<'_> {
        HalfInning {
            rules: self,
            outs_limit: outs_per_inning,
            outs: 0,
            runs: 0,
            bases: Bases::EMPTY,
            cursor: start_batter % self.lineup.len(),
            plate_appearances: 0,
        }
    }

    /// Play a half-inning to completion.
    pub fn play_half_inning<R: Rng>(
        &self,
        outs_per_inning: u32,
        start_batter: usize,
        rng: &mut R,
    ) -> HalfInningResult {
        let mut inning = self.half_inning(outs_per_inning, start_batter);
        while !inning.is_over() {
            inning.step(rng);
        }
        inning.finish()
    }

    /// Play a game on a fresh generator seeded with `seed`.
    pub fn play_game(
        &self,
        innings: u32,
        outs_per_inning: u32,
        seed: u64,
        record_progress: bool,
    ) -> GameResult {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.play_game_with_rng(innings, outs_per_inning, &mut rng, record_progress)
    }

    pub fn play_game_with_rng<R: Rng>(
        &self,
        innings: u32,
        outs_per_inning: u32,
        rng: &mut R,
        record_progress: bool,
    ) -> GameResult {
        let mut team1_runs = 0u32;
        let mut team2_runs = 0u32;
        let mut team1_cursor = 0usize;
        let mut team2_cursor = 0usize;
        let mut progress = record_progress.then(|| GameProgress {
            team1: Vec::with_capacity(innings as usize),
            team2: Vec::with_capacity(innings as usize),
        });

        for _ in 0..innings {
            let top = self.play_half_inning(outs_per_inning, team1_cursor, rng);
            team1_cursor = top.next_batter;
            let bottom = self.play_half_inning(outs_per_inning, team2_cursor, rng);
            team2_cursor = bottom.next_batter;

            team1_runs += top.runs;
            team2_runs += bottom.runs;
            if let Some(p) = progress.as_mut() {
                p.team1.push(team1_runs);
                p.team2.push(team2_runs);
            }
        }

        GameResult {
            team1_runs,
            team2_runs,
            total_runs: team1_runs + team2_runs,
            progress,
        }
    }
}

/// What one plate appearance did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlateAppearance {
    /// Lineup slot of the batter.
    pub slot: usize,
    pub result: PlateResult,
    /// Set when `result` is a hit.
    pub hit: Option<HitType>,
    /// Runs scored on this plate appearance.
    pub runs: u32,
    /// Bases after the plate appearance.
    pub bases: Bases,
    /// Outs after the plate appearance.
    pub outs: u32,
}

/// Half-inning state machine: (outs, bases, lineup cursor) plus run and
/// plate-appearance tallies. Terminal once `outs >= outs_limit`.
#[derive(Clone, Debug)]
pub struct HalfInning<'a> {
    rules: &'a GameRules,
    outs_limit: u32,
    outs: u32,
    runs: u32,
    bases: Bases,
    cursor: usize,
    plate_appearances: u64,
}

impl HalfInning<'_> {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.outs >= self.outs_limit
    }

    pub fn outs(&self) -> u32 {
        self.outs
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn bases(&self) -> Bases {
        self.bases
    }

    /// Lineup slot of the next batter.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn plate_appearances(&self) -> u64 {
        self.plate_appearances
    }

    /// One loop iteration: steals, then at most one plate appearance.
    ///
    /// Returns `None` without drawing if the inning is already over, and
    /// `None` after the steal draws if a caught stealing ended it.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Option<PlateAppearance> {
        if self.is_over() || self.run_steals(rng) {
            return None;
        }
        Some(self.play_plate_appearance(rng))
    }

    /// Like [`HalfInning::step`], but fails instead of resolving a plate
    /// appearance once `max_plate_appearances` have already been played.
    /// An inning that ends on the bases before that point is not an error.
    pub fn step_within<R: Rng>(
        &mut self,
        rng: &mut R,
        max_plate_appearances: u64,
    ) -> Result<Option<PlateAppearance>, SimError> {
        if self.is_over() || self.run_steals(rng) {
            return Ok(None);
        }
        if self.plate_appearances >= max_plate_appearances {
            return Err(SimError::PlateAppearanceLimit {
                limit: max_plate_appearances,
            });
        }
        Ok(Some(self.play_plate_appearance(rng)))
    }

    /// Resolve pre-pitch steals. Returns true if they ended the inning.
    fn run_steals<R: Rng>(&mut self, rng: &mut R) -> bool {
        let steal = resolve_steals(self.bases, self.outs, &self.rules.steals, rng);
        self.bases = steal.bases;
        self.outs += steal.outs_added;
        self.runs += steal.runs;
        self.is_over()
    }

    fn play_plate_appearance<R: Rng>(&mut self, rng: &mut R) -> PlateAppearance {
        let slot = self.cursor;
        let result = self.rules.lineup[slot].plate.select(rng.random::<f64>());
        let mut hit = None;
        let mut runs = 0;
        match result {
            PlateResult::Walk => {
                let adv = force_walk(self.bases);
                self.bases = adv.bases;
                runs = adv.runs;
            }
            PlateResult::Hit => {
                let hit_type = self.rules.hits.select(rng.random::<f64>());
                let adv = apply_hit(hit_type, self.bases, rng);
                self.bases = adv.bases;
                runs = adv.runs;
                hit = Some(hit_type);
            }
            PlateResult::Out => self.outs += 1,
        }
        self.runs += runs;
        self.cursor = (self.cursor + 1) % self.rules.lineup.len();
        self.plate_appearances += 1;

        PlateAppearance {
            slot,
            result,
            hit,
            runs,
            bases: self.bases,
            outs: self.outs,
        }
    }

    pub fn finish(self) -> HalfInningResult {
        HalfInningResult {
            runs: self.runs,
            next_batter: self.cursor,
            bases: self.bases,
            plate_appearances: self.plate_appearances,
        }
    }
}

/// Outcome of a half-inning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HalfInningResult {
    pub runs: u32,
    /// Lineup slot that leads off this team's next half-inning.
    pub next_batter: usize,
    /// Bases when the inning ended. Not carried into the next half-inning.
    pub bases: Bases,
    pub plate_appearances: u64,
}

/// Cumulative runs after each completed inning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameProgress {
    pub team1: Vec<u32>,
    pub team2: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub team1_runs: u32,
    pub team2_runs: u32,
    pub total_runs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<GameProgress>,
}

impl GameResult {
    /// Mean runs per team for this game.
    pub fn runs_per_team(&self) -> f64 {
        self.total_runs as f64 / 2.0
    }
}

pub(crate) fn check_positive<T: Default + PartialOrd>(
    value: T,
    field: &'static str,
) -> Result<(), ConfigError> {
    if value > T::default() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field })
    }
}

/// Simulate one half-inning from `start_batter` (taken modulo lineup length).
///
/// Runs until the out limit is reached; a configuration in which no batter
/// can make an out and no runner can be caught never terminates. Use
/// [`simulate_half_inning_bounded`] when that is possible.
pub fn simulate_half_inning<R: Rng>(
    outs_per_inning: u32,
    config: &SimConfig,
    start_batter: usize,
    rng: &mut R,
) -> Result<HalfInningResult, SimError> {
    check_positive(outs_per_inning, "outs_per_inning")?;
    let rules = GameRules::new(config)?;
    Ok(rules.play_half_inning(outs_per_inning, start_batter, rng))
}

/// Like [`simulate_half_inning`], but fails when the inning would need more
/// than `max_plate_appearances` plate appearances to finish.
pub fn simulate_half_inning_bounded<R: Rng>(
    outs_per_inning: u32,
    config: &SimConfig,
    start_batter: usize,
    rng: &mut R,
    max_plate_appearances: u64,
) -> Result<HalfInningResult, SimError> {
    check_positive(outs_per_inning, "outs_per_inning")?;
    let rules = GameRules::new(config)?;
    let mut inning = rules.half_inning(outs_per_inning, start_batter);
    while !inning.is_over() {
        inning.step_within(rng, max_plate_appearances)?;
    }
    Ok(inning.finish())
}

/// Simulate a full game seeded once from `config.seed`.
pub fn simulate_game(
    innings: u32,
    outs_per_inning: u32,
    config: &SimConfig,
    return_progress: bool,
) -> Result<GameResult, SimError> {
    check_positive(innings, "innings")?;
    check_positive(outs_per_inning, "outs_per_inning")?;
    let rules = GameRules::new(config)?;
    Ok(rules.play_game(innings, outs_per_inning, config.seed, return_progress))
}
