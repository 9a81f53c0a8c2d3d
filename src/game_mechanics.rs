//! Baserunner advancement and steal resolution.
//!
//! Pure functions over [`Bases`]. Randomness is drawn only where advancement
//! is probabilistic (single, double, steals), and always in a fixed order so
//! a seeded run consumes the same sequence every time:
//!
//! | Event | Draws |
//! |-------|-------|
//! | walk, triple, home run | none |
//! | single | runner on 2nd (if any), then runner on 1st (if any) |
//! | double | runner on 1st (if any) |
//! | steals | 1B→2B attempt, success; then 2B→3B attempt, success |

use rand::Rng;

use crate::config::StealParams;
use crate::constants::*;
use crate::types::{Advance, Bases, Event, HitType, StealOutcome};

/// Walk or HBP: batter to first, runners move only when forced.
pub fn force_walk(bases: Bases) -> Advance {
    Advance {
        bases: Bases::new(
            true,
            bases.first || bases.second,
            bases.third || (bases.first && bases.second),
        ),
        runs: (bases == Bases::LOADED) as u32,
    }
}

/// Single: third scores; second scores or holds at third; first takes
/// third or second. Batter to first.
///
/// A runner from first who would take third stops at second instead when
/// the runner from second is holding there.
pub fn advance_single<R: Rng>(bases: Bases, rng: &mut R) -> Advance {
    let mut runs = bases.third as u32;
    let mut next = Bases::new(true, false, false);
    if bases.second {
        if rng.random::<f64>() < SINGLE_SCORE_FROM_SECOND {
            runs += 1;
        } else {
            next.third = true;
        }
    }
    if bases.first {
        // The draw is made even when third is already taken.
        let takes_third = rng.random::<f64>() < SINGLE_FIRST_TO_THIRD;
        if takes_third && !next.third {
            next.third = true;
        } else {
            next.second = true;
        }
    }
    Advance { bases: next, runs }
}

/// Double: second and third score; first scores or holds at third. Batter to second.
pub fn advance_double<R: Rng>(bases: Bases, rng: &mut R) -> Advance {
    let mut runs = bases.second as u32 + bases.third as u32;
    let mut next = Bases::new(false, true, false);
    if bases.first {
        if rng.random::<f64>() < DOUBLE_SCORE_FROM_FIRST {
            runs += 1;
        } else {
            next.third = true;
        }
    }
    Advance { bases: next, runs }
}

/// Triple: everyone scores, batter to third.
pub fn advance_triple(bases: Bases) -> Advance {
    Advance {
        bases: Bases::new(false, false, true),
        runs: bases.runners(),
    }
}

/// Home run: everyone including the batter scores.
pub fn advance_home_run(bases: Bases) -> Advance {
    Advance {
        bases: Bases::EMPTY,
        runs: bases.runners() + 1,
    }
}

pub fn apply_hit<R: Rng>(hit: HitType, bases: Bases, rng: &mut R) -> Advance {
    match hit {
        HitType::Single => advance_single(bases, rng),
        HitType::Double => advance_double(bases, rng),
        HitType::Triple => advance_triple(bases),
        HitType::HomeRun => advance_home_run(bases),
    }
}

pub fn apply_event<R: Rng>(event: Event, bases: Bases, rng: &mut R) -> Advance {
    match event {
        Event::Walk => force_walk(bases),
        Event::Hit(hit) => apply_hit(hit, bases, rng),
    }
}

/// Pre-pitch steal attempts.
///
/// 1B→2B is tried when first is occupied and second is open. 2B→3B is then
/// tried when second is occupied, third is open, and `outs + outs_added`
/// is still below [`STEAL_THIRD_MAX_OUTS`]. A caught runner is removed and
/// costs one out. The attempt draw is only made when the base condition
/// holds, and the success draw only on an attempt.
pub fn resolve_steals<R: Rng>(
    bases: Bases,
    outs: u32,
    steals: &StealParams,
    rng: &mut R,
) -> StealOutcome {
    let mut next = bases;
    let mut outs_added = 0;

    if next.first && !next.second && rng.random::<f64>() < steals.att_1b_to_2b {
        next.first = false;
        if rng.random::<f64>() < steals.succ_1b_to_2b {
            next.second = true;
        } else {
            outs_added += 1;
        }
    }

    if next.second
        && !next.third
        && outs + outs_added < STEAL_THIRD_MAX_OUTS
        && rng.random::<f64>() < steals.att_2b_to_3b
    {
        next.second = false;
        if rng.random::<f64>() < steals.succ_2b_to_3b {
            next.third = true;
        } else {
            outs_added += 1;
        }
    }

    StealOutcome {
        bases: next,
        outs_added,
        runs: 0,
    }
}
