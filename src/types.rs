//! Core value types: base occupancy, plate-appearance outcomes, cut tables.
//!
//! [`Bases`] is three independent flags (one runner per base at most by
//! construction). Outcome selection uses [`CutTable`], an ordered list of
//! cumulative thresholds evaluated against one uniform draw.

use serde::Serialize;

/// Which of first, second, and third base hold a runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Bases {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl Bases {
    pub const EMPTY: Bases = Bases::new(false, false, false);
    pub const LOADED: Bases = Bases::new(true, true, true);

    pub const fn new(first: bool, second: bool, third: bool) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Bit 0 = first, bit 1 = second, bit 2 = third.
    pub const fn from_bits(bits: u8) -> Self {
        Self::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0)
    }

    pub const fn bits(&self) -> u8 {
        self.first as u8 | (self.second as u8) << 1 | (self.third as u8) << 2
    }

    /// All eight occupancy states, empty first.
    pub fn all() -> impl Iterator<Item = Bases> {
        (0u8..8).map(Bases::from_bits)
    }

    /// Number of runners on base.
    pub const fn runners(&self) -> u32 {
        self.first as u32 + self.second as u32 + self.third as u32
    }

    pub const fn is_empty(&self) -> bool {
        self.bits() == 0
    }

    /// `[first, second, third]` as 0/1.
    pub const fn as_array(&self) -> [u8; 3] {
        [self.first as u8, self.second as u8, self.third as u8]
    }
}

/// The four hit types, in cut-point order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    Single,
    Double,
    Triple,
    HomeRun,
}

impl HitType {
    pub const ALL: [HitType; 4] = [
        HitType::Single,
        HitType::Double,
        HitType::Triple,
        HitType::HomeRun,
    ];
}

/// First-level result of a plate appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateResult {
    /// Walk or hit-by-pitch.
    Walk,
    Hit,
    Out,
}

/// Baserunning event applied to a base state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Walk,
    Hit(HitType),
}

impl Event {
    pub const ALL: [Event; 5] = [
        Event::Walk,
        Event::Hit(HitType::Single),
        Event::Hit(HitType::Double),
        Event::Hit(HitType::Triple),
        Event::Hit(HitType::HomeRun),
    ];
}

/// Result of applying an event to a base state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    pub bases: Bases,
    pub runs: u32,
}

/// Result of pre-pitch steal resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StealOutcome {
    pub bases: Bases,
    /// 0, 1, or 2.
    pub outs_added: u32,
    /// Always 0 under the current steal rules.
    pub runs: u32,
}

/// Ordered cumulative thresholds over a uniform draw in [0, 1).
///
/// `select(r)` returns the outcome of the first cut whose threshold is
/// strictly greater than `r`, or `fallback` if none is. Thresholds are
/// expected to be non-decreasing.
#[derive(Clone, Debug, PartialEq)]
pub struct CutTable<T: Copy> {
    cuts: Vec<(f64, T)>,
    fallback: T,
}

impl<T: Copy> CutTable<T> {
    pub fn new(cuts: Vec<(f64, T)>, fallback: T) -> Self {
        Self { cuts, fallback }
    }

    #[inline]
    pub fn select(&self, r: f64) -> T {
        for &(threshold, outcome) in &self.cuts {
            if r < threshold {
                return outcome;
            }
        }
        self.fallback
    }

    pub fn cuts(&self) -> &[(f64, T)] {
        &self.cuts
    }

    pub fn fallback(&self) -> T {
        self.fallback
    }

    /// True if thresholds never decrease.
    pub fn is_monotone(&self) -> bool {
        self.cuts.windows(2).all(|w| w[0].0 <= w[1].0)
    }
}
