//! Simulation configuration: lineup, batter rates, hit mix, steals, seed.
//!
//! [`SimConfig`] is plain data. It is read-only to the engine; batch drivers
//! derive per-trial seeds instead of mutating it (see [`SimConfig::with_seed`]).
//! Validation is explicit via [`SimConfig::validate`] and also runs when the
//! engine compiles a config into [`crate::simulation::GameRules`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Batting rates for one lineup position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batter {
    /// Batting average.
    #[serde(rename = "BA", alias = "ba")]
    pub ba: f64,
    /// On-base percentage. Expected ≥ BA but not enforced.
    #[serde(rename = "OBP", alias = "obp")]
    pub obp: f64,
}

impl Batter {
    pub fn new(ba: f64, obp: f64) -> Self {
        Self { ba, obp }
    }

    /// P(walk or HBP) = max(0, OBP − BA) + bump.
    #[inline]
    pub fn walk_probability(&self, walk_hbp_bump: f64) -> f64 {
        (self.obp - self.ba).max(0.0) + walk_hbp_bump
    }
}

/// Relative weights of the four hit types.
///
/// Consumed as cumulative cut points over a uniform draw, not normalised:
/// any draw at or above `single + double + triple` is a home run, so weights
/// summing below 1.0 inflate the home-run share and weights summing above
/// 1.0 shrink it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitDistribution {
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
}

impl Default for HitDistribution {
    fn default() -> Self {
        let [single, double, triple, home_run] = DEFAULT_HIT_DISTRIBUTION;
        Self {
            single,
            double,
            triple,
            home_run,
        }
    }
}

impl HitDistribution {
    /// Cut points for single, double, triple. Home run takes the rest.
    pub fn cut_points(&self) -> [f64; 3] {
        let s = self.single;
        let d = s + self.double;
        let t = d + self.triple;
        [s, d, t]
    }

    pub fn total(&self) -> f64 {
        self.single + self.double + self.triple + self.home_run
    }
}

/// Steal attempt and success probabilities for the two stealable bases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StealParams {
    pub att_1b_to_2b: f64,
    pub succ_1b_to_2b: f64,
    pub att_2b_to_3b: f64,
    pub succ_2b_to_3b: f64,
}

impl StealParams {
    /// No runner ever attempts a steal.
    pub const NEVER: StealParams = StealParams {
        att_1b_to_2b: 0.0,
        succ_1b_to_2b: 0.0,
        att_2b_to_3b: 0.0,
        succ_2b_to_3b: 0.0,
    };
}

/// Full simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Batting order as position labels. Labels may repeat.
    #[serde(default = "default_lineup")]
    pub lineup: Vec<String>,
    #[serde(default = "default_batters")]
    pub batters: BTreeMap<String, Batter>,
    #[serde(default)]
    pub hit_distribution: HitDistribution,
    #[serde(default = "default_steal_att_1b_to_2b")]
    pub steal_att_1b_to_2b: f64,
    #[serde(default = "default_steal_att_2b_to_3b")]
    pub steal_att_2b_to_3b: f64,
    #[serde(default = "default_steal_succ_1b_to_2b")]
    pub steal_succ_1b_to_2b: f64,
    #[serde(default = "default_steal_succ_2b_to_3b")]
    pub steal_succ_2b_to_3b: f64,
    #[serde(default = "default_walk_hbp_bump")]
    pub walk_hbp_bump: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_lineup() -> Vec<String> {
    DEFAULT_LINEUP.iter().map(|p| p.to_string()).collect()
}

/// The nine default batters keyed by position.
pub fn default_batters() -> BTreeMap<String, Batter> {
    DEFAULT_BATTERS
        .iter()
        .map(|&(pos, ba, obp)| (pos.to_string(), Batter::new(ba, obp)))
        .collect()
}

fn default_steal_att_1b_to_2b() -> f64 {
    DEFAULT_STEAL_ATT_1B_TO_2B
}

fn default_steal_att_2b_to_3b() -> f64 {
    DEFAULT_STEAL_ATT_2B_TO_3B
}

fn default_steal_succ_1b_to_2b() -> f64 {
    DEFAULT_STEAL_SUCC_1B_TO_2B
}

fn default_steal_succ_2b_to_3b() -> f64 {
    DEFAULT_STEAL_SUCC_2B_TO_3B
}

fn default_walk_hbp_bump() -> f64 {
    DEFAULT_WALK_HBP_BUMP
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lineup: default_lineup(),
            batters: default_batters(),
            hit_distribution: HitDistribution::default(),
            steal_att_1b_to_2b: DEFAULT_STEAL_ATT_1B_TO_2B,
            steal_att_2b_to_3b: DEFAULT_STEAL_ATT_2B_TO_3B,
            steal_succ_1b_to_2b: DEFAULT_STEAL_SUCC_1B_TO_2B,
            steal_succ_2b_to_3b: DEFAULT_STEAL_SUCC_2B_TO_3B,
            walk_hbp_bump: DEFAULT_WALK_HBP_BUMP,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Load from a YAML file. See [`SimConfig::from_yaml_str`].
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse YAML, fill defaults, and validate.
    ///
    /// An explicitly empty `batters` map is replaced by the default batters.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: SimConfig = serde_yaml::from_str(yaml)?;
        if config.batters.is_empty() {
            config.batters = default_batters();
        }
        config.validate()?;
        Ok(config)
    }

    /// Copy of this config with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    pub fn steal_params(&self) -> StealParams {
        StealParams {
            att_1b_to_2b: self.steal_att_1b_to_2b,
            succ_1b_to_2b: self.steal_succ_1b_to_2b,
            att_2b_to_3b: self.steal_att_2b_to_3b,
            succ_2b_to_3b: self.steal_succ_2b_to_3b,
        }
    }

    /// Reject empty lineups, unknown positions, and out-of-domain rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lineup.is_empty() {
            return Err(ConfigError::EmptyLineup);
        }
        for pos in &self.lineup {
            if !self.batters.contains_key(pos) {
                return Err(ConfigError::MissingBatter {
                    position: pos.clone(),
                });
            }
        }

        for (pos, batter) in &self.batters {
            check_probability(format!("batters.{pos}.BA"), batter.ba)?;
            check_probability(format!("batters.{pos}.OBP"), batter.obp)?;
        }

        let steals = [
            ("steal_att_1b_to_2b", self.steal_att_1b_to_2b),
            ("steal_att_2b_to_3b", self.steal_att_2b_to_3b),
            ("steal_succ_1b_to_2b", self.steal_succ_1b_to_2b),
            ("steal_succ_2b_to_3b", self.steal_succ_2b_to_3b),
        ];
        for (field, value) in steals {
            check_probability(field.to_string(), value)?;
        }

        check_non_negative("walk_hbp_bump".to_string(), self.walk_hbp_bump)?;

        let hd = &self.hit_distribution;
        let weights = [
            ("single", hd.single),
            ("double", hd.double),
            ("triple", hd.triple),
            ("home_run", hd.home_run),
        ];
        for (name, value) in weights {
            check_non_negative(format!("hit_distribution.{name}"), value)?;
        }

        Ok(())
    }
}

fn check_probability(field: String, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

fn check_non_negative(field: String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeValue { field, value })
    }
}
