//! End-to-end tests for the public simulation API.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use baseball_sim::config::{Batter, SimConfig};
use baseball_sim::error::{ConfigError, SimError};
use baseball_sim::simulation::{
    expected_runs_per_inning_curve, game_trial_seed, run_distributions, save_json,
    simulate_game, simulate_half_inning, simulate_half_inning_bounded, simulate_many,
    GameFormat,
};

fn no_out_config() -> SimConfig {
    let mut batters = BTreeMap::new();
    batters.insert("X".to_string(), Batter::new(1.0, 1.0));
    SimConfig {
        lineup: vec!["X".to_string()],
        batters,
        steal_att_1b_to_2b: 0.0,
        steal_att_2b_to_3b: 0.0,
        ..SimConfig::default()
    }
}

#[test]
fn test_game_is_deterministic() {
    let cfg = SimConfig::default().with_seed(2024);
    let a = simulate_game(9, 3, &cfg, true).unwrap();
    let b = simulate_game(9, 3, &cfg, true).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.total_runs, a.team1_runs + a.team2_runs);
    let progress = a.progress.unwrap();
    assert_eq!(progress.team1.len(), 9);
    assert_eq!(progress.team2.len(), 9);
}

#[test]
fn test_progress_omitted_unless_requested() {
    let game = simulate_game(3, 3, &SimConfig::default(), false).unwrap();
    assert!(game.progress.is_none());
}

#[test]
fn test_simulate_many_is_deterministic() {
    let cfg = SimConfig::default();
    let a = simulate_many(9, 3, &cfg, 200).unwrap();
    let b = simulate_many(9, 3, &cfg, 200).unwrap();
    assert_eq!(a, b);
    let c = simulate_many(9, 3, &cfg.with_seed(cfg.seed + 1), 200).unwrap();
    assert_ne!(a.avg_total_runs, c.avg_total_runs);
}

#[test]
fn test_simulate_many_uses_derived_trial_seeds() {
    let cfg = SimConfig::default().with_seed(7);
    let n = 25;
    let summary = simulate_many(6, 4, &cfg, n).unwrap();

    let totals: Vec<f64> = (0..n)
        .map(|i| {
            let trial = cfg.with_seed(game_trial_seed(cfg.seed, i));
            simulate_game(6, 4, &trial, false).unwrap().total_runs as f64
        })
        .collect();
    let mean = totals.iter().sum::<f64>() / n as f64;
    assert!((summary.avg_total_runs - mean).abs() < 1e-9);
    // The caller's config is untouched.
    assert_eq!(cfg.seed, 7);
}

#[test]
fn test_default_scoring_is_plausible() {
    let summary = simulate_many(9, 3, &SimConfig::default(), 2000).unwrap();
    assert!(
        summary.avg_total_runs > 4.0 && summary.avg_total_runs < 16.0,
        "avg_total_runs={}",
        summary.avg_total_runs
    );
    assert!((summary.avg_runs_per_team * 2.0 - summary.avg_total_runs).abs() < 1e-9);
    assert!(summary.std_runs_per_team > 0.0);
}

#[test]
fn test_curve_grows_with_outs() {
    let curve = expected_runs_per_inning_curve(&SimConfig::default(), 9, 2000).unwrap();
    assert_eq!(curve.len(), 9);
    let outs: Vec<u32> = curve.iter().map(|p| p.outs).collect();
    assert_eq!(outs, (1..=9u32).collect::<Vec<_>>());
    assert!(curve.iter().all(|p| p.expected_value >= 0.0 && p.std_dev >= 0.0));
    assert!(curve[8].expected_value > curve[0].expected_value * 3.0);
}

#[test]
fn test_run_distributions_default_formats() {
    let dists = run_distributions(&SimConfig::default(), &GameFormat::comparison_set(), 300).unwrap();
    let labels: Vec<&str> = dists.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["9x3", "6x4", "5x5"]);
    for d in &dists {
        assert_eq!(d.distribution.samples, 600);
        let total: u32 = d.distribution.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 600);
    }
}

#[test]
fn test_zero_outs_rejected() {
    let err = simulate_game(9, 0, &SimConfig::default(), false).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::NonPositive {
            field: "outs_per_inning"
        })
    ));
}

#[test]
fn test_zero_innings_rejected() {
    let err = simulate_many(0, 3, &SimConfig::default(), 10).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::NonPositive { field: "innings" })
    ));
}

#[test]
fn test_missing_batter_rejected_before_play() {
    let mut cfg = SimConfig::default();
    cfg.lineup.push("PH".to_string());
    let mut rng = SmallRng::seed_from_u64(1);
    let err = simulate_half_inning(3, &cfg, 0, &mut rng).unwrap_err();
    match err {
        SimError::Config(ConfigError::MissingBatter { position }) => assert_eq!(position, "PH"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_out_of_range_probability_rejected() {
    let cfg = SimConfig {
        steal_succ_1b_to_2b: 1.5,
        ..SimConfig::default()
    };
    let err = simulate_game(9, 3, &cfg, false).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::ProbabilityOutOfRange { .. })
    ));
}

#[test]
fn test_bounded_half_inning_reports_limit() {
    let mut rng = SmallRng::seed_from_u64(3);
    let err = simulate_half_inning_bounded(3, &no_out_config(), 0, &mut rng, 1000).unwrap_err();
    assert!(matches!(err, SimError::PlateAppearanceLimit { limit: 1000 }));
}

#[test]
fn test_bounded_half_inning_matches_unbounded() {
    let cfg = SimConfig::default();
    let mut rng_a = SmallRng::seed_from_u64(11);
    let mut rng_b = SmallRng::seed_from_u64(11);
    let a = simulate_half_inning(5, &cfg, 4, &mut rng_a).unwrap();
    let b = simulate_half_inning_bounded(5, &cfg, 4, &mut rng_b, 100_000).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_yaml_file_round_trip_into_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.yaml");
    std::fs::write(
        &path,
        "lineup: [A, B]\n\
         batters:\n  A: {BA: 0.300, OBP: 0.400}\n  B: {ba: 0.200, obp: 0.250}\n\
         seed: 99\n",
    )
    .unwrap();

    let cfg = SimConfig::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.lineup, ["A", "B"]);
    assert_eq!(cfg.seed, 99);
    assert_eq!(cfg.batters["B"], Batter::new(0.2, 0.25));
    assert_eq!(cfg.walk_hbp_bump, SimConfig::default().walk_hbp_bump);

    let game = simulate_game(9, 3, &cfg, false).unwrap();
    assert_eq!(game, simulate_game(9, 3, &cfg, false).unwrap());
}

#[test]
fn test_yaml_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_bundled_default_config_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.yaml");
    let cfg = SimConfig::from_yaml_file(path).unwrap();
    assert_eq!(cfg, SimConfig::default());
}

#[test]
fn test_save_json_curve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("ev_curve.json");
    let curve = expected_runs_per_inning_curve(&SimConfig::default(), 4, 100).unwrap();
    save_json(&curve, &path).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let points = parsed.as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[0]["outs"], 1);
    assert!(points[3]["expected_value"].as_f64().is_some());
    assert!(points[3]["std_dev"].as_f64().is_some());
}
