//! baseball-sim CLI - Monte Carlo runs per inning and per game.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use baseball_sim::config::SimConfig;
use baseball_sim::constants::{DEFAULT_CURVE_MAX_OUTS, DEFAULT_CURVE_SIMS, DEFAULT_NUM_GAMES};
use baseball_sim::env_config::init_rayon_threads;
use baseball_sim::simulation::{
    expected_runs_per_inning_curve, run_distributions, runs_grid, save_json, simulate_many,
    variance_vs_mean, GameFormat,
};

#[derive(Parser)]
#[command(name = "baseball-sim")]
#[command(about = "Baseball outs-per-inning Monte Carlo (bases persist within an inning)")]
#[command(version)]
struct Cli {
    /// YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Outs per half-inning
    #[arg(long, default_value_t = 3)]
    outs: u32,

    /// Innings per game
    #[arg(long, default_value_t = 9)]
    innings: u32,

    /// Games to simulate per data point
    #[arg(long, default_value_t = DEFAULT_NUM_GAMES)]
    sims: usize,

    #[arg(long, value_enum, default_value_t = Mode::Metrics)]
    mode: Mode,

    /// Half-innings per point of the EV curve
    #[arg(long, default_value_t = DEFAULT_CURVE_SIMS)]
    curve_sims: usize,

    /// Largest outs-per-inning value for curve, grid and varmean
    #[arg(long, default_value_t = DEFAULT_CURVE_MAX_OUTS)]
    max_outs: u32,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for JSON results
    #[arg(long, default_value = "outputs")]
    outdir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Average total and per-team runs over `--sims` games
    Metrics,
    /// Expected runs per half-inning for outs 1..=max-outs
    Curve,
    /// Per-team runs for every (outs, innings) pair up to max-outs
    Grid,
    /// Per-team run distributions for 9x3, 6x4 and 5x5
    Hist,
    /// Mean and std dev of per-team runs vs outs at fixed innings
    Varmean,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let config = match &cli.config {
        Some(path) => SimConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    Ok(match cli.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

fn write(outdir: &Path, name: &str, value: &impl serde::Serialize) -> Result<PathBuf> {
    let path = outdir.join(name);
    save_json(value, &path).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = load_config(&cli)?;
    let threads = init_rayon_threads();
    info!(
        mode = ?cli.mode,
        seed = config.seed,
        threads,
        "Starting simulation"
    );

    let start = Instant::now();
    match cli.mode {
        Mode::Metrics => {
            let metrics = simulate_many(cli.innings, cli.outs, &config, cli.sims)?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            write(&cli.outdir, "metrics.json", &metrics)?;
        }
        Mode::Curve => {
            let curve = expected_runs_per_inning_curve(&config, cli.max_outs, cli.curve_sims)?;
            for point in &curve {
                info!(
                    "outs={:>2}  EV={:.3}  sd={:.3}",
                    point.outs, point.expected_value, point.std_dev
                );
            }
            write(&cli.outdir, "ev_curve.json", &curve)?;
        }
        Mode::Grid => {
            let grid = runs_grid(&config, cli.max_outs, cli.max_outs, cli.sims)?;
            write(&cli.outdir, "grid_runs.json", &grid)?;
        }
        Mode::Hist => {
            let dists = run_distributions(&config, &GameFormat::comparison_set(), cli.sims)?;
            for d in &dists {
                info!(
                    "{}: mean={:.2}  sd={:.2}  median={}  max={}",
                    d.label, d.distribution.mean, d.distribution.std_dev, d.distribution.median,
                    d.distribution.max
                );
            }
            write(&cli.outdir, "hist_9x3_6x4_5x5.json", &dists)?;
        }
        Mode::Varmean => {
            let points = variance_vs_mean(&config, cli.innings, cli.max_outs, cli.sims)?;
            for p in &points {
                info!("outs={:>2}  mean={:.3}  sd={:.3}", p.outs, p.mean, p.std_dev);
            }
            write(&cli.outdir, "var_vs_mean.json", &points)?;
        }
    }
    info!("Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
