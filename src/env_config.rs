//! Environment configuration shared by the binaries.
//!
//! Thread count comes from `BASEBALL_SIM_THREADS`, falling back to
//! `RAYON_NUM_THREADS`. When neither is set rayon picks its own default.

use tracing::{info, warn};

/// Thread count requested through the environment, if any.
pub fn requested_threads() -> Option<usize> {
    parse_threads(
        std::env::var("BASEBALL_SIM_THREADS")
            .ok()
            .or_else(|| std::env::var("RAYON_NUM_THREADS").ok()),
    )
}

fn parse_threads(value: Option<String>) -> Option<usize> {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
}

/// Build the rayon global pool. Tolerates an already-initialized pool.
/// Returns the thread count in effect.
pub fn init_rayon_threads() -> usize {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = requested_threads() {
        builder = builder.num_threads(n);
    }
    if let Err(e) = builder.build_global() {
        warn!("rayon global pool already initialized: {e}");
    }
    let num_threads = rayon::current_num_threads();
    info!(threads = num_threads, "rayon thread pool ready");
    num_threads
}
