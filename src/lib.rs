//! Multi-start, multi-threaded partitional clustering.
//!
//! Repeats a randomized single-pass clustering routine across a fresh pool of
//! worker threads, keeps the lowest-error partition, and renumbers its
//! clusters so that the same partition always yields the same labels.
//!
//! ## Pipeline
//!
//! 1. **Prepare**: Build the observation matrix, mask and column weights
//! 2. **Ensemble**: Split the pass budget across workers and collect runs
//! 3. **Select**: Keep the minimum-error run and canonicalize its labels
//! 4. **Handoff**: Write labels into storage and request a cluster map
//!
//! ## Core Types
//!
//! - [`Matrix`]: Row-major observation matrix with its [`Mask`] and [`Weights`]
//! - [`Clusterer`]: Contract of the single-run primitive, see [`KCluster`]
//! - [`Optimizer`]: Parallel multi-start driver producing a [`Pool`]
//! - [`Labeling`]: Content-ordered, 1-based cluster ids
//! - [`Session`]: Validation and orchestration over a [`Storage`]
#![allow(dead_code)]

pub mod config;
pub mod ensemble;
pub mod error;
pub mod handoff;
pub mod kcluster;
pub mod prepare;
pub mod select;
pub mod session;

pub use config::*;
pub use ensemble::*;
pub use error::*;
pub use handoff::*;
pub use kcluster::*;
pub use prepare::*;
pub use select::*;
pub use session::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Objective errors, distances and matrix entries.
pub type Energy = f64;
/// Centroid weight fractions and column weights.
pub type Fraction = f64;
/// Cluster ids as written to integer storage columns.
pub type Label = i64;

// ============================================================================
// CLUSTERING DEFAULTS
// ============================================================================
/// Default number of clusters.
pub const DEFAULT_CLUSTERS: usize = 5;
/// Largest cluster count offered for a dataset.
pub const MAX_CLUSTERS: usize = 60;
/// Default minimum number of observations per cluster.
pub const DEFAULT_MIN_SIZE: usize = 1;
/// Default total restart budget split across workers.
pub const DEFAULT_PASSES: usize = 50;
/// Default iteration cap of a single restart.
pub const DEFAULT_ITERATIONS: usize = 1000;

// ============================================================================
// WEIGHTING
// ============================================================================
/// Centroid weight at which every column weight collapses to 1.
pub const CENTROID_PARITY: Fraction = 0.5;

// ============================================================================
// STORAGE
// ============================================================================
/// Field length of newly created integer columns.
pub const DEFAULT_INTEGER_LENGTH: usize = 20;
/// Decimals of newly created integer columns.
pub const DEFAULT_INTEGER_DECIMALS: usize = 0;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
