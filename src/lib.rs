//! Live-table poker advisor.
//!
//! Observes a browser-rendered table through an [`observer::Observer`],
//! rebuilds the current hand from the table's append-only text log,
//! asks an [`oracle::Oracle`] for a recommendation, and surfaces it to
//! the human (or executes it, in automated mode).
//!
//! ## Architecture
//!
//! - [`units`]: chip and big-blind normalization
//! - [`cards`]: card, rank, suit, and street value types
//! - [`parse`]: log lines to typed [`parse::LogEvent`] and identity maps
//! - [`ingest`]: watermark-driven, at-most-once log ingestion
//! - [`table`]: the Table/Game/Player aggregate
//! - [`oracle`]: decision query construction, retries, validation
//! - [`engine`]: the hand-lifecycle state machine
//!
//! ## Collaborators
//!
//! - [`observer`]: table scraping (snapshots, log lines, action buttons)
//! - [`ledger`]: per-player statistics store
//! - [`operator`]: human-in-the-loop presentation and pause/quit
pub mod cards;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod ledger;
pub mod observer;
pub mod operator;
pub mod oracle;
pub mod parse;
pub mod table;
pub mod units;

pub use error::Error;
pub use error::Result;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Raw chip amounts as shown on the table.
pub type Chips = f64;
/// Amounts normalized to big blinds.
pub type BigBlinds = f64;
/// Seat number as printed by the table (stable within a hand).
pub type Seat = usize;

// ============================================================================
// HAND LIFECYCLE PARAMETERS
// ============================================================================
/// Betting rounds per hand (preflop, flop, turn, river).
pub const NUM_STREETS: usize = 4;
/// Default per-turn time allowance on the table (seconds).
pub const MAX_TURN_LENGTH: u64 = 30;
/// Longest per-turn allowance a config may ask for (seconds).
pub const MAX_TURN_LENGTH_LIMIT: u64 = 3_600;
/// No hand deadline lies further out than this (milliseconds).
pub const MAX_HAND_TIMEOUT_MS: u64 = 86_400_000;
/// Oracle retries after the first failed attempt.
pub const ORACLE_RETRIES: usize = 2;
/// Fixed delay between Oracle attempts (milliseconds).
pub const ORACLE_BACKOFF_MS: u64 = 2_000;
/// Extra log pulls while identity maps are still incomplete.
pub const INGEST_RETRIES: usize = 3;
/// Initial delay between Observer polls (milliseconds).
pub const POLL_INTERVAL_MS: u64 = 250;
/// Ceiling for the exponential poll backoff (milliseconds).
pub const MAX_POLL_INTERVAL_MS: u64 = 4_000;
/// Messages kept in a hand's Oracle conversation, system prompt excluded.
pub const MAX_HISTORY: usize = 16;
/// Float tolerance used when comparing normalized amounts.
pub const TOLERANCE: f64 = 1e-6;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
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
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// The engine only observes quit requests at poll boundaries; this is the
/// escape hatch for a wedged Observer or Oracle call.
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
