//! The table as seen through the browser.
//!
//! The scraping layer lives outside this crate; [`Observer`] is the seam.
//! [`ScriptObserver`] replays a recorded session for tests and the
//! `replay` binary.
mod script;
mod snapshot;

pub use script::*;
pub use snapshot::*;

use crate::parse::LogId;
use crate::parse::LogLine;
use crate::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObserverError {
    /// The session is over; nothing more will be observed.
    #[error("observer closed")]
    Closed,
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("scrape failed: {0}")]
    Scrape(String),
    #[error("could not act: {0}")]
    Actuation(String),
}

/// Read access to a live table plus the four buttons.
///
/// Every method is awaited sequentially by the engine, which is the
/// only caller, so implementations can hold `&mut self` across awaits.
#[async_trait::async_trait]
pub trait Observer: Send {
    async fn navigate_to_game(&mut self, game: &str) -> std::result::Result<(), ObserverError>;
    async fn is_seated(&mut self) -> std::result::Result<bool, ObserverError>;
    async fn take_seat(&mut self) -> std::result::Result<(), ObserverError>;
    /// The hand currently being dealt, if any.
    async fn current_hand(&mut self) -> std::result::Result<Option<HandInfo>, ObserverError>;
    /// Blocks until the hero must act or the hand has a winner.
    async fn wait_for_bot_turn_or_winner(
        &mut self,
        players: usize,
        max_turn_length: u64,
    ) -> std::result::Result<Signal, ObserverError>;
    async fn table_snapshot(&mut self) -> std::result::Result<TableSnapshot, ObserverError>;
    /// Lines created after `since`, or the whole log when `since` is `None`.
    /// Order and uniqueness are not guaranteed.
    async fn fetch_log_lines_since(
        &mut self,
        since: Option<&LogId>,
    ) -> std::result::Result<Vec<LogLine>, ObserverError>;
    async fn check(&mut self) -> std::result::Result<(), ObserverError>;
    async fn call(&mut self) -> std::result::Result<(), ObserverError>;
    async fn fold(&mut self) -> std::result::Result<(), ObserverError>;
    /// Bets or raises to `to` chips.
    async fn bet_or_raise(&mut self, to: Chips) -> std::result::Result<(), ObserverError>;
}
