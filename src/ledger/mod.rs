//! Per-player tendencies carried across hands.
mod memory;
mod stats;

pub use memory::*;
pub use stats::*;

use std::collections::BTreeMap;

/// Keyed by display name, which is what the table shows across sessions.
pub trait Ledger: Send {
    fn get(&self, name: &str) -> Option<PlayerStats>;
    fn upsert(&mut self, name: &str, stats: PlayerStats);
    /// Folds one hand's counts into whatever is stored.
    fn record(&mut self, hand: &BTreeMap<String, PlayerStats>) {
        for (name, stats) in hand.iter() {
            let merged = self.get(name).unwrap_or_default() + *stats;
            self.upsert(name, merged);
        }
    }
}
