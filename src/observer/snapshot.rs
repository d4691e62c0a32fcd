use crate::cards::*;
use crate::table::ActionKind;
use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// What the Observer reports about the hand being dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandInfo {
    pub number: u64,
    pub players: usize,
}

/// Why the Observer stopped waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// The hero is on the clock.
    Action,
    /// The hand has been awarded.
    Winner,
}

/// One scrape of the table, in raw chips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSnapshot {
    pub pot: Chips,
    pub hero_seat: Option<Seat>,
    pub hero_hand: Vec<Card>,
    pub hero_stack: Chips,
    pub community_cards: Vec<Card>,
    pub players: Vec<SeatSnapshot>,
    pub available_actions: Vec<ActionKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub dealer: bool,
    pub turn: bool,
}
