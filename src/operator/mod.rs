//! The human end: where advice shows up and where pause or quit comes from.
#[cfg(feature = "cli")]
mod console;
mod script;

#[cfg(feature = "cli")]
pub use console::*;
pub use script::*;

use crate::cards::*;
use crate::oracle::BotAction;
use crate::table::Game;
use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    Pause,
    Resume,
    Quit,
}

/// One recommendation with the numbers it was made on.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub hand: u64,
    pub street: Street,
    pub hero_hand: Vec<Card>,
    pub board: Vec<Card>,
    pub pot: BigBlinds,
    pub stack: BigBlinds,
    pub to_call: BigBlinds,
    pub action: BotAction,
    /// True when the engine also pressed the button.
    pub executed: bool,
}

impl Advice {
    pub fn new(game: &Game, action: &BotAction, executed: bool) -> Self {
        Self {
            hand: game.hand(),
            street: game.street(),
            hero_hand: game.hero_hand().to_vec(),
            board: game.table().board().to_vec(),
            pot: game.pot_bb(),
            stack: game.hero_stack_bb(),
            to_call: game.to_call_bb(),
            action: action.clone(),
            executed,
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let show = |cards: &[Card]| cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ");
        write!(
            f,
            "#{} {} [{}] board [{}] pot {:.2}bb stack {:.2}bb to call {:.2}bb -> {}",
            self.hand,
            self.street,
            show(&self.hero_hand),
            show(&self.board),
            self.pot,
            self.stack,
            self.to_call,
            self.action
        )
    }
}

/// Polled by the engine at every boundary; never interrupts a call in flight.
#[async_trait::async_trait]
pub trait Operator: Send {
    async fn present(&mut self, advice: &Advice);
    /// A pending command, or [`Command::Continue`]. Must not block.
    async fn poll(&mut self) -> Command;
    /// Blocks for the next command while paused.
    async fn wait(&mut self) -> Command;
}

/// Logs advice and never interrupts.
#[derive(Debug, Default)]
pub struct QuietOperator;

#[async_trait::async_trait]
impl Operator for QuietOperator {
    async fn present(&mut self, advice: &Advice) {
        log::info!("[advice] {}", advice);
    }
    async fn poll(&mut self) -> Command {
        Command::Continue
    }
    async fn wait(&mut self) -> Command {
        Command::Resume
    }
}
