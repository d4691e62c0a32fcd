//! The aggregate the engine mutates and everyone else reads.
mod action;
mod game;
mod player;
mod table;

pub use action::*;
pub use game::*;
pub use player::*;
pub use table::*;
