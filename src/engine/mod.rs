//! The hand-lifecycle state machine.
//!
//! ```text
//! EnteringTable → WaitingForHand → Monitoring → HandEnding → WaitingForHand …
//!                        ↕              ↕
//!                      Paused         Paused          (any) → Stopped
//! ```
mod engine;
mod phase;
mod timer;

pub use engine::*;
pub use phase::*;
pub use timer::*;
