/// Where the engine is in the hand lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EnteringTable,
    WaitingForHand,
    Monitoring,
    HandEnding,
    Paused,
    Stopped,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::EnteringTable => write!(f, "entering"),
            Self::WaitingForHand => write!(f, "waiting"),
            Self::Monitoring => write!(f, "monitoring"),
            Self::HandEnding => write!(f, "ending"),
            Self::Paused => write!(f, "paused"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
