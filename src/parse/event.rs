use crate::cards::*;
use crate::table::ActionKind;
use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

/// Creation id of a log line; the ordering and de-duplication key.
///
/// The table stamps lines with numeric strings, so ids compare
/// numerically when both sides are integers. Anything else sorts after
/// every numeric id, lexicographically, which keeps the order total.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    fn numeric(&self) -> Option<u128> {
        self.0.parse().ok()
    }
}

impl Ord for LogId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}
impl PartialOrd for LogId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
impl From<String> for LogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw line of the table log, as the Observer hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub id: LogId,
    pub text: String,
}

impl LogLine {
    pub fn new(id: impl Into<LogId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A player as the log names them: `"name @ id"`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{} @ {}\"", self.name, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlindKind {
    Small,
    Big,
}

/// What a log line says happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    SeatAssigned {
        seat: Seat,
        player: PlayerRef,
    },
    PlayerJoined {
        player: PlayerRef,
        stack: Option<Chips>,
    },
    InitialStack {
        seat: Seat,
        player: PlayerRef,
        stack: Chips,
    },
    Action {
        player: PlayerRef,
        kind: ActionKind,
        amount: Option<Chips>,
    },
    HandStarted {
        number: u64,
        hand_id: String,
        variant: String,
        dealer: Option<PlayerRef>,
    },
    HandEnded {
        number: u64,
    },
    Blind {
        player: PlayerRef,
        kind: BlindKind,
        amount: Chips,
        /// A short post; it says nothing about the stakes.
        all_in: bool,
    },
    Board {
        street: Street,
        cards: Vec<Card>,
    },
    Collected {
        player: PlayerRef,
        amount: Chips,
    },
    Showed {
        player: PlayerRef,
        cards: Vec<Card>,
    },
}

/// A parsed unit of the log, stamped with the id of its source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub id: LogId,
    pub kind: EventKind,
}

impl LogEvent {
    pub fn new(id: LogId, kind: EventKind) -> Self {
        Self { id, kind }
    }
    /// The player the event is about, if any.
    pub fn player(&self) -> Option<&PlayerRef> {
        match &self.kind {
            EventKind::SeatAssigned { player, .. }
            | EventKind::PlayerJoined { player, .. }
            | EventKind::InitialStack { player, .. }
            | EventKind::Action { player, .. }
            | EventKind::Blind { player, .. }
            | EventKind::Collected { player, .. }
            | EventKind::Showed { player, .. } => Some(player),
            EventKind::HandStarted { dealer, .. } => dealer.as_ref(),
            EventKind::HandEnded { .. } | EventKind::Board { .. } => None,
        }
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            EventKind::SeatAssigned { seat, player } => write!(f, "{} sits #{}", player, seat),
            EventKind::PlayerJoined { player, .. } => write!(f, "{} joins", player),
            EventKind::InitialStack { seat, player, stack } => {
                write!(f, "#{} {} ({})", seat, player, stack)
            }
            EventKind::Action {
                player,
                kind,
                amount: Some(n),
            } => write!(f, "{} {} {}", player, kind, n),
            EventKind::Action { player, kind, .. } => write!(f, "{} {}", player, kind),
            EventKind::HandStarted { number, .. } => write!(f, "hand #{} starts", number),
            EventKind::HandEnded { number } => write!(f, "hand #{} ends", number),
            EventKind::Blind { player, amount, .. } => write!(f, "{} posts {}", player, amount),
            EventKind::Board { street, cards } => write!(
                f,
                "{}: {}",
                street,
                cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
            ),
            EventKind::Collected { player, amount } => {
                write!(f, "{} collects {}", player, amount)
            }
            EventKind::Showed { player, .. } => write!(f, "{} shows", player),
        }
    }
}
