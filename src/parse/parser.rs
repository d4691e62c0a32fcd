use super::*;
use crate::cards::*;
use crate::table::ActionKind;
use crate::*;

/// A line that matches none of the known phrase templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub id: LogId,
    pub text: String,
    pub reason: &'static str,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.id, self.reason, self.text)
    }
}

impl std::error::Error for ParseError {}

/// Turns one log line into the events it announces.
///
/// A roster line (`Player stacks: ...`) yields one event per seat and a
/// "sat in seat ... with a stack of" line yields two; every other known
/// template yields exactly one. Never panics on arbitrary input.
pub fn parse_line(line: &LogLine) -> std::result::Result<Vec<LogEvent>, ParseError> {
    let fail = |reason| ParseError {
        id: line.id.clone(),
        text: line.text.clone(),
        reason,
    };
    let text = line.text.trim();
    let kinds = if let Some(rest) = text.strip_prefix("-- starting hand #") {
        vec![hand_started(rest).ok_or_else(|| fail("malformed hand start"))?]
    } else if let Some(rest) = text.strip_prefix("-- ending hand #") {
        vec![hand_ended(rest).ok_or_else(|| fail("malformed hand end"))?]
    } else if let Some(rest) = text.strip_prefix("Player stacks:") {
        roster(rest).ok_or_else(|| fail("malformed player stacks"))?
    } else if let Some(rest) = text.strip_prefix("The player ") {
        arrival(rest).ok_or_else(|| fail("unknown player announcement"))?
    } else if let Some(rest) = text.strip_prefix("The admin approved the player ") {
        vec![approval(rest).ok_or_else(|| fail("unknown admin announcement"))?]
    } else if text.starts_with("The admin ") {
        Vec::new()
    } else if let Some(street) = board_prefix(text) {
        vec![board(street, text).ok_or_else(|| fail("malformed board"))?]
    } else if text.starts_with('"') {
        vec![play(text).ok_or_else(|| fail("unknown player action"))?]
    } else if chat(text) {
        Vec::new()
    } else {
        return Err(fail("unrecognized template"));
    };
    Ok(kinds
        .into_iter()
        .map(|kind| LogEvent::new(line.id.clone(), kind))
        .collect())
}

/// Parses every line, keeping the successes in order.
pub fn parse_batch(lines: &[LogLine]) -> (Vec<LogEvent>, Vec<ParseError>) {
    let mut events = Vec::new();
    let mut errors = Vec::new();
    for line in lines {
        match parse_line(line) {
            Ok(parsed) => events.extend(parsed),
            Err(e) => errors.push(e),
        }
    }
    (events, errors)
}

/// Seat requests and departures; they move nobody into a hand.
const NOTICES: &[&str] = &[
    "requested a seat",
    "canceled the seat request",
    "stood up",
    "quits",
    "left",
];

/// `alice: gl everyone`
fn chat(text: &str) -> bool {
    text.split_once(": ")
        .is_some_and(|(who, _)| !who.trim().is_empty() && !who.contains('"'))
}

/// `"name @ id"` at the start of `s`, and whatever follows the closing quote.
fn player(s: &str) -> Option<(PlayerRef, &str)> {
    let s = s.strip_prefix('"')?;
    let close = s.find('"')?;
    let (name, id) = s[..close].rsplit_once(" @ ")?;
    if id.is_empty() || name.is_empty() {
        return None;
    }
    Some((PlayerRef::new(id, name), &s[close + 1..]))
}

/// Leading amount of `s`: "1,000." and "1000" are both 1000.
fn amount(s: &str) -> Option<Chips> {
    let token = s.split_whitespace().next()?;
    let cleaned = token.trim_end_matches('.').replace(',', "");
    let value = cleaned.parse::<Chips>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn hand_started(rest: &str) -> Option<EventKind> {
    let digits = rest.split_whitespace().next()?;
    let number = digits.parse().ok()?;
    let hand_id = rest
        .split_once("(id: ")
        .and_then(|(_, tail)| tail.split_once(')'))
        .map(|(id, _)| id.trim().to_string())
        .unwrap_or_default();
    let dealer = rest
        .split_once("(dealer: ")
        .and_then(|(_, tail)| player(tail))
        .map(|(p, _)| p);
    let variant = rest
        .split('(')
        .skip(1)
        .filter_map(|group| group.split_once(')'))
        .map(|(inner, _)| inner.trim())
        .find(|inner| !inner.starts_with("id:") && !inner.starts_with("dealer:"))
        .unwrap_or_default()
        .to_string();
    Some(EventKind::HandStarted {
        number,
        hand_id,
        variant,
        dealer,
    })
}

fn hand_ended(rest: &str) -> Option<EventKind> {
    let digits = rest.split_whitespace().next()?;
    Some(EventKind::HandEnded {
        number: digits.parse().ok()?,
    })
}

/// `#1 "alice @ a1" (1000) | #3 "bob @ b2" (950)`
fn roster(rest: &str) -> Option<Vec<EventKind>> {
    let entries = rest
        .split(" | ")
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|entry| {
            let entry = entry.strip_prefix('#')?;
            let (seat, tail) = entry.split_once(' ')?;
            let (player, tail) = player(tail.trim_start())?;
            let stack = tail.trim().strip_prefix('(')?.strip_suffix(')')?;
            Some(EventKind::InitialStack {
                seat: seat.parse().ok()?,
                player,
                stack: amount(stack)?,
            })
        })
        .collect::<Option<Vec<_>>>()?;
    (!entries.is_empty()).then_some(entries)
}

/// `The player "alice @ a1" joined the game with a stack of 1000.`
/// `The player "alice @ a1" sat in seat #3 with a stack of 1000.`
fn arrival(rest: &str) -> Option<Vec<EventKind>> {
    let (player, tail) = player(rest)?;
    let tail = tail.trim_start();
    if let Some(stack) = tail.strip_prefix("joined the game with a stack of ") {
        return Some(vec![EventKind::PlayerJoined {
            player,
            stack: Some(amount(stack)?),
        }]);
    }
    if NOTICES.iter().any(|notice| tail.starts_with(notice)) {
        return Some(Vec::new());
    }
    let seated = tail.strip_prefix("sat in seat #")?;
    let (seat, stack) = match seated.split_once(" with a stack of ") {
        Some((seat, stack)) => (seat, Some(amount(stack)?)),
        None => (seated, None),
    };
    let seat = seat.trim().trim_end_matches('.').parse().ok()?;
    let mut kinds = vec![EventKind::SeatAssigned {
        seat,
        player: player.clone(),
    }];
    if stack.is_some() {
        kinds.push(EventKind::PlayerJoined { player, stack });
    }
    Some(kinds)
}

/// `The admin approved the player "alice @ a1" participation with a stack of 1000.`
fn approval(rest: &str) -> Option<EventKind> {
    let (player, tail) = player(rest)?;
    let stack = tail
        .trim_start()
        .strip_prefix("participation with a stack of ")?;
    Some(EventKind::PlayerJoined {
        player,
        stack: Some(amount(stack)?),
    })
}

fn board_prefix(text: &str) -> Option<Street> {
    let (head, _) = text.split_once(':')?;
    match head {
        "Flop" | "flop" => Some(Street::Flop),
        "Turn" | "turn" => Some(Street::Turn),
        "River" | "river" => Some(Street::Rive),
        _ => None,
    }
}

/// `Flop: [Ah, 7d, 2c]`, `Turn: Ah, 7d, 2c [Ks]`: always the cumulative board.
fn board(street: Street, text: &str) -> Option<EventKind> {
    let (_, cards) = text.split_once(':')?;
    let cards = Card::many(&cards.replace(['[', ']'], " ")).ok()?;
    (cards.len() == street.n_observed()).then_some(EventKind::Board { street, cards })
}

/// Everything that starts with a quoted player.
fn play(text: &str) -> Option<EventKind> {
    let (player, tail) = player(text)?;
    let tail = tail.trim();
    let (tail, all_in) = match tail.strip_suffix("and go all in") {
        Some(head) => (head.trim_end(), true),
        None => (tail, false),
    };
    let tail = tail.trim_end_matches('.');
    let promote = |kind| if all_in { ActionKind::AllIn } else { kind };
    if let Some(n) = tail.strip_prefix("posts a small blind of ") {
        return Some(EventKind::Blind {
            player,
            kind: BlindKind::Small,
            amount: amount(n)?,
            all_in,
        });
    }
    if let Some(n) = tail.strip_prefix("posts a big blind of ") {
        return Some(EventKind::Blind {
            player,
            kind: BlindKind::Big,
            amount: amount(n)?,
            all_in,
        });
    }
    if let Some(n) = tail.strip_prefix("collected ") {
        return Some(EventKind::Collected {
            player,
            amount: amount(n)?,
        });
    }
    if let Some(cards) = tail.strip_prefix("shows a ") {
        return Some(EventKind::Showed {
            player,
            cards: Card::many(cards).ok()?,
        });
    }
    let (kind, amount) = match tail {
        "checks" => (ActionKind::Check, None),
        "folds" => (ActionKind::Fold, None),
        _ => {
            let (kind, n) = tail
                .strip_prefix("calls ")
                .map(|n| (ActionKind::Call, n))
                .or_else(|| tail.strip_prefix("bets ").map(|n| (ActionKind::Bet, n)))
                .or_else(|| tail.strip_prefix("raises to ").map(|n| (ActionKind::Raise, n)))?;
            (kind, Some(amount(n)?))
        }
    };
    Some(EventKind::Action {
        player,
        kind: promote(kind),
        amount,
    })
}
